// src/csv.rs
use std::io::{self, Write};

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Serialize sink output (`to_csv_data`: header row first) to a string.
/// With `include_headers == false` the first row is skipped.
pub fn to_export_string(data: &[Vec<String>], include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();

    let skip = if include_headers { 0 } else { 1 };
    for r in data.iter().skip(skip) {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec![s!("Phone Number"), s!("Name")],
            vec![s!("Doe, Jane"), s!("say \"hi\"")],
        ]
    }

    #[test]
    fn quotes_separator_and_doubles_quotes() {
        let out = to_export_string(&rows(), true, ',');
        assert_eq!(out, "Phone Number,Name\n\"Doe, Jane\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn tsv_leaves_commas_alone_and_can_drop_header() {
        let out = to_export_string(&rows(), false, '\t');
        assert_eq!(out, "Doe, Jane\t\"say \"\"hi\"\"\"\n");
    }
}
