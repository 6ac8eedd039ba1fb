// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::options::ExportFormat;
use crate::params::Params;
use crate::progress::Progress;

struct CliProgress;

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) { println!("Replaying {total} snapshot(s)"); }
    fn log(&mut self, msg: &str) { println!("  {msg}"); }
    fn item_done(&mut self, index: usize, captured: usize) {
        println!("  [{}] {} contact(s) so far", index + 1, captured);
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let params = parse_args(env::args().skip(1))?;

    let mut progress = CliProgress;
    let summary = if params.quiet {
        crate::runner::run(&params, None)?
    } else {
        crate::runner::run(&params, Some(&mut progress as &mut dyn Progress))?
    };

    if !params.quiet {
        for line in summary.history.iter().rev() {
            println!("  > {line}");
        }
    }
    println!("Wrote {} contact(s) to {}", summary.captured, summary.export.display());
    Ok(())
}

pub fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Params, Box<dyn Error>> {
    let mut params = Params::new();

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-o" | "--out" => params.app.export.dir = PathBuf::from(args.next().ok_or("Missing output dir")?),
            "--stem" => params.app.export.stem = args.next().ok_or("Missing value for --stem")?,
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.app.export.format = ExportFormat::parse(&v)
                    .ok_or_else(|| format!("Unknown format: {}", v))?;}
            "--no-headers" => params.app.export.include_headers = false,
            "--source" => params.app.capture.source = Some(args.next().ok_or("Missing value for --source")?),
            "--delay" => {
                let v: u64 = args.next().ok_or("Missing value for --delay")?.parse()?;
                params.app.capture.attach_delay_ms = v;
                params.app.capture.extract_delay_ms = v;}
            "--max-logs" => {
                let v: usize = args.next().ok_or("Missing value for --max-logs")?.parse()?;
                if v == 0 { return Err("--max-logs must be at least 1".into()); }
                params.app.capture.max_logs = v;}
            "-q" | "--quiet" => params.quiet = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            s if s.starts_with('-') => return Err(format!("Unknown arg: {}", a).into()),
            _ => params.snapshots.push(PathBuf::from(a)),
        }
    }

    if params.snapshots.is_empty() {
        return Err("Specify at least one snapshot file (see --help)".into());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> std::vec::IntoIter<String> {
        v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_options_and_positionals() {
        let p = parse_args(args(&["--format", "TSV", "--source", "search", "a.html", "-o", "exp", "b.html"])).unwrap();
        assert_eq!(p.snapshots, [PathBuf::from("a.html"), PathBuf::from("b.html")]);
        assert_eq!(p.app.export.format, ExportFormat::Tsv);
        assert_eq!(p.app.export.dir, PathBuf::from("exp"));
        assert_eq!(p.app.capture.source.as_deref(), Some("search"));
    }

    #[test]
    fn rejects_unknown_flags_and_missing_snapshots() {
        assert!(parse_args(args(&["--bogus", "a.html"])).is_err());
        assert!(parse_args(args(&["--no-headers"])).is_err());
        assert!(parse_args(args(&["--format", "json", "a.html"])).is_err());
    }
}
