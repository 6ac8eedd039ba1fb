// src/core/sanitize.rs
use crate::config::consts::{NAME_ARTIFACT, PLACEHOLDER_STATUSES};

/// Decode the entities that actually show up in the client's markup.
/// Unknown or malformed entities are kept verbatim.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') { return s!(s); }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail[1..]
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..1 + semi]).map(|c| (c, semi + 2)));
        match decoded {
            Some((ch, used)) => { out.push(ch); rest = &tail[used..]; }
            None => { out.push('&'); rest = &tail[1..]; }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Trim and drop the `~` + mangled narrow-NBSP suffix the client renders
/// after some names. Repeats until nothing changes, so stacked artifacts go
/// too and cleaning twice gives the same result as cleaning once.
pub fn clean_name(name: &str) -> String {
    let mut out = s!(name.trim());
    while out.contains(NAME_ARTIFACT) {
        out = s!(out.replacen(NAME_ARTIFACT, "", 1).trim());
    }
    out
}

/// Trimmed status text, or `None` for the client's stock placeholders
/// ("Available", "I am using WhatsApp", "Loading About...") and blanks.
pub fn clean_description(description: &str) -> Option<String> {
    let d = description.trim();
    if d.is_empty() { return None; }
    let lc = d.to_lowercase();
    if PLACEHOLDER_STATUSES.iter().any(|p| lc.contains(&p.to_lowercase())) {
        return None;
    }
    Some(s!(d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_named_numeric_and_unknown() {
        assert_eq!(normalize_entities("A &amp; B&nbsp;&#65;&#x42;"), "A & B\u{a0}AB");
        assert_eq!(normalize_entities("fish & chips &bogus; &"), "fish & chips &bogus; &");
    }

    #[test]
    fn clean_name_strips_artifact_and_is_idempotent() {
        let raw = "  Jane Doe ~\u{00e2}\u{20ac}\u{00af}";
        let once = clean_name(raw);
        assert_eq!(once, "Jane Doe");
        assert_eq!(clean_name(&once), once);
        assert_eq!(clean_name("   "), "");
    }

    #[test]
    fn clean_name_strips_every_stacked_artifact() {
        let raw = "Ann ~\u{00e2}\u{20ac}\u{00af} ~\u{00e2}\u{20ac}\u{00af}";
        let once = clean_name(raw);
        assert_eq!(once, "Ann");
        assert_eq!(clean_name(&once), once);

        // removing the inner copy joins the outer halves into a new one
        let nested = "Bo ~~\u{00e2}\u{20ac}\u{00af}\u{00e2}\u{20ac}\u{00af}";
        assert_eq!(clean_name(nested), "Bo");
    }

    #[test]
    fn placeholders_are_dropped_case_insensitively() {
        assert_eq!(clean_description("available"), None);
        assert_eq!(clean_description("  Loading About..."), None);
        assert_eq!(clean_description("Hey there! I AM USING WHATSAPP."), None);
        assert_eq!(clean_description(" On a call "), Some(s!("On a call")));
        assert_eq!(clean_description(""), None);
    }
}
