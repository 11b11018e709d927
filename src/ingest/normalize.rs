// src/ingest/normalize.rs
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::ingest::types::SearchTerm;

/// Canonical form of a string for substring comparison.
///
/// Only the first special character and the first whitespace run are
/// cleaned; `"a!b?c"` keeps its `?`. Matching relies on both sides going
/// through the same function, so the quirk is kept as-is.
pub fn normalize_text(s: &str) -> String {
    // ASCII word chars, like a classic `\w`; anything else (including
    // accented letters) counts as special.
    static RE_SPECIAL: OnceCell<Regex> = OnceCell::new();
    let re_special = RE_SPECIAL.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s]").unwrap());

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());

    let out = s.trim();
    let out = re_special.replace(out, "");
    let out = re_ws.replace(&out, " ");
    out.to_lowercase()
}

/// Normalize a search term. Numbers pass through, `Absent` becomes `""`.
pub fn normalize_term(term: &SearchTerm) -> SearchTerm {
    match term {
        SearchTerm::Text(s) => SearchTerm::Text(normalize_text(s)),
        SearchTerm::Number(n) => SearchTerm::Number(n.clone()),
        SearchTerm::Absent => SearchTerm::Text(String::new()),
    }
}
