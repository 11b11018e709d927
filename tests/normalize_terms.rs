// tests/normalize_terms.rs
use game_deals_watcher::ingest::{normalize_term, normalize_text};
use game_deals_watcher::SearchTerm;

#[test]
fn simple_term_unchanged() {
    assert_eq!(normalize_text("foo"), "foo");
}

#[test]
fn trims_and_strips_punctuation() {
    assert_eq!(normalize_text("  Foo!  "), "foo");
    assert_eq!(normalize_text("  foo   "), "foo");
}

#[test]
fn lower_cases() {
    assert_eq!(normalize_text("PS4"), "ps4");
}

#[test]
fn idempotent_for_single_runs() {
    for s in ["  Foo!  ", "TheC64   Mini", "Spiderman PS4", "$99 deal", ""] {
        let once = normalize_text(s);
        assert_eq!(normalize_text(&once), once, "input {s:?}");
    }
}

#[test]
fn numbers_pass_through() {
    assert_eq!(normalize_term(&SearchTerm::from(42)), SearchTerm::from(42));
}

#[test]
fn absent_becomes_empty_text() {
    assert_eq!(normalize_term(&SearchTerm::Absent), SearchTerm::from(""));
}

#[test]
fn null_and_numbers_deserialize_as_terms() {
    let terms: Vec<SearchTerm> = serde_json::from_str(r#"["Zelda", 42, null]"#).unwrap();
    assert_eq!(
        terms,
        vec![SearchTerm::from("Zelda"), SearchTerm::from(42), SearchTerm::Absent]
    );
}
