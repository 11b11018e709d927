// src/ingest/matcher.rs
use metrics::counter;

use crate::ingest::normalize::{normalize_term, normalize_text};
use crate::ingest::types::{DealRecord, SearchTerm};

/// Keep the records whose title or description contains any of `terms`.
///
/// `terms` is normalized in place as a side effect, so callers holding a
/// config list see the canonical forms afterwards. Output keeps feed order
/// and the original, unnormalized field values.
pub fn match_deals(records: &[DealRecord], terms: &mut [SearchTerm]) -> Vec<DealRecord> {
    for term in terms.iter_mut() {
        *term = normalize_term(term);
    }
    let needles: Vec<String> = terms.iter().map(SearchTerm::needle).collect();

    let mut deals = Vec::new();
    for record in records {
        let title = normalize_text(&record.title);
        let description = normalize_text(&record.description);

        if let Some(hit) = needles
            .iter()
            .find(|n| title.contains(n.as_str()) || description.contains(n.as_str()))
        {
            tracing::info!(term = %hit, guid = %record.identity, "found deal matching");
            deals.push(record.clone());
        }
    }

    counter!("deals_matched_total").increment(deals.len() as u64);
    deals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, description: &str) -> DealRecord {
        DealRecord {
            title: title.into(),
            link: format!("https://forum.test/{}", title.len()),
            description: description.into(),
            published_at: String::new(),
            identity: title.into(),
            identity_is_permanent_link: false,
        }
    }

    #[test]
    fn matches_on_description_too() {
        let recs = vec![rec("Weekly thread", "Zelda BOTW is $40 today")];
        let mut terms = vec![SearchTerm::from("zelda botw")];
        assert_eq!(match_deals(&recs, &mut terms).len(), 1);
    }

    #[test]
    fn multiple_hits_include_record_once() {
        let recs = vec![rec("Zelda and Mario bundle", "")];
        let mut terms = vec![SearchTerm::from("Zelda"), SearchTerm::from("Mario")];
        assert_eq!(match_deals(&recs, &mut terms).len(), 1);
    }

    #[test]
    fn terms_are_normalized_in_place() {
        let mut terms = vec![SearchTerm::from("  PS4! "), SearchTerm::from(2077)];
        match_deals(&[], &mut terms);
        assert_eq!(terms, vec![SearchTerm::from("ps4"), SearchTerm::from(2077)]);
    }

    #[test]
    fn numeric_term_matches_digits() {
        let recs = vec![rec("Cyberpunk 2077 $19.99", "")];
        let mut terms = vec![SearchTerm::from(2077)];
        assert_eq!(match_deals(&recs, &mut terms).len(), 1);
    }

    #[test]
    fn whole_float_term_matches_like_an_integer() {
        let recs = vec![rec("PS2 deal", "")];
        let mut terms: Vec<SearchTerm> = serde_json::from_str("[2.0]").unwrap();
        assert_eq!(match_deals(&recs, &mut terms).len(), 1);
    }

    #[test]
    fn output_keeps_original_text() {
        let recs = vec![rec("HALO Infinite!", "<p>Deal</p>")];
        let mut terms = vec![SearchTerm::from("halo")];
        let out = match_deals(&recs, &mut terms);
        assert_eq!(out[0].title, "HALO Infinite!");
        assert_eq!(out[0].description, "<p>Deal</p>");
    }

    #[test]
    fn no_terms_no_matches() {
        let recs = vec![rec("Anything", "")];
        assert!(match_deals(&recs, &mut []).is_empty());
    }
}
