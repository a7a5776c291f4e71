//! Text processing utilities.
//!
//! Helpers for turning scheme data into display text: ministry facets,
//! apply-link validation, truncation and search-term highlighting.

use crate::api::Scheme;
use log::*;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

const APPLY_LINK_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*\.[^\s]+$";

/// Returns the unique ministry names of the given schemes, sorted.
///
pub fn ministry_facets(schemes: &[Scheme]) -> Vec<String> {
    schemes
        .iter()
        .map(|s| s.ministry.trim())
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Check whether the text looks like an http(s) URL an applicant can open.
///
pub fn is_valid_apply_link(link: &str) -> bool {
    match Regex::new(APPLY_LINK_PATTERN) {
        Ok(re) => re.is_match(link.trim()),
        Err(e) => {
            warn!("Failed to compile regex pattern '{}': {}", APPLY_LINK_PATTERN, e);
            false
        }
    }
}

/// Shorten text to at most `max` characters, ending with an ellipsis when
/// something was cut.
///
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Split text into alternating (segment, is_match) pieces for every
/// case-insensitive occurrence of the search term.
///
pub fn highlight_matches<'a>(text: &'a str, term: &str) -> Vec<(&'a str, bool)> {
    let term = term.trim();
    if term.is_empty() {
        return vec![(text, false)];
    }
    let re = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(r) => r,
        Err(e) => {
            warn!("Failed to compile highlight pattern for '{}': {}", term, e);
            return vec![(text, false)];
        }
    };

    let mut pieces = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            pieces.push((&text[last..m.start()], false));
        }
        pieces.push((m.as_str(), true));
        last = m.end();
    }
    if last < text.len() {
        pieces.push((&text[last..], false));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn scheme_in(ministry: &str) -> Scheme {
        let mut scheme: Scheme = Faker.fake();
        scheme.ministry = ministry.to_string();
        scheme
    }

    #[test]
    fn test_ministry_facets_unique_and_sorted() {
        let schemes = vec![
            scheme_in("Ministry of Finance"),
            scheme_in("Ministry of Education"),
            scheme_in("Ministry of Finance"),
            scheme_in("  "),
        ];
        assert_eq!(
            ministry_facets(&schemes),
            vec!["Ministry of Education", "Ministry of Finance"]
        );
    }

    #[test]
    fn test_ministry_facets_empty() {
        assert!(ministry_facets(&[]).is_empty());
    }

    #[test]
    fn test_apply_link_validation() {
        assert!(is_valid_apply_link("https://pmkisan.gov.in/apply"));
        assert!(is_valid_apply_link("http://scholarships.gov.in"));
        assert!(!is_valid_apply_link("pmkisan.gov.in"));
        assert!(!is_valid_apply_link("https://"));
        assert!(!is_valid_apply_link("ftp://example.org/file"));
        assert!(!is_valid_apply_link("https://exa mple.org"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Stand-Up India", 40), "Stand-Up India");
        assert_eq!(truncate("Pradhan Mantri Awas Yojana", 10), "Pradhan M…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_highlight_matches_case_insensitive() {
        let pieces = highlight_matches("Health insurance for HEALTH workers", "health");
        assert_eq!(
            pieces,
            vec![
                ("Health", true),
                (" insurance for ", false),
                ("HEALTH", true),
                (" workers", false),
            ]
        );
    }

    #[test]
    fn test_highlight_matches_escapes_term() {
        let pieces = highlight_matches("Ministry of MSME (Udyam)", "(udyam)");
        assert_eq!(pieces, vec![("Ministry of MSME ", false), ("(Udyam)", true)]);
    }

    #[test]
    fn test_highlight_matches_empty_term() {
        assert_eq!(highlight_matches("anything", "  "), vec![("anything", false)]);
    }
}
