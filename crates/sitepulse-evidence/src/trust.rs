//! Trust-evidence classification.

use std::collections::HashSet;

use sitepulse_core::{PageRecord, Staged, TrustEvidence, TrustKind, WarningCode};

use crate::jsonld;
use crate::text::{collapse_whitespace, truncate_chars};

pub const MAX_TRUST_EVIDENCE: usize = 12;
pub const MAX_SNIPPET_CHARS: usize = 160;

/// Keyword fragments per kind, checked in this order.
const KEYWORDS: &[(TrustKind, &[&str])] = &[
    (TrustKind::License, &["licens"]),
    (TrustKind::Insured, &["insur", "bonded"]),
    (TrustKind::Warranty, &["warrant", "guarantee"]),
    (TrustKind::Award, &["award", "winner", "best of"]),
    (TrustKind::Certification, &["certif", "accredit", "bbb"]),
    (
        TrustKind::YearsInBusiness,
        &["years", "since 19", "since 20", "established", "family owned"],
    ),
    (TrustKind::Rating, &["star", "rating", "rated"]),
    (TrustKind::Reviews, &["review", "testimonial"]),
];

fn kind_from_hint(hint: &str) -> Option<TrustKind> {
    let hint = hint.trim().to_ascii_lowercase();
    match hint.as_str() {
        "license" | "licensed" => Some(TrustKind::License),
        "insured" | "insurance" | "bonded" => Some(TrustKind::Insured),
        "reviews" | "review" | "testimonials" => Some(TrustKind::Reviews),
        "rating" | "stars" => Some(TrustKind::Rating),
        "years" | "years_in_business" | "experience" => Some(TrustKind::YearsInBusiness),
        "warranty" | "guarantee" => Some(TrustKind::Warranty),
        "award" | "awards" => Some(TrustKind::Award),
        "certification" | "certified" => Some(TrustKind::Certification),
        _ => None,
    }
}

/// Classifies a trust phrase, preferring the crawler's hint when it names a
/// known kind.
#[must_use]
pub fn classify_trust(text: &str, hint: Option<&str>) -> TrustKind {
    if let Some(kind) = hint.and_then(kind_from_hint) {
        return kind;
    }
    let text = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map_or(TrustKind::Other, |(kind, _)| *kind)
}

fn rating_snippets(pages: &[&PageRecord]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| jsonld::nodes(&p.structured_data))
        .filter_map(|n| n.get("aggregateRating").and_then(serde_json::Value::as_object))
        .filter_map(|rating| {
            let value = jsonld::text(rating, "ratingValue")?;
            let best = jsonld::text(rating, "bestRating").unwrap_or_else(|| "5".to_string());
            let count = jsonld::text(rating, "reviewCount")
                .or_else(|| jsonld::text(rating, "ratingCount"));
            Some(match count {
                Some(count) => format!("Rated {value}/{best} from {count} reviews"),
                None => format!("Rated {value}/{best}"),
            })
        })
        .collect()
}

/// Collects classified, deduplicated trust evidence from `pages`.
#[must_use]
pub fn extract_trust(pages: &[&PageRecord]) -> Staged<Vec<TrustEvidence>> {
    let structured = rating_snippets(pages)
        .into_iter()
        .map(|snippet| (TrustKind::Rating, snippet));
    let phrases = pages.iter().flat_map(|p| p.trust_phrases.iter()).map(|phrase| {
        (
            classify_trust(&phrase.text, phrase.kind.as_deref()),
            collapse_whitespace(&phrase.text),
        )
    });

    let mut seen = HashSet::new();
    let evidence: Vec<TrustEvidence> = structured
        .chain(phrases)
        .filter(|(_, snippet)| !snippet.is_empty())
        .filter(|(kind, snippet)| seen.insert((*kind, snippet.to_lowercase())))
        .take(MAX_TRUST_EVIDENCE)
        .map(|(kind, snippet)| TrustEvidence {
            kind,
            snippet: truncate_chars(&snippet, MAX_SNIPPET_CHARS),
        })
        .collect();

    let mut staged = Staged::new(evidence);
    if staged.value.is_empty() {
        staged.warn(WarningCode::TrustMissing, "no trust signals found");
    }
    staged
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sitepulse_core::TrustPhrase;

    use super::*;

    fn phrase(text: &str) -> TrustPhrase {
        TrustPhrase {
            text: text.to_string(),
            kind: None,
        }
    }

    #[test]
    fn keyword_classification() {
        assert_eq!(classify_trust("Licensed & Insured", None), TrustKind::License);
        assert_eq!(classify_trust("Fully bonded", None), TrustKind::Insured);
        assert_eq!(classify_trust("Serving Miami since 1998", None), TrustKind::YearsInBusiness);
        assert_eq!(classify_trust("5-star rated on Google", None), TrustKind::Rating);
        assert_eq!(classify_trust("Read our reviews", None), TrustKind::Reviews);
        assert_eq!(classify_trust("Friendly techs", None), TrustKind::Other);
        assert_eq!(classify_trust("Friendly techs", Some("award")), TrustKind::Award);
    }

    #[test]
    fn aggregate_rating_comes_first_and_duplicates_drop() {
        let page = PageRecord {
            structured_data: vec![json!({
                "@type": "Plumber",
                "aggregateRating": {"@type": "AggregateRating", "ratingValue": "4.9", "reviewCount": 213}
            })],
            trust_phrases: vec![
                phrase("Licensed & Insured"),
                phrase("licensed  &  insured"),
                phrase("100% Satisfaction Guarantee"),
            ],
            ..PageRecord::default()
        };
        let staged = extract_trust(&[&page]);
        let ev = &staged.value;
        assert_eq!(ev.len(), 3);
        assert_eq!(ev[0].kind, TrustKind::Rating);
        assert_eq!(ev[0].snippet, "Rated 4.9/5 from 213 reviews");
        assert_eq!(ev[2].kind, TrustKind::Warranty);
    }

    #[test]
    fn snippets_are_truncated_and_capped() {
        let page = PageRecord {
            trust_phrases: (0..20)
                .map(|i| phrase(&format!("{i} {}", "x".repeat(300))))
                .collect(),
            ..PageRecord::default()
        };
        let staged = extract_trust(&[&page]);
        assert_eq!(staged.value.len(), MAX_TRUST_EVIDENCE);
        assert!(staged.value[0].snippet.chars().count() <= MAX_SNIPPET_CHARS + 1);
    }

    #[test]
    fn no_signals_warns() {
        let page = PageRecord::default();
        assert!(extract_trust(&[&page]).has_warning(WarningCode::TrustMissing));
    }
}
