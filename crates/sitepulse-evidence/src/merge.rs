//! Priority-ordered candidate merging.
//!
//! Every multi-source field follows the same pattern: candidates arrive
//! tagged with the [`Provenance`] that produced them, the highest-priority
//! source wins the primary slot, and all distinct values are retained for
//! the full list. The helpers here are the only place that pattern lives.

use std::collections::HashSet;
use std::hash::Hash;

use sitepulse_core::{Provenance, Sourced};

/// A candidate value and the extractor that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<T> {
    pub value: T,
    pub origin: Provenance,
}

impl<T> Candidate<T> {
    pub fn new(value: T, origin: Provenance) -> Self {
        Self { value, origin }
    }
}

/// Contact-channel origins, highest priority first.
pub const CONTACT_PRIORITY: [Provenance; 6] = [
    Provenance::StructuredData,
    Provenance::AnchorTarget,
    Provenance::HeaderText,
    Provenance::FooterText,
    Provenance::BodyTextRegex,
    Provenance::SecondaryPageText,
];

fn rank(priority: &[Provenance], origin: Provenance) -> usize {
    priority
        .iter()
        .position(|p| *p == origin)
        .unwrap_or(priority.len())
}

/// Orders `candidates` by `priority` (stable within a tier), drops every
/// candidate whose key was already seen or is `None`, and caps the result.
///
/// The first candidate of the highest-priority tier becomes element 0, the
/// display/primary value.
pub fn merge_ranked<T, K, F>(
    mut candidates: Vec<Candidate<T>>,
    priority: &[Provenance],
    cap: usize,
    key: F,
) -> Vec<Candidate<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> Option<K>,
{
    candidates.sort_by_key(|c| rank(priority, c.origin));

    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for candidate in candidates {
        if merged.len() >= cap {
            break;
        }
        let Some(k) = key(&candidate.value) else {
            tracing::debug!(origin = %candidate.origin, "dropped candidate without a valid key");
            continue;
        };
        if seen.insert(k) {
            merged.push(candidate);
        }
    }
    merged
}

/// One step of a fallback chain.
pub type Extractor<'a, T> = Box<dyn Fn() -> Option<T> + 'a>;

pub fn step<'a, T>(
    origin: Provenance,
    extract: impl Fn() -> Option<T> + 'a,
) -> (Provenance, Extractor<'a, T>) {
    (origin, Box::new(extract))
}

/// Runs `chain` in order and returns the first value produced, tagged with
/// the provenance of the step that produced it.
pub fn first_present<T>(chain: Vec<(Provenance, Extractor<'_, T>)>) -> Sourced<T> {
    for (origin, extract) in chain {
        if let Some(value) = extract() {
            return Sourced::present(value, origin);
        }
    }
    Sourced::Absent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::ptr_arg)]
    fn lower(s: &String) -> Option<String> {
        Some(s.to_lowercase())
    }

    #[test]
    fn higher_priority_origin_takes_primary_slot() {
        let merged = merge_ranked(
            vec![
                Candidate::new("b@x.com".to_string(), Provenance::FooterText),
                Candidate::new("a@x.com".to_string(), Provenance::StructuredData),
            ],
            &CONTACT_PRIORITY,
            5,
            lower,
        );
        assert_eq!(merged[0].value, "a@x.com");
        assert_eq!(merged[0].origin, Provenance::StructuredData);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn duplicate_keys_keep_the_higher_priority_entry() {
        let merged = merge_ranked(
            vec![
                Candidate::new("INFO@x.com".to_string(), Provenance::BodyTextRegex),
                Candidate::new("info@x.com".to_string(), Provenance::AnchorTarget),
            ],
            &CONTACT_PRIORITY,
            5,
            lower,
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].origin, Provenance::AnchorTarget);
    }

    #[test]
    fn cap_and_invalid_keys() {
        let candidates = (0..8)
            .map(|i| Candidate::new(i.to_string(), Provenance::HeaderText))
            .collect();
        let merged = merge_ranked(candidates, &CONTACT_PRIORITY, 5, |v: &String| {
            (v != "0").then(|| v.clone())
        });
        assert_eq!(merged.len(), 5);
        assert_eq!(merged[0].value, "1");
    }

    #[test]
    fn first_present_tags_the_winning_step() {
        let got = first_present(vec![
            step(Provenance::JsonldOrganization, || None),
            step(Provenance::SiteNameMeta, || Some("Empire")),
            step(Provenance::HtmlTitle, || Some("Title")),
        ]);
        assert_eq!(got, Sourced::present("Empire", Provenance::SiteNameMeta));
        assert_eq!(first_present::<u8>(Vec::new()), Sourced::Absent);
    }
}
