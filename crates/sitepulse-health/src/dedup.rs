//! Issue canonical keys and duplicate suppression.

use std::collections::HashSet;

use sitepulse_core::Issue;

/// Jaccard similarity at or above which two titles are the same finding.
pub const DEFAULT_NEAR_DUPLICATE_THRESHOLD: f64 = 0.90;

/// Phrase rewrites applied before tokenizing. Longer phrases come first so
/// they win over phrases they contain.
const SYNONYMS: &[(&str, &str)] = &[
    ("google business profile", "gbp"),
    ("google my business", "gbp"),
    ("call-to-action", "cta"),
    ("call to action", "cta"),
    ("click-to-call", "clicktocall"),
    ("click to call", "clicktocall"),
    ("tap-to-call", "clicktocall"),
    ("tap to call", "clicktocall"),
    ("structured data", "schema"),
    ("schema markup", "schema"),
    ("phone number", "phone"),
    ("telephone", "phone"),
    ("web site", "site"),
    ("website", "site"),
    ("e-mail", "email"),
];

/// Normalizes an issue title into its dedup key: lowercase, synonym
/// phrases folded, digit runs replaced by `0`, punctuation dropped,
/// whitespace collapsed.
#[must_use]
pub fn canonicalize(title: &str) -> String {
    let mut text = title.to_lowercase();
    for (phrase, token) in SYNONYMS {
        if text.contains(phrase) {
            text = text.replace(phrase, token);
        }
    }

    let mut out = String::with_capacity(text.len());
    let mut in_digits = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_digits {
                out.push('0');
            }
            in_digits = true;
            continue;
        }
        in_digits = false;
        if c.is_alphanumeric() {
            out.push(c);
        } else if c.is_whitespace() {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn token_set(key: &str) -> HashSet<&str> {
    key.split_whitespace().collect()
}

/// Token-set Jaccard similarity of two canonical keys. Two empty keys are
/// identical.
#[must_use]
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = token_set(a);
    let b = token_set(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 1.0;
    }
    let shared = a.intersection(&b).count();
    #[allow(clippy::cast_precision_loss)]
    let similarity = shared as f64 / union as f64;
    similarity
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeduplicatedIssues {
    pub kept: Vec<Issue>,
    pub dropped_exact: usize,
    pub dropped_near: usize,
}

/// Drops issues whose key matches anything in `already_shown` or an
/// earlier kept issue, then issues too similar to an earlier kept one.
/// The first occurrence always wins, so the output is a fixed point:
/// running it again removes nothing.
#[must_use]
pub fn dedupe(issues: Vec<Issue>, already_shown: &[Issue], threshold: f64) -> DeduplicatedIssues {
    let shown: HashSet<String> = already_shown.iter().map(|i| canonicalize(&i.title)).collect();
    let mut kept_keys: Vec<String> = Vec::new();
    let mut out = DeduplicatedIssues::default();

    for issue in issues {
        let key = canonicalize(&issue.title);
        if shown.contains(&key) || kept_keys.contains(&key) {
            tracing::debug!(title = %issue.title, "dropped exact duplicate issue");
            out.dropped_exact += 1;
            continue;
        }
        if kept_keys.iter().any(|k| jaccard(k, &key) >= threshold) {
            tracing::debug!(title = %issue.title, "dropped near-duplicate issue");
            out.dropped_near += 1;
            continue;
        }
        kept_keys.push(key);
        out.kept.push(issue);
    }
    out
}

/// Picks up to `n` highlight issues: most severe first, input order within
/// a tier, skipping anything that duplicates an earlier pick.
#[must_use]
pub fn select_top_issues(issues: &[Issue], n: usize, threshold: f64) -> Vec<Issue> {
    let mut ordered: Vec<&Issue> = issues.iter().collect();
    ordered.sort_by_key(|i| i.severity);

    let mut picked: Vec<Issue> = Vec::new();
    let mut keys: Vec<String> = Vec::new();
    for issue in ordered {
        if picked.len() == n {
            break;
        }
        let key = canonicalize(&issue.title);
        if keys.iter().any(|k| *k == key || jaccard(k, &key) >= threshold) {
            continue;
        }
        keys.push(key);
        picked.push(issue.clone());
    }
    picked
}
