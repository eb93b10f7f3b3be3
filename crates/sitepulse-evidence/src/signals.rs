//! Raw site statistics for the health scorer.
//!
//! Upstream analysis values pass straight through. Where upstream analysis
//! did not run, trust level, UX score and friction are derived from the
//! evidence pack so every axis has something to score.

use std::collections::HashSet;

use sitepulse_core::{
    AuditJob, CtaIntent, EvidencePack, FrictionLevel, PageRecord, PageStat, SiteSignals,
    TrustEvidence, TrustKind, TrustLevel,
};

use crate::pages::{is_home, PageClassifier};
use crate::text::{content_hash, count_occurrences};

const UX_BASE: f64 = 30.0;
const UX_PRIMARY_CTA: f64 = 25.0;
const UX_PHONE: f64 = 15.0;
const UX_FORM: f64 = 15.0;
const UX_DIRECT_INTENT: f64 = 15.0;

const STRONG_TRUST_KINDS: usize = 3;

/// `strong` with three or more distinct kinds of evidence, `ok` with at
/// least one, `weak` otherwise. `other` does not count.
#[must_use]
pub fn derive_trust_level(evidence: &[TrustEvidence]) -> TrustLevel {
    let kinds: HashSet<TrustKind> = evidence
        .iter()
        .map(|e| e.kind)
        .filter(|k| *k != TrustKind::Other)
        .collect();
    match kinds.len() {
        n if n >= STRONG_TRUST_KINDS => TrustLevel::Strong,
        0 => TrustLevel::Weak,
        _ => TrustLevel::Ok,
    }
}

/// A 0–100 UX estimate from conversion-path evidence.
#[must_use]
pub fn derive_ux_score(pack: &EvidencePack) -> f64 {
    let primary = pack.cta_map.primary.value();
    let mut score = UX_BASE;
    if primary.is_some() {
        score += UX_PRIMARY_CTA;
    }
    if !pack.company_profile.phones.is_empty() {
        score += UX_PHONE;
    }
    if pack.contact_form.contact_form_detected {
        score += UX_FORM;
    }
    if primary.is_some_and(|p| p.intent != CtaIntent::Contact) {
        score += UX_DIRECT_INTENT;
    }
    score.min(100.0)
}

#[must_use]
pub fn derive_friction(pack: &EvidencePack) -> FrictionLevel {
    if !pack.cta_map.primary.is_present() {
        FrictionLevel::High
    } else if pack.company_profile.phones.is_empty() && !pack.contact_form.contact_form_detected {
        FrictionLevel::Medium
    } else {
        FrictionLevel::Low
    }
}

fn page_stat(page: &PageRecord, classifier: PageClassifier<'_>) -> PageStat {
    let hash = page
        .content_hash
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map_or_else(
            || content_hash(page.title.as_deref(), page.text_snippet.as_deref()),
            str::to_string,
        );
    PageStat {
        url: page.canonical_url().to_string(),
        role: classifier.classify(page),
        word_count: page.word_count,
        content_hash: hash,
    }
}

fn city_mentions(pages: &[&PageRecord], city: &str) -> u32 {
    let total: usize = pages
        .iter()
        .map(|p| {
            let h = &p.headings;
            p.title
                .iter()
                .chain(&h.h1)
                .chain(&h.h2)
                .chain(&h.h3)
                .chain(p.text_snippet.iter())
                .map(|text| count_occurrences(text, city))
                .sum::<usize>()
        })
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Collects page statistics and resolves analysis inputs for scoring.
#[must_use]
pub fn collect_signals(
    job: &AuditJob,
    pages: &[&PageRecord],
    classifier: PageClassifier<'_>,
    pack: &EvidencePack,
) -> SiteSignals {
    let (city_mentions, city_in_h1) = match job.city() {
        Some(city) => {
            let city_lower = city.to_lowercase();
            let in_h1 = pages.first().filter(|p| is_home(p)).is_some_and(|home| {
                home.headings
                    .h1
                    .iter()
                    .any(|h| h.to_lowercase().contains(&city_lower))
            });
            (city_mentions(pages, city), in_h1)
        }
        None => (0, false),
    };

    let analysis = job.analysis.clone().unwrap_or_default();
    let signals = SiteSignals {
        pages: pages.iter().map(|p| page_stat(p, classifier)).collect(),
        city_mentions,
        city_in_h1,
        mobile_score: analysis.mobile_score,
        clarity_score: analysis.clarity_score,
        mobile_issues: analysis.mobile_issues,
        trust_level: Some(
            analysis
                .trust_level
                .unwrap_or_else(|| derive_trust_level(&pack.trust)),
        ),
        ux_score: Some(analysis.ux_score.unwrap_or_else(|| derive_ux_score(pack))),
        friction_level: Some(
            analysis
                .friction_level
                .unwrap_or_else(|| derive_friction(pack)),
        ),
        local_factors: analysis.local_factors,
    };
    tracing::debug!(
        pages = signals.pages.len(),
        city_mentions = signals.city_mentions,
        city_in_h1 = signals.city_in_h1,
        "collected site signals"
    );
    signals
}
