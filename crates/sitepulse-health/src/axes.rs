//! The six health axes.
//!
//! Each function returns a finished [`HealthMetric`]: score clamped to
//! `[0, 100]`, status tier assigned, and a one-line note explaining the
//! number.

use std::collections::{HashMap, HashSet};

use sitepulse_core::{
    AxisKey, EvidencePack, FactorOrigin, FactorSet, FrictionLevel, HealthMetric, PageRole,
    PageStat, SiteSignals, TrustLevel,
};

use crate::calibration::{
    bounded, final_score, reality_adjust, GEO_FEW_MENTIONS_BELOW, GEO_FEW_MENTIONS_PENALTY,
    GEO_NO_MENTIONS_PENALTY, GEO_NO_SCHEMA_PENALTY, GEO_NO_SERVICE_AREA_PENALTY,
};
use crate::factors::earned_percent;

// Content coverage points per page role.
const COVERAGE_SERVICES: f64 = 18.0;
const COVERAGE_ABOUT: f64 = 8.0;
const COVERAGE_LOCATIONS: f64 = 8.0;
const COVERAGE_MINOR: f64 = 4.0;
const COVERAGE_CAP: f64 = 40.0;

/// `(upper word-count bound, points)`; the last band is open-ended.
const HOME_BANDS: [(u32, f64); 4] = [(150, 8.0), (300, 11.0), (600, 14.0), (1000, 17.0)];
const HOME_TOP_BAND: f64 = 20.0;
const SERVICES_BANDS: [(u32, f64); 4] = [(200, 2.0), (400, 5.0), (700, 9.0), (1200, 12.0)];
const SERVICES_TOP_BAND: f64 = 15.0;

const RICH_PAGE_WORDS: u32 = 350;
const RICH_BONUS_CAP: usize = 5;

const DUPLICATE_MIN_PAGES: usize = 10;
const DUPLICATE_SCALE: f64 = 40.0;
const DUPLICATE_CAP: f64 = 12.0;
const THIN_PAGE_WORDS: u32 = 180;
const THIN_SCALE: f64 = 20.0;
const THIN_CAP: f64 = 10.0;
const CONTENT_PENALTY_CAP: f64 = 18.0;

const DESIGN_BASELINE: f64 = 35.0;
const MOBILE_WEIGHT: f64 = 0.6;
const CLARITY_WEIGHT: f64 = 0.4;
const MOBILE_ISSUE_PENALTY: f64 = 6.0;
const MOBILE_ISSUE_CAP: usize = 3;

const UX_WEIGHT: f64 = 0.65;
const CONVERSION_BASE: f64 = 25.0;

/// Weighted share of all local factors.
#[must_use]
pub fn local_seo(factors: &FactorSet) -> HealthMetric {
    let raw = earned_percent(&factors.factors);
    let missing: Vec<&str> = factors
        .factors
        .iter()
        .filter(|f| f.earned <= 0.0)
        .map(|f| f.label.as_str())
        .collect();
    let note = if missing.is_empty() {
        "All tracked local factors present".to_string()
    } else {
        format!("Missing: {}", missing.join(", "))
    };
    HealthMetric::new(AxisKey::LocalSeo, final_score(reality_adjust(raw)), note)
}

/// Geo-only factor share. Legacy factor sets also take the explicit geo
/// penalties; template sets already price those gaps into their factors.
#[must_use]
pub fn geo_signals(factors: &FactorSet, pack: &EvidencePack, signals: &SiteSignals) -> HealthMetric {
    let raw = earned_percent(factors.factors.iter().filter(|f| f.geo));
    let mut score = reality_adjust(raw);

    if factors.origin == FactorOrigin::Legacy {
        if signals.city_mentions < GEO_FEW_MENTIONS_BELOW {
            score -= GEO_FEW_MENTIONS_PENALTY;
        }
        if signals.city_mentions == 0 {
            score -= GEO_NO_MENTIONS_PENALTY;
        }
        if !pack.structured_data.has_local_business {
            score -= GEO_NO_SCHEMA_PENALTY;
        }
        if pack.services.service_areas.is_empty() {
            score -= GEO_NO_SERVICE_AREA_PENALTY;
        }
    }

    let note = format!(
        "City mentioned {} time{}; {} in main heading",
        signals.city_mentions,
        if signals.city_mentions == 1 { "" } else { "s" },
        if signals.city_in_h1 { "shown" } else { "not shown" },
    );
    HealthMetric::new(AxisKey::GeoSignals, final_score(score), note)
}

fn band(words: u32, bands: &[(u32, f64)], top: f64) -> f64 {
    bands
        .iter()
        .find(|(below, _)| words < *below)
        .map_or(top, |(_, points)| *points)
}

fn coverage(roles: &HashSet<PageRole>) -> f64 {
    let points: f64 = roles
        .iter()
        .map(|role| match role {
            PageRole::Services => COVERAGE_SERVICES,
            PageRole::About => COVERAGE_ABOUT,
            PageRole::Locations => COVERAGE_LOCATIONS,
            PageRole::Faq | PageRole::Pricing | PageRole::Blog | PageRole::Gallery => {
                COVERAGE_MINOR
            }
            PageRole::Home | PageRole::Contact | PageRole::Legal | PageRole::Other => 0.0,
        })
        .sum();
    points.min(COVERAGE_CAP)
}

#[allow(clippy::cast_precision_loss)]
fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn duplicate_penalty(pages: &[PageStat]) -> f64 {
    if pages.len() < DUPLICATE_MIN_PAGES {
        return 0.0;
    }
    let mut by_hash: HashMap<&str, usize> = HashMap::new();
    for page in pages {
        *by_hash.entry(page.content_hash.as_str()).or_default() += 1;
    }
    let shared = pages
        .iter()
        .filter(|p| by_hash.get(p.content_hash.as_str()).copied().unwrap_or(0) > 1)
        .count();
    (fraction(shared, pages.len()) * DUPLICATE_SCALE).min(DUPLICATE_CAP)
}

fn thin_penalty(pages: &[PageStat]) -> f64 {
    let thin = pages
        .iter()
        .filter(|p| p.word_count < THIN_PAGE_WORDS)
        .count();
    (fraction(thin, pages.len()) * THIN_SCALE).min(THIN_CAP)
}

/// Page coverage and depth, reality-adjusted before the duplicate and thin
/// page penalties. Independent of CTA, contact and trust evidence.
#[must_use]
pub fn content(signals: &SiteSignals) -> HealthMetric {
    let pages = &signals.pages;
    let roles: HashSet<PageRole> = pages.iter().map(|p| p.role).collect();

    let home = pages
        .iter()
        .find(|p| p.role == PageRole::Home)
        .map_or(0.0, |p| band(p.word_count, &HOME_BANDS, HOME_TOP_BAND));
    let services = pages
        .iter()
        .filter(|p| p.role == PageRole::Services)
        .map(|p| p.word_count)
        .max()
        .map_or(0.0, |words| band(words, &SERVICES_BANDS, SERVICES_TOP_BAND));
    let rich = pages
        .iter()
        .filter(|p| !matches!(p.role, PageRole::Home | PageRole::Contact | PageRole::Legal))
        .filter(|p| p.word_count >= RICH_PAGE_WORDS)
        .count()
        .min(RICH_BONUS_CAP);
    let penalty = (duplicate_penalty(pages) + thin_penalty(pages)).min(CONTENT_PENALTY_CAP);

    #[allow(clippy::cast_precision_loss)]
    let raw = coverage(&roles) + home + services + rich as f64;

    let note = format!(
        "{} page{} analyzed; services page {}",
        pages.len(),
        if pages.len() == 1 { "" } else { "s" },
        if roles.contains(&PageRole::Services) { "found" } else { "missing" },
    );
    HealthMetric::new(AxisKey::Content, final_score(reality_adjust(raw) - penalty), note)
}

/// Mobile and clarity sub-scores, each reality-adjusted, blended 60/40.
#[must_use]
pub fn design(signals: &SiteSignals) -> HealthMetric {
    let mobile = signals.mobile_score.map(|s| reality_adjust(bounded(s)));
    let clarity = signals.clarity_score.map(|s| reality_adjust(bounded(s)));
    let base = match (mobile, clarity) {
        (Some(m), Some(c)) => m * MOBILE_WEIGHT + c * CLARITY_WEIGHT,
        (Some(only), None) | (None, Some(only)) => only,
        (None, None) => DESIGN_BASELINE,
    };
    let issues = signals.mobile_issues.len().min(MOBILE_ISSUE_CAP);
    #[allow(clippy::cast_precision_loss)]
    let score = base - issues as f64 * MOBILE_ISSUE_PENALTY;

    let note = match (mobile, clarity) {
        (None, None) => "No page analysis available; baseline applied".to_string(),
        _ if signals.mobile_issues.is_empty() => "No mobile issues detected".to_string(),
        _ => format!("{} mobile issue(s) detected", signals.mobile_issues.len()),
    };
    HealthMetric::new(AxisKey::Design, final_score(score), note)
}

/// Discrete trust level, reality-adjusted. Unknown counts as weak.
#[must_use]
pub fn trust(signals: &SiteSignals) -> HealthMetric {
    let level = signals.trust_level.unwrap_or(TrustLevel::Weak);
    let (raw, note) = match level {
        TrustLevel::Strong => (70.0, "Strong, varied trust evidence"),
        TrustLevel::Ok => (50.0, "Some trust evidence"),
        TrustLevel::Weak => (25.0, "Little or no trust evidence"),
    };
    HealthMetric::new(AxisKey::Trust, final_score(reality_adjust(raw)), note)
}

fn friction_penalty(level: FrictionLevel) -> f64 {
    match level {
        FrictionLevel::Low => 0.0,
        FrictionLevel::Medium => 12.0,
        FrictionLevel::High => 25.0,
    }
}

/// `ux * 0.65 + (25 - friction)`; not reality-adjusted.
#[must_use]
pub fn conversion(pack: &EvidencePack, signals: &SiteSignals) -> HealthMetric {
    let ux = signals.ux_score.map_or(0.0, bounded);
    let friction = signals.friction_level.unwrap_or(FrictionLevel::High);
    let score = ux * UX_WEIGHT + (CONVERSION_BASE - friction_penalty(friction));

    let note = match pack.cta_map.primary.value() {
        Some(primary) => format!("Primary action: \"{}\"", primary.text),
        None => "No clear primary call to action".to_string(),
    };
    HealthMetric::new(AxisKey::Conversion, final_score(score), note)
}

#[cfg(test)]
#[path = "axes_test.rs"]
mod tests;
