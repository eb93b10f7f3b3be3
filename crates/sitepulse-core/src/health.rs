//! Health snapshot types and the raw site statistics the scorer consumes.

use serde::{Deserialize, Serialize};

use crate::job::{FactorSet, FrictionLevel, TrustLevel};

/// Current scoring-algorithm version. A stored snapshot with any other
/// version string is recomputed rather than reused.
pub const HEALTH_SNAPSHOT_VERSION: &str = "health_snapshot_v2";

/// Score below which an axis is `critical`.
pub const CRITICAL_BELOW: u8 = 35;
/// Score below which an axis is `warning`.
pub const WARNING_BELOW: u8 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    Home,
    Services,
    About,
    Faq,
    Pricing,
    Blog,
    Gallery,
    Locations,
    Contact,
    Legal,
    Other,
}

impl PageRole {
    /// Parses a crawler label. Unknown or generic labels return `None` so the
    /// caller falls back to token classification.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "home" | "homepage" | "index" => Some(PageRole::Home),
            "services" | "service" => Some(PageRole::Services),
            "about" | "about_us" => Some(PageRole::About),
            "faq" | "faqs" => Some(PageRole::Faq),
            "pricing" | "prices" => Some(PageRole::Pricing),
            "blog" | "news" => Some(PageRole::Blog),
            "gallery" | "portfolio" => Some(PageRole::Gallery),
            "locations" | "service_area" | "service_areas" => Some(PageRole::Locations),
            "contact" | "contact_us" => Some(PageRole::Contact),
            "legal" | "privacy" | "terms" => Some(PageRole::Legal),
            _ => None,
        }
    }
}

/// Per-page statistics used by the content axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStat {
    pub url: String,
    pub role: PageRole,
    pub word_count: u32,
    pub content_hash: String,
}

/// Raw page statistics and upstream analysis results, already resolved to
/// the shapes the scorer needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSignals {
    pub pages: Vec<PageStat>,
    pub city_mentions: u32,
    pub city_in_h1: bool,
    pub mobile_score: Option<f64>,
    pub clarity_score: Option<f64>,
    pub mobile_issues: Vec<String>,
    pub trust_level: Option<TrustLevel>,
    pub ux_score: Option<f64>,
    pub friction_level: Option<FrictionLevel>,
    /// Precomputed local factors; when `None` the scorer derives them.
    pub local_factors: Option<FactorSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKey {
    LocalSeo,
    GeoSignals,
    Content,
    Design,
    Trust,
    Conversion,
}

impl AxisKey {
    pub const ALL: [AxisKey; 6] = [
        AxisKey::LocalSeo,
        AxisKey::GeoSignals,
        AxisKey::Content,
        AxisKey::Design,
        AxisKey::Trust,
        AxisKey::Conversion,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AxisKey::LocalSeo => "Local SEO",
            AxisKey::GeoSignals => "Geo Signals",
            AxisKey::Content => "Content Depth",
            AxisKey::Design => "Design & Mobile",
            AxisKey::Trust => "Trust Signals",
            AxisKey::Conversion => "Conversion Path",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Critical,
    Warning,
    Good,
}

impl StatusTier {
    /// Fixed thresholds shared by every axis: `< 35` critical, `< 65` warning.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score < CRITICAL_BELOW {
            StatusTier::Critical
        } else if score < WARNING_BELOW {
            StatusTier::Warning
        } else {
            StatusTier::Good
        }
    }

    #[must_use]
    pub fn text_class(self) -> &'static str {
        match self {
            StatusTier::Critical => "text-red-600",
            StatusTier::Warning => "text-amber-600",
            StatusTier::Good => "text-emerald-600",
        }
    }

    #[must_use]
    pub fn bar_class(self) -> &'static str {
        match self {
            StatusTier::Critical => "bg-red-500",
            StatusTier::Warning => "bg-amber-500",
            StatusTier::Good => "bg-emerald-500",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetric {
    pub key: AxisKey,
    pub label: String,
    pub score: u8,
    pub status: StatusTier,
    pub text_class: String,
    pub bar_class: String,
    pub note: String,
}

impl HealthMetric {
    #[must_use]
    pub fn new(key: AxisKey, score: u8, note: impl Into<String>) -> Self {
        let status = StatusTier::from_score(score);
        Self {
            key,
            label: key.label().to_string(),
            score,
            status,
            text_class: status.text_class().to_string(),
            bar_class: status.bar_class().to_string(),
            note: note.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub version: String,
    pub title: String,
    pub metrics: Vec<HealthMetric>,
}

impl HealthSnapshot {
    /// `true` when this snapshot was produced by the current scoring version.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.version == HEALTH_SNAPSHOT_VERSION
    }

    #[must_use]
    pub fn metric(&self, key: AxisKey) -> Option<&HealthMetric> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_thresholds() {
        assert_eq!(StatusTier::from_score(0), StatusTier::Critical);
        assert_eq!(StatusTier::from_score(34), StatusTier::Critical);
        assert_eq!(StatusTier::from_score(35), StatusTier::Warning);
        assert_eq!(StatusTier::from_score(64), StatusTier::Warning);
        assert_eq!(StatusTier::from_score(65), StatusTier::Good);
        assert_eq!(StatusTier::from_score(100), StatusTier::Good);
    }

    #[test]
    fn tier_is_monotonic_in_score() {
        for s in 0..100_u8 {
            assert!(StatusTier::from_score(s) <= StatusTier::from_score(s + 1));
        }
    }

    #[test]
    fn metric_carries_classes_for_its_tier() {
        let m = HealthMetric::new(AxisKey::Trust, 20, "weak");
        assert_eq!(m.status, StatusTier::Critical);
        assert_eq!(m.bar_class, "bg-red-500");
        assert_eq!(m.label, "Trust Signals");
    }

    #[test]
    fn page_role_generic_labels_fall_through() {
        assert_eq!(PageRole::from_label("Services"), Some(PageRole::Services));
        assert_eq!(PageRole::from_label("page"), None);
        assert_eq!(PageRole::from_label(""), None);
    }
}
