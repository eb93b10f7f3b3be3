//! Per-job input: target business metadata, crawled pages, upstream analysis.

use serde::{Deserialize, Serialize};

use crate::page::PageRecord;
use crate::CoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditJob {
    pub niche: Option<String>,
    pub city: Option<String>,
    pub base_url: String,
    pub pages: Vec<PageRecord>,
    pub screenshots: ScreenshotBundle,
    pub analysis: Option<UpstreamAnalysis>,
}

impl AuditJob {
    /// Returns the trimmed niche.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingRequiredInput`] when the niche is absent or
    /// blank. This is the only condition that aborts a whole computation.
    pub fn require_niche(&self) -> Result<&str, CoreError> {
        self.niche
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(CoreError::MissingRequiredInput { field: "niche" })
    }

    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Screenshot reference paths. Content is opaque; only presence matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotBundle {
    pub above_fold: Option<String>,
    pub fullpage: Option<String>,
}

/// Results of upstream page analysis, when it ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamAnalysis {
    pub mobile_score: Option<f64>,
    pub clarity_score: Option<f64>,
    pub mobile_issues: Vec<String>,
    pub trust_level: Option<TrustLevel>,
    pub ux_score: Option<f64>,
    pub friction_level: Option<FrictionLevel>,
    pub local_factors: Option<FactorSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    Strong,
    Ok,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrictionLevel {
    Low,
    Medium,
    High,
}

/// Whether a local-factor set was computed by the current template scorer
/// or carried over from a legacy audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorOrigin {
    Template,
    #[default]
    Legacy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorSet {
    pub origin: FactorOrigin,
    pub factors: Vec<LocalFactor>,
}

/// One weighted local-search factor: `earned` out of `weight` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalFactor {
    pub key: String,
    pub label: String,
    pub weight: f64,
    pub earned: f64,
    /// Counts toward the Geo Signals axis as well as Local SEO.
    #[serde(default)]
    pub geo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_niche_rejects_missing() {
        let job = AuditJob::default();
        let err = job.require_niche().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot generate without required niche field"
        );
    }

    #[test]
    fn require_niche_rejects_blank() {
        let job = AuditJob {
            niche: Some("   ".to_string()),
            ..AuditJob::default()
        };
        assert!(matches!(
            job.require_niche(),
            Err(CoreError::MissingRequiredInput { field: "niche" })
        ));
    }

    #[test]
    fn require_niche_trims() {
        let job = AuditJob {
            niche: Some(" plumbing ".to_string()),
            ..AuditJob::default()
        };
        assert_eq!(job.require_niche().unwrap(), "plumbing");
    }

    #[test]
    fn untagged_factor_set_defaults_to_legacy() {
        let set: FactorSet = serde_json::from_str(r#"{"factors": []}"#).unwrap();
        assert_eq!(set.origin, FactorOrigin::Legacy);
    }
}
