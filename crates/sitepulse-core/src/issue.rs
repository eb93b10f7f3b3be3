//! Detected issues and the severity-partitioned backlog.

use serde::{Deserialize, Serialize};

/// An issue as produced by a detection heuristic, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawIssue {
    pub title: String,
    /// Free-form severity label (`blocker`, `high`, `medium`, `low`, ...).
    pub severity: String,
    pub impact: String,
    pub fix: String,
    pub category: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Opportunity,
}

impl Severity {
    /// Maps a free-form label onto exactly three buckets.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" | "blocker" | "high" => Severity::Critical,
            "medium" | "warning" => Severity::Warning,
            _ => Severity::Opportunity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub impact: String,
    pub fix: String,
    pub severity: Severity,
    pub category: String,
    pub source: String,
}

impl From<RawIssue> for Issue {
    fn from(raw: RawIssue) -> Self {
        Self {
            severity: Severity::from_label(&raw.severity),
            title: raw.title.trim().to_string(),
            impact: raw.impact,
            fix: raw.fix,
            category: raw.category,
            source: raw.source,
        }
    }
}

/// Per-bucket list caps for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogCaps {
    pub critical: usize,
    pub warning: usize,
    pub opportunity: usize,
}

impl Default for BacklogCaps {
    fn default() -> Self {
        Self {
            critical: 6,
            warning: 9,
            opportunity: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogCounts {
    pub critical: usize,
    pub warning: usize,
    pub opportunity: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlog {
    pub counts: BacklogCounts,
    pub critical: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub opportunities: Vec<Issue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_buckets() {
        for label in ["critical", "Blocker", " HIGH "] {
            assert_eq!(Severity::from_label(label), Severity::Critical);
        }
        for label in ["medium", "Warning"] {
            assert_eq!(Severity::from_label(label), Severity::Warning);
        }
        for label in ["low", "info", "", "opportunity", "nice-to-have"] {
            assert_eq!(Severity::from_label(label), Severity::Opportunity);
        }
    }

    #[test]
    fn raw_issue_conversion_trims_title() {
        let issue = Issue::from(RawIssue {
            title: "  No phone number  ".to_string(),
            severity: "high".to_string(),
            ..RawIssue::default()
        });
        assert_eq!(issue.title, "No phone number");
        assert_eq!(issue.severity, Severity::Critical);
    }
}
