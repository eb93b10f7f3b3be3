use serde::Serialize;
use sitepulse_core::{Backlog, EngineConfig, EvidencePack, HealthSnapshot, Issue, RawIssue, SiteSignals};

use crate::backlog::{assemble_backlog, normalize_issues};
use crate::dedup::select_top_issues;
use crate::detect::detect_issues;
use crate::snapshot::snapshot_or_recompute;

/// Everything the report renderer needs from the health stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub snapshot: HealthSnapshot,
    pub top_issues: Vec<Issue>,
    pub backlog: Backlog,
}

/// Scores the site (reusing `stored` when current), detects issues, merges
/// them with `extra` issues from other detectors, and splits them into the
/// top-issues highlight and the backlog.
#[must_use]
pub fn build_report(
    pack: &EvidencePack,
    signals: &SiteSignals,
    stored: Option<HealthSnapshot>,
    extra: Vec<RawIssue>,
    config: &EngineConfig,
) -> HealthReport {
    let snapshot = snapshot_or_recompute(stored, pack, signals);
    let mut raw = detect_issues(pack, &snapshot, signals);
    raw.extend(extra);
    let issues = normalize_issues(raw);

    let top_issues = select_top_issues(&issues, config.top_issues, config.near_duplicate_threshold);
    let backlog = assemble_backlog(
        issues,
        &top_issues,
        config.backlog_caps,
        config.near_duplicate_threshold,
    );
    tracing::info!(
        top = top_issues.len(),
        backlog = backlog.counts.total,
        "health report built"
    );
    HealthReport {
        snapshot,
        top_issues,
        backlog,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dedup::canonicalize;

    #[test]
    fn top_issues_never_reappear_in_the_backlog() {
        let config = EngineConfig::default();
        let pack = EvidencePack::default();
        let signals = SiteSignals {
            mobile_issues: vec!["Text too small to read".to_string()],
            ..SiteSignals::default()
        };
        let extra = vec![RawIssue {
            title: "Text too small to read!".to_string(),
            severity: "low".to_string(),
            ..RawIssue::default()
        }];
        let report = build_report(&pack, &signals, None, extra, &config);

        assert!(report.top_issues.len() <= config.top_issues);
        let shown: HashSet<String> = report
            .top_issues
            .iter()
            .map(|i| canonicalize(&i.title))
            .collect();
        for issue in report
            .backlog
            .critical
            .iter()
            .chain(&report.backlog.warnings)
            .chain(&report.backlog.opportunities)
        {
            assert!(!shown.contains(&canonicalize(&issue.title)), "{}", issue.title);
        }
    }
}
