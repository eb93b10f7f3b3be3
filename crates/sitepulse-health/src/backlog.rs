//! Severity-partitioned backlog assembly.

use sitepulse_core::{Backlog, BacklogCaps, BacklogCounts, Issue, RawIssue, Severity};

use crate::dedup::dedupe;

/// Normalizes raw detector output. Issues with blank titles are dropped.
#[must_use]
pub fn normalize_issues(raw: Vec<RawIssue>) -> Vec<Issue> {
    raw.into_iter()
        .map(Issue::from)
        .filter(|issue| !issue.title.is_empty())
        .collect()
}

/// Builds the backlog from every detected issue.
///
/// Anything already shown in `top` is removed outright, the rest is
/// deduplicated and split by severity. Counts reflect the full deduplicated
/// set; the lists are cut to `caps`.
#[must_use]
pub fn assemble_backlog(
    issues: Vec<Issue>,
    top: &[Issue],
    caps: BacklogCaps,
    threshold: f64,
) -> Backlog {
    let deduped = dedupe(issues, top, threshold);

    let mut critical = Vec::new();
    let mut warnings = Vec::new();
    let mut opportunities = Vec::new();
    for issue in deduped.kept {
        match issue.severity {
            Severity::Critical => critical.push(issue),
            Severity::Warning => warnings.push(issue),
            Severity::Opportunity => opportunities.push(issue),
        }
    }

    let counts = BacklogCounts {
        critical: critical.len(),
        warning: warnings.len(),
        opportunity: opportunities.len(),
        total: critical.len() + warnings.len() + opportunities.len(),
    };
    critical.truncate(caps.critical);
    warnings.truncate(caps.warning);
    opportunities.truncate(caps.opportunity);

    tracing::debug!(
        total = counts.total,
        dropped_exact = deduped.dropped_exact,
        dropped_near = deduped.dropped_near,
        "assembled backlog"
    );
    Backlog {
        counts,
        critical,
        warnings,
        opportunities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::DEFAULT_NEAR_DUPLICATE_THRESHOLD;

    fn raw(title: &str, severity: &str) -> RawIssue {
        RawIssue {
            title: title.to_string(),
            severity: severity.to_string(),
            ..RawIssue::default()
        }
    }

    #[test]
    fn blank_titles_are_dropped() {
        let issues = normalize_issues(vec![raw("  ", "high"), raw("No phone", "blocker")]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
    }

    #[test]
    fn top_issues_leave_the_backlog_entirely() {
        let issues = normalize_issues(vec![
            raw("No phone number", "high"),
            raw("No primary call to action", "critical"),
            raw("Missing opening hours", "low"),
        ]);
        let top = normalize_issues(vec![raw("No telephone", "high")]);
        let backlog = assemble_backlog(
            issues,
            &top,
            BacklogCaps::default(),
            DEFAULT_NEAR_DUPLICATE_THRESHOLD,
        );
        assert_eq!(backlog.counts.critical, 1);
        assert_eq!(backlog.critical[0].title, "No primary call to action");
        assert_eq!(backlog.counts.opportunity, 1);
        assert_eq!(backlog.counts.total, 2);
    }

    #[test]
    fn counts_are_taken_before_caps() {
        let names = [
            "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
        ];
        let issues = normalize_issues(
            names
                .iter()
                .map(|n| raw(&format!("Warning finding {n}"), "medium"))
                .collect(),
        );
        let caps = BacklogCaps {
            critical: 6,
            warning: 3,
            opportunity: 12,
        };
        let backlog = assemble_backlog(issues, &[], caps, DEFAULT_NEAR_DUPLICATE_THRESHOLD);
        assert_eq!(backlog.counts.warning, 10);
        assert_eq!(backlog.warnings.len(), 3);
        assert_eq!(backlog.warnings[0].title, "Warning finding alpha");
    }
}
