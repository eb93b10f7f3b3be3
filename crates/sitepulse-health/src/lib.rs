//! Health scoring, issue detection and backlog assembly.
//!
//! Consumes the Evidence Pack and site signals produced by
//! `sitepulse-evidence`. Everything here is a pure function of its inputs.

pub mod axes;
pub mod backlog;
pub mod calibration;
pub mod dedup;
pub mod detect;
pub mod factors;
pub mod report;
pub mod snapshot;

pub use backlog::{assemble_backlog, normalize_issues};
pub use calibration::{final_score, reality_adjust};
pub use dedup::{
    canonicalize, dedupe, jaccard, select_top_issues, DeduplicatedIssues,
    DEFAULT_NEAR_DUPLICATE_THRESHOLD,
};
pub use detect::detect_issues;
pub use factors::{resolve_factors, template_factors};
pub use report::{build_report, HealthReport};
pub use snapshot::{build_snapshot, score, snapshot_or_recompute};
