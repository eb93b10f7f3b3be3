//! Command handlers. Each reads its inputs from disk, runs the pipeline and
//! returns the JSON value `main` prints.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sitepulse_core::{AuditJob, EngineConfig, HealthSnapshot, NicheVocabulary, RawIssue};
use sitepulse_evidence::{build_evidence, EvidenceOutput};
use sitepulse_health::{build_report, snapshot_or_recompute};

pub(crate) struct Engine<'a> {
    pub config: &'a EngineConfig,
    pub vocabulary: &'a NicheVocabulary,
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {what} in {}", path.display()))
}

fn read_optional<T: DeserializeOwned>(path: Option<&Path>, what: &str) -> anyhow::Result<Option<T>> {
    path.map(|p| read_json(p, what)).transpose()
}

impl Engine<'_> {
    fn evidence_for(&self, job_path: &Path) -> anyhow::Result<EvidenceOutput> {
        let job: AuditJob = read_json(job_path, "audit job")?;
        let output = build_evidence(&job, self.vocabulary)
            .with_context(|| format!("evidence stage failed for {}", job_path.display()))?;
        tracing::info!(
            job = %job_path.display(),
            pages = job.pages.len(),
            "evidence stage complete"
        );
        Ok(output)
    }

    pub(crate) fn evidence(&self, job_path: &Path) -> anyhow::Result<Value> {
        let output = self.evidence_for(job_path)?;
        Ok(serde_json::to_value(&output.pack)?)
    }

    pub(crate) fn health(&self, job_path: &Path, stored: Option<&Path>) -> anyhow::Result<Value> {
        let output = self.evidence_for(job_path)?;
        let stored: Option<HealthSnapshot> = read_optional(stored, "stored snapshot")?;
        let snapshot = snapshot_or_recompute(stored, &output.pack, &output.signals);
        Ok(serde_json::to_value(&snapshot)?)
    }

    pub(crate) fn backlog(&self, job_path: &Path, issues: Option<&Path>) -> anyhow::Result<Value> {
        let output = self.evidence_for(job_path)?;
        let extra: Vec<RawIssue> = read_optional(issues, "raw issues")?.unwrap_or_default();
        let report = build_report(&output.pack, &output.signals, None, extra, self.config);
        Ok(json!({
            "top_issues": report.top_issues,
            "backlog": report.backlog,
        }))
    }

    pub(crate) fn audit(
        &self,
        job_path: &Path,
        stored: Option<&Path>,
        issues: Option<&Path>,
    ) -> anyhow::Result<Value> {
        let output = self.evidence_for(job_path)?;
        let stored: Option<HealthSnapshot> = read_optional(stored, "stored snapshot")?;
        let extra: Vec<RawIssue> = read_optional(issues, "raw issues")?.unwrap_or_default();
        let report = build_report(&output.pack, &output.signals, stored, extra, self.config);
        Ok(json!({
            "evidence_pack": output.pack,
            "health_snapshot": report.snapshot,
            "top_issues": report.top_issues,
            "backlog": report.backlog,
        }))
    }
}
