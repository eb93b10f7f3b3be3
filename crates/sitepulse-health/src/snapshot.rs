//! Health snapshot assembly and the stored-snapshot version guard.

use sitepulse_core::{EvidencePack, HealthMetric, HealthSnapshot, SiteSignals, HEALTH_SNAPSHOT_VERSION};

use crate::axes;
use crate::factors::resolve_factors;

pub const SNAPSHOT_TITLE: &str = "Website Health Snapshot";

/// Scores all six axes in display order.
#[must_use]
pub fn score(pack: &EvidencePack, signals: &SiteSignals) -> [HealthMetric; 6] {
    let factors = resolve_factors(pack, signals);
    [
        axes::local_seo(&factors),
        axes::geo_signals(&factors, pack, signals),
        axes::content(signals),
        axes::design(signals),
        axes::trust(signals),
        axes::conversion(pack, signals),
    ]
}

#[must_use]
pub fn build_snapshot(pack: &EvidencePack, signals: &SiteSignals) -> HealthSnapshot {
    let metrics = score(pack, signals);
    tracing::debug!(
        scores = ?metrics.iter().map(|m| m.score).collect::<Vec<_>>(),
        "scored health axes"
    );
    HealthSnapshot {
        version: HEALTH_SNAPSHOT_VERSION.to_string(),
        title: SNAPSHOT_TITLE.to_string(),
        metrics: metrics.into(),
    }
}

/// Reuses `stored` only when it was produced by the current scoring
/// version; anything else is recomputed from the evidence.
#[must_use]
pub fn snapshot_or_recompute(
    stored: Option<HealthSnapshot>,
    pack: &EvidencePack,
    signals: &SiteSignals,
) -> HealthSnapshot {
    match stored {
        Some(snapshot) if snapshot.is_current() => snapshot,
        Some(snapshot) => {
            tracing::info!(
                stored_version = %snapshot.version,
                current_version = HEALTH_SNAPSHOT_VERSION,
                "stored health snapshot is stale, recomputing"
            );
            build_snapshot(pack, signals)
        }
        None => build_snapshot(pack, signals),
    }
}

#[cfg(test)]
mod tests {
    use sitepulse_core::AxisKey;

    use super::*;

    #[test]
    fn snapshot_has_six_axes_in_order() {
        let snapshot = build_snapshot(&EvidencePack::default(), &SiteSignals::default());
        assert!(snapshot.is_current());
        assert_eq!(snapshot.title, SNAPSHOT_TITLE);
        let keys: Vec<AxisKey> = snapshot.metrics.iter().map(|m| m.key).collect();
        assert_eq!(keys, AxisKey::ALL.to_vec());
    }

    #[test]
    fn scoring_is_idempotent() {
        let signals = SiteSignals {
            city_mentions: 4,
            mobile_score: Some(72.0),
            ux_score: Some(55.0),
            ..SiteSignals::default()
        };
        let pack = EvidencePack::default();
        assert_eq!(score(&pack, &signals), score(&pack, &signals));
    }

    #[test]
    fn current_snapshot_is_reused_and_stale_one_recomputed() {
        let pack = EvidencePack::default();
        let signals = SiteSignals::default();

        let mut stored = build_snapshot(&pack, &signals);
        stored.title = "Kept".to_string();
        let reused = snapshot_or_recompute(Some(stored.clone()), &pack, &signals);
        assert_eq!(reused.title, "Kept");

        stored.version = "health_snapshot_v1".to_string();
        let fresh = snapshot_or_recompute(Some(stored), &pack, &signals);
        assert_eq!(fresh.title, SNAPSHOT_TITLE);
        assert_eq!(fresh.version, HEALTH_SNAPSHOT_VERSION);
    }
}
