//! Domain types shared by the sitepulse evidence and health engines.
//!
//! Nothing in this crate performs I/O beyond the explicit configuration
//! loaders in [`config`] and [`niche`]; every type is plain data.

pub mod config;
pub mod error;
pub mod evidence;
pub mod health;
pub mod issue;
pub mod job;
pub mod niche;
pub mod page;
pub mod sourced;
pub mod warning;

pub use config::{build_engine_config, load_engine_config, EngineConfig};
pub use error::{ConfigError, CoreError};
pub use evidence::{
    Address, ClassifiedCta, CompanyProfile, ContactForm, ContactFormDetection, CtaIntent, CtaMap,
    EmailEntry, EvidencePack, FeaturedService, PhoneEntry, PrimaryCta, ScreenshotsAvailable,
    ServiceCatalog, SocialLink, SocialPlatform, StructuredDataSummary, TrustEvidence, TrustKind,
    EVIDENCE_PACK_VERSION,
};
pub use health::{
    AxisKey, HealthMetric, HealthSnapshot, PageRole, PageStat, SiteSignals, StatusTier,
    HEALTH_SNAPSHOT_VERSION,
};
pub use issue::{Backlog, BacklogCaps, BacklogCounts, Issue, RawIssue, Severity};
pub use job::{
    AuditJob, FactorOrigin, FactorSet, FrictionLevel, LocalFactor, ScreenshotBundle, TrustLevel,
    UpstreamAnalysis,
};
pub use niche::{load_niche_vocabulary, NicheTerms, NicheVocabulary};
pub use page::{
    AssetSource, BrandAssetCandidate, CtaCandidate, DetectedForm, Headings, LinkTarget,
    PageRecord, TrustPhrase,
};
pub use sourced::{Provenance, Sourced};
pub use warning::{DataQualityWarning, Staged, WarningCode, WarningSeverity};
