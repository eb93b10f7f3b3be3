//! Evidence normalization for crawled business websites.
//!
//! Merges contact channels from structured data, anchors and free text,
//! resolves a single business identity, elects a primary call to action,
//! classifies pages and extracts the featured-service catalog. The result is
//! a provenance-tagged [`sitepulse_core::EvidencePack`] plus the
//! [`sitepulse_core::SiteSignals`] the health scorer consumes.
//!
//! Every stage is a pure function returning a [`sitepulse_core::Staged`]
//! value: soft gaps become warnings, never errors.

pub mod address;
pub mod contact;
pub mod cta;
pub mod forms;
pub mod hours;
pub mod identity;
pub mod logo;
pub mod merge;
pub mod pack;
pub mod pages;
pub mod services;
pub mod signals;
pub mod social;
pub mod trust;

mod jsonld;
mod text;

pub use cta::{classify_intent, select_primary};
pub use identity::{derive_domain_fallback_name, is_likely_business_name, resolve_name};
pub use logo::resolve_logo;
pub use pack::{build_evidence, EvidenceOutput};
pub use pages::{classify_page_role, PageClassifier};
pub use services::extract_services;
