//! The Evidence Pack: deduplicated, provenance-tagged business evidence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::page::LinkTarget;
use crate::sourced::{Provenance, Sourced};
use crate::warning::DataQualityWarning;

pub const EVIDENCE_PACK_VERSION: &str = "v2";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidencePack {
    pub company_name: Sourced<String>,
    pub logo_url: Sourced<String>,
    pub company_profile: CompanyProfile,
    pub contact_form: ContactForm,
    pub cta_map: CtaMap,
    pub services: ServiceCatalog,
    pub trust: Vec<TrustEvidence>,
    pub structured_data: StructuredDataSummary,
    pub screenshots_available: ScreenshotsAvailable,
    pub data_quality_warnings: Vec<DataQualityWarning>,
}

#[derive(Serialize)]
struct EvidencePackDocument<'a> {
    company_name: Option<&'a String>,
    company_name_source: Option<Provenance>,
    logo_url: Option<&'a String>,
    logo_source: Option<Provenance>,
    company_profile: &'a CompanyProfile,
    contact_form: &'a ContactForm,
    cta_map: &'a CtaMap,
    services: &'a ServiceCatalog,
    trust: TrustDocument<'a>,
    brand_assets: BrandAssetsDocument<'a>,
    structured_data: &'a StructuredDataSummary,
    data_quality_warnings: &'a [DataQualityWarning],
    screenshots_available: ScreenshotsAvailable,
    version: &'static str,
}

#[derive(Serialize)]
struct TrustDocument<'a> {
    evidence: &'a [TrustEvidence],
}

#[derive(Serialize)]
struct BrandAssetsDocument<'a> {
    detected_logo: Option<&'a String>,
}

impl Serialize for EvidencePack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EvidencePackDocument {
            company_name: self.company_name.value(),
            company_name_source: self.company_name.source(),
            logo_url: self.logo_url.value(),
            logo_source: self.logo_url.source(),
            company_profile: &self.company_profile,
            contact_form: &self.contact_form,
            cta_map: &self.cta_map,
            services: &self.services,
            trust: TrustDocument {
                evidence: &self.trust,
            },
            brand_assets: BrandAssetsDocument {
                detected_logo: self.logo_url.value(),
            },
            structured_data: &self.structured_data,
            data_quality_warnings: &self.data_quality_warnings,
            screenshots_available: self.screenshots_available,
            version: EVIDENCE_PACK_VERSION,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyProfile {
    pub phones: Vec<PhoneEntry>,
    pub emails: Vec<EmailEntry>,
    pub address: Sourced<Address>,
    pub hours: Sourced<String>,
    pub social_links: BTreeMap<SocialPlatform, Vec<SocialLink>>,
}

impl CompanyProfile {
    #[must_use]
    pub fn primary_phone(&self) -> Option<&PhoneEntry> {
        self.phones.first()
    }

    #[must_use]
    pub fn primary_email(&self) -> Option<&EmailEntry> {
        self.emails.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneEntry {
    pub value: String,
    pub source: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailEntry {
    pub address: String,
    pub source: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    /// The original unparsed text, kept when parsing fell short.
    pub raw: Option<String>,
}

impl Address {
    /// Single-line rendering: `street, city, region postal`.
    #[must_use]
    pub fn one_line(&self) -> String {
        let region_postal = [self.region.as_deref(), self.postal_code.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let parts = [
            self.street.clone(),
            self.city.clone(),
            Some(region_postal).filter(|s| !s.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        if parts.is_empty() {
            self.raw.clone().unwrap_or_default()
        } else {
            parts.join(", ")
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_none() && self.city.is_none() && self.region.is_none() && self.raw.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Linkedin,
    Youtube,
    X,
    Tiktok,
    Yelp,
    Nextdoor,
    Map,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub url: String,
    pub source: Provenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFormDetection {
    PurposeLabel,
    FieldHeuristic,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub contact_form_detected: bool,
    pub contact_form_fields_count: usize,
    pub contact_form_fields: Vec<String>,
    pub detection_source: Option<ContactFormDetection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaIntent {
    Call,
    Quote,
    Estimate,
    Schedule,
    Book,
    Contact,
}

impl CtaIntent {
    /// Parses an explicit intent tag; tags outside the allowed set yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "call" => Some(CtaIntent::Call),
            "quote" => Some(CtaIntent::Quote),
            "estimate" => Some(CtaIntent::Estimate),
            "schedule" => Some(CtaIntent::Schedule),
            "book" => Some(CtaIntent::Book),
            "contact" => Some(CtaIntent::Contact),
            _ => None,
        }
    }
}

/// A CTA candidate after intent inference and scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCta {
    pub text: String,
    pub href: Option<String>,
    pub target: LinkTarget,
    pub intent: Option<CtaIntent>,
    pub above_fold: bool,
    pub in_nav: bool,
    pub button_like: bool,
    pub score: i32,
    /// Excluded from primary election (navigation or structural text).
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryCta {
    pub text: String,
    pub href: Option<String>,
    pub target: LinkTarget,
    pub intent: CtaIntent,
    pub score: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CtaMap {
    pub primary: Sourced<PrimaryCta>,
    pub candidates: Vec<ClassifiedCta>,
}

#[derive(Serialize)]
struct CtaMapDocument<'a> {
    primary: Option<&'a PrimaryCta>,
    primary_cta_text: Option<&'a str>,
    primary_cta_source: Option<Provenance>,
    cta_candidates: &'a [ClassifiedCta],
}

impl Serialize for CtaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let primary = self.primary.value();
        CtaMapDocument {
            primary,
            primary_cta_text: primary.map(|p| p.text.as_str()),
            primary_cta_source: self.primary.source(),
            cta_candidates: &self.candidates,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedService {
    pub title: String,
    pub description: Option<String>,
    pub source_page: String,
    pub source: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCatalog {
    pub featured: Vec<FeaturedService>,
    pub other_services: Vec<String>,
    pub service_areas: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustKind {
    License,
    Insured,
    Reviews,
    Rating,
    YearsInBusiness,
    Warranty,
    Award,
    Certification,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustEvidence {
    #[serde(rename = "type")]
    pub kind: TrustKind,
    pub snippet: String,
}

/// What the structured-data blocks told us, independent of which values won.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct StructuredDataSummary {
    pub types: Vec<String>,
    pub has_organization: bool,
    pub has_local_business: bool,
    pub has_aggregate_rating: bool,
    pub has_opening_hours: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScreenshotsAvailable {
    pub above_fold: bool,
    pub fullpage: bool,
}
