//! Provenance-tagged evidence values.
//!
//! Every optional evidence field is either [`Sourced::Present`] with the
//! [`Provenance`] that produced it, or [`Sourced::Absent`]. Consumers have to
//! match on both arms; there is no way to carry an untagged guess.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Where a piece of evidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    // Identity
    JsonldOrganization,
    JsonldLocalBusiness,
    SiteNameMeta,
    JsonldWebsite,
    DomainFallback,
    HtmlTitle,

    // Contact channels, highest priority first
    StructuredData,
    AnchorTarget,
    HeaderText,
    FooterText,
    BodyTextRegex,
    SecondaryPageText,

    AddressText,
    AnchorLink,
    GeneratedGeo,
    GeneratedAddress,

    // Logo candidates
    JsonldLogo,
    HeaderImage,
    OgImage,
    SiteIcon,
    PageImage,

    // Services
    OfferCatalog,
    ServicesList,
    HeadingPair,

    AboveFoldCta,
}

impl Provenance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provenance::JsonldOrganization => "jsonld_organization",
            Provenance::JsonldLocalBusiness => "jsonld_local_business",
            Provenance::SiteNameMeta => "site_name_meta",
            Provenance::JsonldWebsite => "jsonld_website",
            Provenance::DomainFallback => "domain_fallback",
            Provenance::HtmlTitle => "html_title",
            Provenance::StructuredData => "structured_data",
            Provenance::AnchorTarget => "anchor_target",
            Provenance::HeaderText => "header_text",
            Provenance::FooterText => "footer_text",
            Provenance::BodyTextRegex => "body_text_regex",
            Provenance::SecondaryPageText => "secondary_page_text",
            Provenance::AddressText => "address_text",
            Provenance::AnchorLink => "anchor_link",
            Provenance::GeneratedGeo => "generated_geo",
            Provenance::GeneratedAddress => "generated_address",
            Provenance::JsonldLogo => "jsonld_logo",
            Provenance::HeaderImage => "header_image",
            Provenance::OgImage => "og_image",
            Provenance::SiteIcon => "site_icon",
            Provenance::PageImage => "page_image",
            Provenance::OfferCatalog => "offer_catalog",
            Provenance::ServicesList => "services_list",
            Provenance::HeadingPair => "heading_pair",
            Provenance::AboveFoldCta => "above_fold_cta",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value with its provenance, or an explicit absence.
///
/// Serializes as `{"value": ..., "source": "..."}` or `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Present { value: T, source: Provenance },
    Absent,
}

impl<T> Default for Sourced<T> {
    fn default() -> Self {
        Sourced::Absent
    }
}

impl<T> Sourced<T> {
    #[must_use]
    pub fn present(value: T, source: Provenance) -> Self {
        Sourced::Present { value, source }
    }

    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Sourced::Present { value, .. } => Some(value),
            Sourced::Absent => None,
        }
    }

    #[must_use]
    pub fn source(&self) -> Option<Provenance> {
        match self {
            Sourced::Present { source, .. } => Some(*source),
            Sourced::Absent => None,
        }
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Sourced::Present { .. })
    }

    pub fn map<U, F>(self, f: F) -> Sourced<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Sourced::Present { value, source } => Sourced::Present {
                value: f(value),
                source,
            },
            Sourced::Absent => Sourced::Absent,
        }
    }

    /// Returns `self` when present, otherwise evaluates `fallback`.
    #[must_use]
    pub fn or_else<F>(self, fallback: F) -> Self
    where
        F: FnOnce() -> Sourced<T>,
    {
        match self {
            Sourced::Present { .. } => self,
            Sourced::Absent => fallback(),
        }
    }
}

impl<T> From<Option<(T, Provenance)>> for Sourced<T> {
    fn from(value: Option<(T, Provenance)>) -> Self {
        match value {
            Some((value, source)) => Sourced::Present { value, source },
            None => Sourced::Absent,
        }
    }
}

#[derive(Serialize)]
struct TaggedRef<'a, T> {
    value: &'a T,
    source: Provenance,
}

#[derive(Deserialize)]
struct Tagged<T> {
    value: T,
    source: Provenance,
}

impl<T: Serialize> Serialize for Sourced<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Sourced::Present { value, source } => serializer.serialize_some(&TaggedRef {
                value,
                source: *source,
            }),
            Sourced::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Sourced<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tagged = Option::<Tagged<T>>::deserialize(deserializer)?;
        Ok(tagged.map_or(Sourced::Absent, |t| Sourced::Present {
            value: t.value,
            source: t.source,
        }))
    }
}
