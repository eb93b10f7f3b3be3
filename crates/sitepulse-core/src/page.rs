//! Crawler page records. Owned by the crawler; read-only to the engine.

use serde::{Deserialize, Serialize};

/// One crawled page of the target site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    pub url: String,
    pub normalized_url: String,
    /// Crawler-assigned page type. Frequently wrong or missing.
    pub page_type: Option<String>,
    pub title: Option<String>,
    /// `og:site_name` (or equivalent) metadata.
    pub site_name: Option<String>,
    pub headings: Headings,
    pub word_count: u32,
    /// Raw JSON-LD blocks as parsed by the crawler.
    pub structured_data: Vec<serde_json::Value>,
    pub cta_candidates: Vec<CtaCandidate>,
    pub forms: Vec<DetectedForm>,
    pub trust_phrases: Vec<TrustPhrase>,
    pub brand_assets: Vec<BrandAssetCandidate>,
    pub text_snippet: Option<String>,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    /// Anchor hrefs found on the page.
    pub links: Vec<String>,
    /// Service names an upstream extractor already pulled out of the page.
    pub services_list: Vec<String>,
    pub content_hash: Option<String>,
}

impl PageRecord {
    /// The normalized URL when the crawler supplied one, else the raw URL.
    #[must_use]
    pub fn canonical_url(&self) -> &str {
        if self.normalized_url.trim().is_empty() {
            &self.url
        } else {
            &self.normalized_url
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h6: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    Tel,
    Mailto,
    Internal,
    External,
    #[default]
    None,
}

/// A clickable element the crawler considered a possible call to action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaCandidate {
    pub text: String,
    pub target: LinkTarget,
    pub href: Option<String>,
    pub above_fold_desktop: bool,
    pub above_fold_mobile: bool,
    pub in_nav: bool,
    /// Tag/class hint from the DOM, e.g. `"a.btn.btn-primary"`.
    pub dom_context: Option<String>,
    /// Intent tag assigned upstream, if any.
    pub intent: Option<String>,
}

impl CtaCandidate {
    #[must_use]
    pub fn above_fold(&self) -> bool {
        self.above_fold_desktop || self.above_fold_mobile
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedForm {
    /// Field names or labels, in DOM order.
    pub fields: Vec<String>,
    /// Purpose hint from the crawler (`contact`, `search`, `newsletter`, ...).
    pub purpose: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustPhrase {
    pub text: String,
    /// Crawler-side classification, if it made one.
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    JsonldLogo,
    HeaderImage,
    OgImage,
    SiteIcon,
    #[default]
    #[serde(other)]
    Image,
}

/// An image the crawler thinks might be the brand logo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandAssetCandidate {
    pub url: String,
    pub source: AssetSource,
    /// Crawler-assigned ranking; higher is more logo-like.
    pub priority: i32,
    pub width: Option<u32>,
    pub height: Option<u32>,
}
