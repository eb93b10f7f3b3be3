//! Page-role classification.
//!
//! Crawler labels are used when they name a concrete role. Otherwise the URL
//! path and title are tokenized and matched against small fixed token sets,
//! with the niche vocabulary standing in for service words the fixed set
//! cannot know about.

use sitepulse_core::{PageRecord, PageRole};
use url::Url;

use crate::text::{contains_term, tokens};

/// Minimum word count before a page can be called a services page.
pub const SERVICES_MIN_WORDS: u32 = 200;

const LEGAL_TOKENS: &[&str] = &[
    "privacy",
    "terms",
    "policy",
    "disclaimer",
    "accessibility",
    "sitemap",
    "cookie",
    "cookies",
];
const CONTACT_TOKENS: &[&str] = &["contact"];
const ABOUT_TOKENS: &[&str] = &["about", "team", "story", "history", "mission"];
const FAQ_TOKENS: &[&str] = &["faq", "faqs", "questions"];
const PRICING_TOKENS: &[&str] = &["pricing", "prices", "price", "cost", "costs", "rates"];
const BLOG_TOKENS: &[&str] = &["blog", "news", "articles", "article", "tips", "posts"];
const GALLERY_TOKENS: &[&str] = &["gallery", "portfolio", "projects", "photos"];

const SERVICE_ACTION_TOKENS: &[&str] = &[
    "services",
    "service",
    "residential",
    "commercial",
    "emergency",
    "repair",
    "repairs",
    "installation",
    "install",
    "maintenance",
    "replacement",
    "inspection",
    "cleaning",
];

/// Classifies pages for one job's niche.
#[derive(Debug, Clone, Copy)]
pub struct PageClassifier<'a> {
    niche_terms: &'a [String],
}

impl<'a> PageClassifier<'a> {
    #[must_use]
    pub fn new(niche_terms: &'a [String]) -> Self {
        Self { niche_terms }
    }

    #[must_use]
    pub fn classify(&self, page: &PageRecord) -> PageRole {
        classify_page_role(page, self.niche_terms)
    }

    /// `true` when `tokens` contain a service-action word or a niche term.
    #[must_use]
    pub fn has_service_vocabulary(&self, tokens: &[String]) -> bool {
        has_service_vocabulary(tokens, self.niche_terms)
    }
}

fn has_any(tokens: &[String], set: &[&str]) -> bool {
    tokens.iter().any(|t| set.contains(&t.as_str()))
}

fn has(tokens: &[String], word: &str) -> bool {
    tokens.iter().any(|t| t == word)
}

pub(crate) fn has_service_vocabulary(tokens: &[String], niche_terms: &[String]) -> bool {
    has_any(tokens, SERVICE_ACTION_TOKENS) || niche_terms.iter().any(|t| contains_term(tokens, t))
}

/// Path component of `raw`, lowercased, without query or fragment.
pub(crate) fn url_path(raw: &str) -> String {
    match Url::parse(raw.trim()) {
        Ok(url) => url.path().to_lowercase(),
        Err(_) => raw
            .trim()
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase(),
    }
}

fn is_root_path(path: &str) -> bool {
    matches!(
        path.trim_end_matches('/'),
        "" | "/index.html" | "/index.php" | "/home"
    )
}

/// `true` for the site root, by crawler label or by URL path.
#[must_use]
pub fn is_home(page: &PageRecord) -> bool {
    page.page_type.as_deref().and_then(PageRole::from_label) == Some(PageRole::Home)
        || is_root_path(&url_path(page.canonical_url()))
}

/// Pages in a canonical order: home first, then by canonical URL.
///
/// Every extractor walks pages in this order, so results do not depend on
/// the order the crawler happened to emit them in.
#[must_use]
pub fn order_pages(pages: &[PageRecord]) -> Vec<&PageRecord> {
    let mut ordered: Vec<&PageRecord> = pages.iter().collect();
    ordered.sort_by(|a, b| {
        (!is_home(a), a.canonical_url(), a.url.as_str())
            .cmp(&(!is_home(b), b.canonical_url(), b.url.as_str()))
    });
    ordered
}

/// Assigns a [`PageRole`] to `page`.
///
/// A crawler label that maps to a concrete role is trusted as-is. Otherwise
/// legal and contact pages are recognized from the path alone, the
/// informational roles from path and title tokens, and `services` requires
/// both enough words and service vocabulary.
#[must_use]
pub fn classify_page_role(page: &PageRecord, niche_terms: &[String]) -> PageRole {
    if let Some(role) = page.page_type.as_deref().and_then(PageRole::from_label) {
        return role;
    }

    let path = url_path(page.canonical_url());
    if is_root_path(&path) {
        return PageRole::Home;
    }

    let path_tokens = tokens(&path);
    if has_any(&path_tokens, LEGAL_TOKENS) {
        return PageRole::Legal;
    }
    if has_any(&path_tokens, CONTACT_TOKENS) {
        return PageRole::Contact;
    }

    let mut all_tokens = path_tokens;
    all_tokens.extend(tokens(page.title.as_deref().unwrap_or_default()));

    let role = if has_any(&all_tokens, ABOUT_TOKENS) {
        PageRole::About
    } else if has_any(&all_tokens, FAQ_TOKENS) {
        PageRole::Faq
    } else if has_any(&all_tokens, PRICING_TOKENS) {
        PageRole::Pricing
    } else if has_any(&all_tokens, BLOG_TOKENS) {
        PageRole::Blog
    } else if has_any(&all_tokens, GALLERY_TOKENS) {
        PageRole::Gallery
    } else if page.word_count >= SERVICES_MIN_WORDS
        && has_service_vocabulary(&all_tokens, niche_terms)
    {
        PageRole::Services
    } else if is_locations(&all_tokens) {
        PageRole::Locations
    } else {
        PageRole::Other
    };

    tracing::debug!(page = %page.canonical_url(), role = ?role, "classified page by tokens");
    role
}

fn is_locations(tokens: &[String]) -> bool {
    has(tokens, "locations")
        || (has(tokens, "areas") && has(tokens, "served"))
        || (has(tokens, "service") && (has(tokens, "area") || has(tokens, "areas")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, title: &str, words: u32) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: Some(title.to_string()),
            word_count: words,
            ..PageRecord::default()
        }
    }

    fn plumbing() -> Vec<String> {
        ["drain", "sewer", "water heater"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn trusted_label_wins() {
        let mut p = page("https://x.com/drain-cleaning", "Drain Cleaning", 900);
        p.page_type = Some("about".to_string());
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::About);
    }

    #[test]
    fn generic_label_falls_back_to_tokens() {
        let mut p = page("https://x.com/drain-cleaning", "Drain Cleaning", 900);
        p.page_type = Some("page".to_string());
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::Services);
    }

    #[test]
    fn niche_vocabulary_detects_unlabeled_service_pages() {
        let p = page("https://x.com/sewer-line", "Sewer Line Help", 450);
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::Services);
        assert_eq!(classify_page_role(&p, &[]), PageRole::Other);
    }

    #[test]
    fn thin_pages_are_not_services() {
        let p = page("https://x.com/water-heater-repair", "Water Heater Repair", 120);
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::Other);
    }

    #[test]
    fn informational_roles_take_precedence_over_services() {
        let p = page("https://x.com/faq", "Drain Repair Questions", 800);
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::Faq);
        let p = page("https://x.com/about-us", "About Our Repair Team", 800);
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::About);
    }

    #[test]
    fn location_token_pairs() {
        let p = page("https://x.com/areas-we-served", "Areas", 100);
        assert_eq!(classify_page_role(&p, &[]), PageRole::Locations);
        let p = page("https://x.com/service-area", "Where we work", 150);
        assert_eq!(classify_page_role(&p, &[]), PageRole::Locations);
        let p = page("https://x.com/locations", "Our Offices", 800);
        assert_eq!(classify_page_role(&p, &[]), PageRole::Locations);
    }

    #[test]
    fn long_service_area_pages_are_services() {
        let p = page("https://x.com/service-area", "Where we work", 800);
        assert_eq!(classify_page_role(&p, &[]), PageRole::Services);
    }

    #[test]
    fn legal_and_contact_come_from_the_path_only() {
        let p = page("https://x.com/privacy-policy", "Privacy", 600);
        assert_eq!(classify_page_role(&p, &[]), PageRole::Legal);
        let p = page("https://x.com/plumbing", "Contact us for drain repair", 600);
        assert_eq!(classify_page_role(&p, &plumbing()), PageRole::Services);
    }

    #[test]
    fn root_is_home_and_sorts_first() {
        let pages = vec![
            page("https://x.com/b", "B", 10),
            page("https://x.com/", "Home", 10),
            page("https://x.com/a", "A", 10),
        ];
        let ordered: Vec<&str> = order_pages(&pages).iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            ordered,
            vec!["https://x.com/", "https://x.com/a", "https://x.com/b"]
        );
        assert_eq!(classify_page_role(&pages[1], &[]), PageRole::Home);
    }

    #[test]
    fn relative_urls_are_tolerated() {
        assert_eq!(url_path("/Services?x=1#top"), "/services");
    }
}
