//! Social profile and map links.

use std::collections::BTreeMap;

use sitepulse_core::{Address, PageRecord, Provenance, SocialLink, SocialPlatform};
use url::{form_urlencoded, Url};

use crate::jsonld;

const PLATFORM_HOSTS: &[(&str, SocialPlatform)] = &[
    ("facebook.com", SocialPlatform::Facebook),
    ("fb.com", SocialPlatform::Facebook),
    ("instagram.com", SocialPlatform::Instagram),
    ("linkedin.com", SocialPlatform::Linkedin),
    ("youtube.com", SocialPlatform::Youtube),
    ("youtu.be", SocialPlatform::Youtube),
    ("twitter.com", SocialPlatform::X),
    ("x.com", SocialPlatform::X),
    ("tiktok.com", SocialPlatform::Tiktok),
    ("yelp.com", SocialPlatform::Yelp),
    ("nextdoor.com", SocialPlatform::Nextdoor),
    ("maps.google.com", SocialPlatform::Map),
    ("maps.app.goo.gl", SocialPlatform::Map),
    ("g.page", SocialPlatform::Map),
];

const SHARE_MARKERS: &[&str] = &["sharer", "/share", "intent/tweet", "sharearticle"];

/// Detects the platform a link points at. Share buttons are not profiles.
#[must_use]
pub fn detect_platform(href: &str) -> Option<SocialPlatform> {
    let url = Url::parse(href.trim()).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_ascii_lowercase();
    let path = url.path().to_ascii_lowercase();
    if SHARE_MARKERS.iter().any(|m| path.contains(m)) {
        return None;
    }

    let on = |domain: &str| host == domain || host.ends_with(&format!(".{domain}"));
    if (on("google.com") && path.starts_with("/maps")) || (host == "goo.gl" && path.starts_with("/maps")) {
        return Some(SocialPlatform::Map);
    }
    PLATFORM_HOSTS
        .iter()
        .find(|(domain, _)| on(domain))
        .map(|(_, platform)| *platform)
}

/// First `geo` coordinates on a business entity.
#[must_use]
pub fn find_geo(pages: &[&PageRecord]) -> Option<(f64, f64)> {
    pages
        .iter()
        .flat_map(|p| jsonld::nodes(&p.structured_data))
        .filter(|n| jsonld::is_business_entity(n))
        .find_map(|n| {
            let geo = n.get("geo").and_then(serde_json::Value::as_object).unwrap_or(n);
            let lat = jsonld::number(geo.get("latitude"))?;
            let lng = jsonld::number(geo.get("longitude"))?;
            Some((lat, lng))
        })
}

fn map_search_url(query: &str) -> String {
    format!("https://www.google.com/maps/search/?api=1&query={query}")
}

/// Collects per-platform profile links, deduplicated by exact URL.
///
/// When no map link exists one is synthesized, from coordinates if the
/// structured data has them, else from the resolved address.
#[must_use]
pub fn resolve_social_links(
    pages: &[&PageRecord],
    address: Option<&Address>,
) -> BTreeMap<SocialPlatform, Vec<SocialLink>> {
    let mut links: BTreeMap<SocialPlatform, Vec<SocialLink>> = BTreeMap::new();
    let mut add = |url: &str, source: Provenance| {
        let url = url.trim();
        let Some(platform) = detect_platform(url) else {
            return;
        };
        let entry = links.entry(platform).or_default();
        if !entry.iter().any(|l| l.url == url) {
            entry.push(SocialLink {
                url: url.to_string(),
                source,
            });
        }
    };

    for page in pages {
        for node in jsonld::nodes(&page.structured_data) {
            for same_as in jsonld::texts(node, "sameAs") {
                add(&same_as, Provenance::StructuredData);
            }
            if let Some(has_map) = jsonld::text(node, "hasMap") {
                add(&has_map, Provenance::StructuredData);
            }
        }
    }
    for page in pages {
        let hrefs = page
            .links
            .iter()
            .map(String::as_str)
            .chain(page.cta_candidates.iter().filter_map(|c| c.href.as_deref()));
        for href in hrefs {
            add(href, Provenance::AnchorLink);
        }
    }

    if !links.contains_key(&SocialPlatform::Map) {
        let generated = if let Some((lat, lng)) = find_geo(pages) {
            Some((map_search_url(&format!("{lat},{lng}")), Provenance::GeneratedGeo))
        } else {
            address
                .map(Address::one_line)
                .filter(|line| !line.is_empty())
                .map(|line| {
                    let query: String = form_urlencoded::byte_serialize(line.as_bytes()).collect();
                    (map_search_url(&query), Provenance::GeneratedAddress)
                })
        };
        if let Some((url, source)) = generated {
            tracing::debug!(%url, %source, "synthesized map link");
            links.insert(SocialPlatform::Map, vec![SocialLink { url, source }]);
        }
    }

    links
}
