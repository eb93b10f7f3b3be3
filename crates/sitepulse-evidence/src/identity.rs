//! Business display-name resolution.
//!
//! Candidates are tried in a fixed order and each (except the domain-derived
//! name) must look like a business name rather than a keyword-stuffed page
//! title.

use sitepulse_core::{PageRecord, Provenance, Sourced, Staged, WarningCode};
use url::{Host, Url};

use crate::jsonld::{self, Node};
use crate::merge::{first_present, step};
use crate::text::{collapse_whitespace, tokens};

pub const MAX_NAME_CHARS: usize = 110;
const MAX_NAME_COMMAS: usize = 2;
const LONG_NAME_WORDS: usize = 7;
const MAX_JARGON_IN_LONG_NAME: usize = 2;

/// Service words that show up in keyword-stuffed titles, rarely in names.
const SERVICE_JARGON: &[&str] = &[
    "emergency",
    "repair",
    "repairs",
    "installation",
    "install",
    "replacement",
    "maintenance",
    "service",
    "services",
    "plumbing",
    "plumber",
    "hvac",
    "heating",
    "cooling",
    "conditioning",
    "drain",
    "sewer",
    "leak",
    "heater",
    "gas",
    "sink",
    "residential",
    "commercial",
    "electrical",
    "electrician",
    "roofing",
    "cleaning",
    "affordable",
    "best",
    "near",
];

const TITLE_SEPARATORS: &[&str] = &["|", " - ", " – ", " — "];

/// Rejects strings that are too long, comma-separated lists, or long
/// phrases dense with service jargon.
#[must_use]
pub fn is_likely_business_name(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return false;
    }
    if name.matches(',').count() >= MAX_NAME_COMMAS {
        return false;
    }
    let word_count = name.split_whitespace().count();
    if word_count >= LONG_NAME_WORDS {
        let jargon = tokens(name)
            .iter()
            .filter(|t| SERVICE_JARGON.contains(&t.as_str()))
            .count();
        if jargon >= MAX_JARGON_IN_LONG_NAME {
            return false;
        }
    }
    true
}

/// Domain host of `raw` with its original letter case. Scheme-less input is
/// read as `https`; IP hosts yield `None`.
fn host_of(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let url = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("https://{raw}"))
    }
    .ok()?;
    let Some(Host::Domain(host)) = url.host() else {
        return None;
    };
    let host = host.trim_end_matches('.');
    if host.is_empty() {
        return None;
    }
    // Hosts come back lowercased; camel-case splitting needs the input's casing.
    let cased = raw
        .to_ascii_lowercase()
        .find(host)
        .map_or(host, |at| &raw[at..at + host.len()]);
    Some(cased.to_string())
}

/// Splits `ABCPlumbing` into `ABC`, `Plumbing` and `empirePlumbing` into
/// `empire`, `Plumbing`.
fn split_camel(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let boundary = c.is_uppercase()
            && prev.is_some_and(|p| {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(char::is_lowercase))
            });
        if boundary && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn title_case(token: &str) -> String {
    let len = token.chars().count();
    if (2..=4).contains(&len) && token.chars().all(|c| c.is_ascii_uppercase()) {
        return token.to_string();
    }
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Derives a display name from a site URL: `https://miami-dade-plumbing.com/`
/// becomes `Miami Dade Plumbing`.
///
/// Returns `None` for IP hosts or when nothing is left after dropping the
/// TLD.
#[must_use]
pub fn derive_domain_fallback_name(url: &str) -> Option<String> {
    let host = host_of(url)?;
    let mut labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    if labels
        .first()
        .is_some_and(|l| l.eq_ignore_ascii_case("www"))
    {
        labels.remove(0);
    }
    if labels.len() < 2 {
        return None;
    }
    let tld = labels.pop()?;
    if tld.len() == 2
        && labels.len() > 1
        && labels.last().is_some_and(|l| {
            ["co", "com", "org", "net", "gov", "ac", "edu"].contains(&l.to_ascii_lowercase().as_str())
        })
    {
        labels.pop();
    }

    let words: Vec<String> = labels
        .iter()
        .flat_map(|l| l.split(['_', '-']))
        .filter(|w| !w.is_empty())
        .flat_map(split_camel)
        .map(|w| title_case(&w))
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

/// The leading segment of a `Name | Tagline` style title.
fn title_segment(title: &str) -> Option<String> {
    let cut = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| title.find(sep))
        .min()
        .unwrap_or(title.len());
    let segment = collapse_whitespace(&title[..cut]);
    (!segment.is_empty()).then_some(segment)
}

fn plausible(candidate: Option<String>, origin: Provenance) -> Option<String> {
    let name = collapse_whitespace(&candidate?);
    if is_likely_business_name(&name) {
        Some(name)
    } else {
        tracing::debug!(%origin, name = %name, "rejected implausible business name");
        None
    }
}

fn entity_name<F>(pages: &[&PageRecord], is_kind: F, origin: Provenance) -> Option<String>
where
    F: Fn(&Node) -> bool,
{
    pages
        .iter()
        .flat_map(|p| jsonld::nodes(&p.structured_data))
        .filter(|&n| is_kind(n))
        .find_map(|n| plausible(jsonld::text(n, "name"), origin))
}

/// Resolves the business display name from canonically ordered `pages`,
/// falling back to the domain of `base_url` (or the first page's URL).
#[must_use]
pub fn resolve_name(pages: &[&PageRecord], base_url: &str) -> Staged<Sourced<String>> {
    let site_url = if base_url.trim().is_empty() {
        pages.first().map_or("", |p| p.canonical_url())
    } else {
        base_url
    };

    let name = first_present(vec![
        step(Provenance::JsonldOrganization, || {
            entity_name(pages, jsonld::is_organization, Provenance::JsonldOrganization)
        }),
        step(Provenance::JsonldLocalBusiness, || {
            entity_name(pages, jsonld::is_local_business, Provenance::JsonldLocalBusiness)
        }),
        step(Provenance::SiteNameMeta, || {
            pages
                .iter()
                .find_map(|p| plausible(p.site_name.clone(), Provenance::SiteNameMeta))
        }),
        step(Provenance::JsonldWebsite, || {
            entity_name(pages, jsonld::is_website, Provenance::JsonldWebsite)
        }),
        step(Provenance::DomainFallback, || {
            derive_domain_fallback_name(site_url)
        }),
        step(Provenance::HtmlTitle, || {
            pages.iter().find_map(|p| {
                plausible(
                    p.title.as_deref().and_then(title_segment),
                    Provenance::HtmlTitle,
                )
            })
        }),
    ]);

    let mut staged = Staged::new(name);
    match staged.value.source() {
        Some(Provenance::DomainFallback) => {
            tracing::info!(url = %site_url, "business name derived from domain");
            staged.warn(
                WarningCode::NameFromDomain,
                "business name derived from the site domain",
            );
        }
        Some(Provenance::HtmlTitle) => staged.warn(
            WarningCode::NameFromTitle,
            "business name taken from the page title",
        ),
        _ => {}
    }
    staged
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
