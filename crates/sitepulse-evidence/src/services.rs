//! Featured-service catalog extraction.
//!
//! Sources in priority order: structured-data offer catalogs, the upstream
//! services list, and only when both are empty, H3/H6 heading pairs on
//! services pages and the home page.

use std::collections::HashSet;

use serde_json::Value;
use sitepulse_core::{
    FeaturedService, PageRecord, PageRole, Provenance, ServiceCatalog, Staged, WarningCode,
};

use crate::jsonld;
use crate::pages::{classify_page_role, has_service_vocabulary};
use crate::text::{collapse_whitespace, tokens};

pub const MAX_SERVICES: usize = 20;
pub const MAX_FEATURED: usize = 6;
const MIN_HEADING_CHARS: usize = 3;
const MAX_HEADING_CHARS: usize = 100;

#[derive(Debug, Clone)]
struct ServiceEntry {
    title: String,
    description: Option<String>,
    source_page: String,
    source: Provenance,
}

fn offer_entries(value: &Value, page: &str, out: &mut Vec<ServiceEntry>) {
    match value {
        Value::Array(items) => {
            for item in items {
                offer_entries(item, page, out);
            }
        }
        Value::Object(node) => {
            if let Some(list) = node.get("itemListElement") {
                offer_entries(list, page, out);
            } else if let Some(offered) = node.get("itemOffered") {
                offer_entries(offered, page, out);
            } else if let Some(title) = jsonld::text(node, "name") {
                out.push(ServiceEntry {
                    title,
                    description: jsonld::text(node, "description"),
                    source_page: page.to_string(),
                    source: Provenance::OfferCatalog,
                });
            }
        }
        Value::String(title) if !title.trim().is_empty() => out.push(ServiceEntry {
            title: title.trim().to_string(),
            description: None,
            source_page: page.to_string(),
            source: Provenance::OfferCatalog,
        }),
        _ => {}
    }
}

fn catalog_entries(pages: &[&PageRecord]) -> Vec<ServiceEntry> {
    let mut out = Vec::new();
    for page in pages {
        for node in jsonld::nodes(&page.structured_data) {
            if let Some(catalog) = node.get("hasOfferCatalog") {
                offer_entries(catalog, page.canonical_url(), &mut out);
            }
        }
    }
    out
}

fn list_entries(pages: &[&PageRecord]) -> Vec<ServiceEntry> {
    pages
        .iter()
        .flat_map(|page| {
            page.services_list.iter().map(|title| ServiceEntry {
                title: title.clone(),
                description: None,
                source_page: page.canonical_url().to_string(),
                source: Provenance::ServicesList,
            })
        })
        .collect()
}

/// Pairs each H3 with the H6 at the same index. Services pages are read
/// before the home page.
fn heading_pair_entries(pages: &[&PageRecord], niche_terms: &[String]) -> Vec<ServiceEntry> {
    let roles: Vec<PageRole> = pages
        .iter()
        .map(|p| classify_page_role(p, niche_terms))
        .collect();
    let services_pages = pages
        .iter()
        .zip(&roles)
        .filter(|(_, role)| **role == PageRole::Services);
    let home_pages = pages
        .iter()
        .zip(&roles)
        .filter(|(_, role)| **role == PageRole::Home);

    let mut out = Vec::new();
    for (page, _) in services_pages.chain(home_pages) {
        for (idx, h3) in page.headings.h3.iter().enumerate() {
            let title = collapse_whitespace(h3);
            let len = title.chars().count();
            if !(MIN_HEADING_CHARS..=MAX_HEADING_CHARS).contains(&len) {
                continue;
            }
            if !has_service_vocabulary(&tokens(&title), niche_terms) {
                continue;
            }
            let description = page
                .headings
                .h6
                .get(idx)
                .map(|d| collapse_whitespace(d))
                .filter(|d| !d.is_empty());
            out.push(ServiceEntry {
                title,
                description,
                source_page: page.canonical_url().to_string(),
                source: Provenance::HeadingPair,
            });
        }
    }
    out
}

fn service_areas(pages: &[&PageRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut areas = Vec::new();
    for node in pages
        .iter()
        .flat_map(|p| jsonld::nodes(&p.structured_data))
        .filter(|n| jsonld::is_business_entity(n))
    {
        let values: Vec<String> = match node.get("areaServed") {
            Some(Value::Array(items)) => items.iter().filter_map(area_name).collect(),
            Some(other) => area_name(other).into_iter().collect(),
            None => Vec::new(),
        };
        for area in values {
            if seen.insert(area.to_lowercase()) {
                areas.push(area);
            }
        }
    }
    areas
}

fn area_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(node) => jsonld::text(node, "name"),
        other => jsonld::value_text(other),
    }
}

/// Extracts the service catalog from canonically ordered `pages`.
#[must_use]
pub fn extract_services(pages: &[&PageRecord], niche_terms: &[String]) -> Staged<ServiceCatalog> {
    let mut entries = catalog_entries(pages);
    entries.extend(list_entries(pages));
    if entries.is_empty() {
        entries = heading_pair_entries(pages, niche_terms);
        if !entries.is_empty() {
            tracing::info!(count = entries.len(), "services recovered from heading pairs");
        }
    }

    let mut seen = HashSet::new();
    let unique: Vec<ServiceEntry> = entries
        .into_iter()
        .map(|mut e| {
            e.title = collapse_whitespace(&e.title);
            e
        })
        .filter(|e| !e.title.is_empty() && seen.insert(e.title.to_lowercase()))
        .take(MAX_SERVICES)
        .collect();

    let mut featured = Vec::new();
    let mut other_services = Vec::new();
    for (idx, entry) in unique.into_iter().enumerate() {
        if idx < MAX_FEATURED {
            featured.push(FeaturedService {
                title: entry.title,
                description: entry.description,
                source_page: entry.source_page,
                source: entry.source,
            });
        } else {
            other_services.push(entry.title);
        }
    }

    let mut staged = Staged::new(ServiceCatalog {
        featured,
        other_services,
        service_areas: service_areas(pages),
    });
    if staged.value.featured.is_empty() {
        staged.warn(WarningCode::ServicesMissing, "no services could be identified");
    }
    staged
}
