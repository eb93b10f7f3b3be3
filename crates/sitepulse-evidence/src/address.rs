//! Postal address resolution.
//!
//! Structured data wins when it has one. A structured address may be a
//! `PostalAddress` object or a plain string; the string form goes through the
//! same text pattern as the free-text fallback and is kept verbatim when the
//! pattern finds nothing. Free text is only consulted when no page carries a
//! structured address at all.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use sitepulse_core::{Address, PageRecord, Provenance, Sourced, Staged, WarningCode};

use crate::jsonld::{self, Node};
use crate::text::collapse_whitespace;

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            (?P<street>
                \d{1,6}\s+(?:[A-Za-z0-9.'\-]+\s+){0,5}?
                (?:St|Street|Ave|Avenue|Blvd|Boulevard|Rd|Road|Dr|Drive|Ln|Lane|Way|Ct|Court
                  |Pl|Place|Pkwy|Parkway|Hwy|Highway|Ter|Terrace|Cir|Circle|Trl|Trail)\.?
                (?:\s*,?\s*(?:Suite|Ste\.?|Unit|\#)\s*[A-Za-z0-9\-]+)?
            )
            \s*,?\s+
        )?
        (?P<city>[A-Z][A-Za-z.'\-]*(?:\s+[A-Z][A-Za-z.'\-]*){0,3}),\s*
        (?P<region>[A-Z]{2})\b
        (?:\s+(?P<postal>\d{5}(?:-\d{4})?))?
        ",
    )
    .expect("valid regex")
});

const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY", "PR",
];

/// Leading words that precede a city name in marketing copy.
const CITY_STOP_WORDS: &[&str] = &[
    "Serving", "Servicing", "In", "Located", "Proudly", "Based", "Near", "From", "Visit", "Us",
    "Our", "Office", "Address",
];

/// An `address` value as it arrives in structured data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressValue {
    Structured(Address),
    Raw(String),
}

impl AddressValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let s = collapse_whitespace(s);
                (!s.is_empty()).then_some(AddressValue::Raw(s))
            }
            Value::Object(node) => {
                let addr = postal_address(node);
                (!addr.is_empty()).then_some(AddressValue::Structured(addr))
            }
            Value::Array(items) => items.iter().find_map(AddressValue::from_json),
            _ => None,
        }
    }
}

fn postal_address(node: &Node) -> Address {
    let country = match node.get("addressCountry") {
        Some(Value::Object(c)) => jsonld::text(c, "name"),
        Some(other) => jsonld::value_text(other),
        None => None,
    };
    Address {
        street: jsonld::text(node, "streetAddress").map(|s| collapse_whitespace(&s)),
        city: jsonld::text(node, "addressLocality"),
        region: jsonld::text(node, "addressRegion"),
        postal_code: jsonld::text(node, "postalCode"),
        country,
        raw: None,
    }
}

fn strip_city_stop_words(city: &str) -> Option<String> {
    let words: Vec<&str> = city
        .split_whitespace()
        .skip_while(|w| CITY_STOP_WORDS.contains(w))
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}

/// Finds the first `[street,] City, ST [zip]` in `text` with a real US state.
#[must_use]
pub fn parse_address_text(text: &str) -> Option<Address> {
    ADDRESS_RE.captures_iter(text).find_map(|caps| {
        let region = caps.name("region")?.as_str();
        if !US_STATES.contains(&region) {
            return None;
        }
        let city = strip_city_stop_words(caps.name("city")?.as_str())?;
        Some(Address {
            street: caps.name("street").map(|m| collapse_whitespace(m.as_str())),
            city: Some(city),
            region: Some(region.to_string()),
            postal_code: caps.name("postal").map(|m| m.as_str().to_string()),
            country: None,
            raw: None,
        })
    })
}

fn structured_candidate(pages: &[&PageRecord]) -> Option<AddressValue> {
    pages
        .iter()
        .flat_map(|p| jsonld::nodes(&p.structured_data))
        .filter(|n| jsonld::is_business_entity(n))
        .filter_map(|n| n.get("address").and_then(AddressValue::from_json))
        .find(|v| match v {
            AddressValue::Structured(a) => a.street.is_some() || a.city.is_some(),
            AddressValue::Raw(_) => true,
        })
}

fn text_candidate(pages: &[&PageRecord]) -> Option<Address> {
    pages.iter().find_map(|p| {
        [
            p.footer_text.as_deref(),
            p.header_text.as_deref(),
            p.text_snippet.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find_map(parse_address_text)
    })
}

/// Resolves the business address from canonically ordered `pages`.
#[must_use]
pub fn resolve_address(pages: &[&PageRecord]) -> Staged<Sourced<Address>> {
    let mut staged = Staged::new(Sourced::Absent);

    let (address, source) = match structured_candidate(pages) {
        Some(AddressValue::Structured(addr)) => (addr, Provenance::StructuredData),
        Some(AddressValue::Raw(raw)) => match parse_address_text(&raw) {
            Some(mut addr) => {
                addr.raw = Some(raw);
                (addr, Provenance::StructuredData)
            }
            None => {
                staged.warn(
                    WarningCode::AddressBlob,
                    "structured address could not be parsed and was kept verbatim",
                );
                let addr = Address {
                    raw: Some(raw),
                    ..Address::default()
                };
                staged.value = Sourced::present(addr, Provenance::StructuredData);
                return staged;
            }
        },
        None => match text_candidate(pages) {
            Some(addr) => {
                tracing::info!(city = ?addr.city, "address recovered from page text");
                staged.warn(
                    WarningCode::AddressPartialFromText,
                    "address parsed from page text; no structured address found",
                );
                (addr, Provenance::AddressText)
            }
            None => {
                staged.warn(WarningCode::AddressMissing, "no address found on any page");
                return staged;
            }
        },
    };

    if address.street.is_none() {
        staged.warn(
            WarningCode::AddressPartialMissingStreet,
            "address has no street line",
        );
    }
    staged.value = Sourced::present(address, source);
    staged
}
