//! schema.org JSON-LD helpers.
//!
//! Blocks arrive as opaque JSON values: a single object, an array, or an
//! `@graph` container, with `@type` as a string or an array of strings.

use serde_json::{Map, Value};

pub(crate) type Node = Map<String, Value>;

/// Every object node in `blocks`, depth-first in document order.
///
/// Nested objects (a `publisher` Organization inside a `WebPage`, the
/// PostalAddress inside a LocalBusiness) are included; callers filter by type.
pub(crate) fn nodes(blocks: &[Value]) -> Vec<&Node> {
    let mut out = Vec::new();
    for block in blocks {
        collect_nodes(block, &mut out);
    }
    out
}

fn collect_nodes<'a>(value: &'a Value, out: &mut Vec<&'a Node>) {
    match value {
        Value::Object(map) => {
            out.push(map);
            for child in map.values() {
                collect_nodes(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_nodes(item, out);
            }
        }
        _ => {}
    }
}

/// `@type` names with any `https://schema.org/` prefix stripped.
pub(crate) fn type_names(node: &Node) -> Vec<&str> {
    match node.get("@type") {
        Some(Value::String(s)) => vec![short_type(s)],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).map(short_type).collect(),
        _ => Vec::new(),
    }
}

fn short_type(raw: &str) -> &str {
    raw.trim().rsplit('/').next().unwrap_or(raw).trim()
}

const LOCAL_BUSINESS_TYPES: &[&str] = &[
    "LocalBusiness",
    "Plumber",
    "HVACBusiness",
    "Electrician",
    "RoofingContractor",
    "GeneralContractor",
    "HomeAndConstructionBusiness",
    "HousePainter",
    "Locksmith",
    "MovingCompany",
    "ProfessionalService",
    "EmergencyService",
    "Dentist",
    "AutoRepair",
];

pub(crate) fn is_local_business_type(name: &str) -> bool {
    LOCAL_BUSINESS_TYPES
        .iter()
        .any(|t| name.eq_ignore_ascii_case(t))
        || name.ends_with("Business")
        || name.ends_with("Contractor")
        || name.ends_with("Store")
}

pub(crate) fn is_local_business(node: &Node) -> bool {
    type_names(node).into_iter().any(is_local_business_type)
}

pub(crate) fn is_organization(node: &Node) -> bool {
    type_names(node)
        .into_iter()
        .any(|t| t.eq_ignore_ascii_case("Organization") || t.eq_ignore_ascii_case("Corporation"))
}

pub(crate) fn is_website(node: &Node) -> bool {
    type_names(node)
        .into_iter()
        .any(|t| t.eq_ignore_ascii_case("WebSite"))
}

/// Organization or LocalBusiness: a node that describes the business itself.
pub(crate) fn is_business_entity(node: &Node) -> bool {
    is_local_business(node) || is_organization(node)
}

/// A non-empty trimmed string from `key`. Arrays yield their first string.
pub(crate) fn text(node: &Node, key: &str) -> Option<String> {
    value_text(node.get(key)?)
}

pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Array(items) => items.iter().find_map(value_text),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Every string under `key`: a plain string, or the strings of an array.
pub(crate) fn texts(node: &Node, key: &str) -> Vec<String> {
    match node.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Numbers that may arrive as JSON numbers or numeric strings.
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}
