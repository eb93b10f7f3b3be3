//! Opening-hours parsing and display rendering.
//!
//! Two structured shapes exist in the wild: `openingHoursSpecification` rows
//! (`{dayOfWeek, opens, closes}`) and `openingHours` strings such as
//! `"Mo-Fr 07:00-19:00"`. Both are decided once into [`HoursValue`]; a string
//! the pattern cannot read is kept verbatim.

use std::sync::LazyLock;

use chrono::{NaiveTime, Timelike};
use regex::Regex;
use serde_json::Value;
use sitepulse_core::{PageRecord, Provenance, Sourced, Staged, WarningCode};

use crate::jsonld::{self, Node};

const ALL_DAYS: u8 = 0b111_1111;
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];
const END_OF_DAY: u16 = 24 * 60;

static HOURS_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<days>[A-Za-z]{2,9}(?:\s*[-,]\s*[A-Za-z]{2,9})*)(?:\s+(?P<opens>\d{1,2}:\d{2})\s*-\s*(?P<closes>\d{1,2}:\d{2}))?$",
    )
    .expect("valid regex")
});

/// Days sharing one open/close pair. `days` is a Monday-first bit mask;
/// times are minutes since midnight, `24:00` being 1440.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursGroup {
    pub days: u8,
    pub opens: u16,
    pub closes: u16,
}

impl HoursGroup {
    fn is_all_day(self) -> bool {
        self.opens == 0 && self.closes >= END_OF_DAY - 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoursValue {
    Structured(Vec<HoursGroup>),
    Raw(String),
}

impl HoursValue {
    /// Display string: `"24/7"`, or one `"Mon–Fri 7am–7pm"` segment per group.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            HoursValue::Raw(raw) => raw.clone(),
            HoursValue::Structured(groups) => {
                let covered = groups.iter().fold(0, |acc, g| acc | g.days);
                if covered == ALL_DAYS && groups.iter().all(|g| g.is_all_day()) {
                    return "24/7".to_string();
                }
                groups
                    .iter()
                    .map(|g| {
                        format!(
                            "{} {}–{}",
                            day_ranges(g.days),
                            short_time(g.opens),
                            short_time(g.closes)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("; ")
            }
        }
    }
}

fn parse_day(raw: &str) -> Option<usize> {
    let name = raw
        .trim()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if name.len() < 2 {
        return None;
    }
    DAY_NAMES.iter().position(|full| full.starts_with(&name))
}

fn parse_time(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if raw == "24:00" || raw == "24:00:00" {
        return Some(END_OF_DAY);
    }
    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()?;
    u16::try_from(time.hour() * 60 + time.minute()).ok()
}

/// `"Mo-Fr,Su"` style day lists; ranges may wrap past Sunday.
fn parse_day_spec(spec: &str) -> Option<u8> {
    let mut mask = 0_u8;
    for part in spec.split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let (start, end) = (parse_day(start)?, parse_day(end)?);
            let mut day = start;
            loop {
                mask |= 1 << day;
                if day == end {
                    break;
                }
                day = (day + 1) % 7;
            }
        } else {
            mask |= 1 << parse_day(part)?;
        }
    }
    (mask != 0).then_some(mask)
}

fn push_group(groups: &mut Vec<HoursGroup>, days: u8, opens: u16, closes: u16) {
    if let Some(g) = groups
        .iter_mut()
        .find(|g| g.opens == opens && g.closes == closes)
    {
        g.days |= days;
    } else {
        groups.push(HoursGroup {
            days,
            opens,
            closes,
        });
    }
}

fn sorted(mut groups: Vec<HoursGroup>) -> Vec<HoursGroup> {
    groups.sort_by_key(|g| (g.days.trailing_zeros(), g.opens));
    groups
}

fn spec_rows(value: &Value) -> Vec<&Node> {
    match value {
        Value::Object(row) => vec![row],
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        _ => Vec::new(),
    }
}

/// Groups `openingHoursSpecification` rows by their open/close pair.
/// Rows missing a day or time are skipped.
fn from_specification(value: &Value) -> Option<HoursValue> {
    let mut groups = Vec::new();
    for row in spec_rows(value) {
        let days = match row.get("dayOfWeek") {
            Some(Value::String(d)) => parse_day(d).map(|i| 1_u8 << i),
            Some(Value::Array(ds)) => ds
                .iter()
                .filter_map(Value::as_str)
                .filter_map(parse_day)
                .fold(None, |acc: Option<u8>, i| Some(acc.unwrap_or(0) | 1 << i)),
            _ => None,
        };
        let opens = jsonld::text(row, "opens").and_then(|t| parse_time(&t));
        let closes = jsonld::text(row, "closes").and_then(|t| parse_time(&t));
        if let (Some(days), Some(opens), Some(closes)) = (days, opens, closes) {
            push_group(&mut groups, days, opens, closes);
        } else {
            tracing::debug!(row = ?row, "skipped incomplete opening hours row");
        }
    }
    (!groups.is_empty()).then(|| HoursValue::Structured(sorted(groups)))
}

/// Parses `openingHours` entries. Any entry that fails makes the whole value
/// [`HoursValue::Raw`].
#[must_use]
pub fn parse_hours_strings(entries: &[String]) -> Option<HoursValue> {
    let entries: Vec<&str> = entries
        .iter()
        .flat_map(|e| e.split(';'))
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    if entries.is_empty() {
        return None;
    }

    let mut groups = Vec::new();
    for entry in &entries {
        let parsed = HOURS_ENTRY_RE.captures(entry).and_then(|caps| {
            let days = parse_day_spec(caps.name("days")?.as_str())?;
            let (opens, closes) = match (caps.name("opens"), caps.name("closes")) {
                (Some(o), Some(c)) => (parse_time(o.as_str())?, parse_time(c.as_str())?),
                _ => (0, END_OF_DAY),
            };
            Some((days, opens, closes))
        });
        match parsed {
            Some((days, opens, closes)) => push_group(&mut groups, days, opens, closes),
            None => return Some(HoursValue::Raw(entries.join("; "))),
        }
    }
    Some(HoursValue::Structured(sorted(groups)))
}

fn node_hours(node: &Node) -> Option<HoursValue> {
    node.get("openingHoursSpecification")
        .and_then(from_specification)
        .or_else(|| parse_hours_strings(&jsonld::texts(node, "openingHours")))
}

/// Resolves display hours from the first structured-data node that has any.
#[must_use]
pub fn resolve_hours(pages: &[&PageRecord]) -> Staged<Sourced<String>> {
    let found = pages
        .iter()
        .flat_map(|p| jsonld::nodes(&p.structured_data))
        .find_map(node_hours);

    match found {
        Some(hours @ HoursValue::Structured(_)) => {
            Staged::new(Sourced::present(hours.render(), Provenance::StructuredData))
        }
        Some(HoursValue::Raw(raw)) => {
            Staged::new(Sourced::present(raw, Provenance::StructuredData)).with_warning(
                WarningCode::HoursBlob,
                "opening hours could not be parsed and were kept verbatim",
            )
        }
        None => Staged::new(Sourced::Absent)
            .with_warning(WarningCode::HoursMissing, "no opening hours found"),
    }
}

fn day_ranges(mask: u8) -> String {
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for day in (0..7).filter(|d| mask & (1 << d) != 0) {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == day => *end = day,
            _ => runs.push((day, day)),
        }
    }
    runs.into_iter()
        .map(|(start, end)| {
            if start == end {
                DAY_LABELS[start].to_string()
            } else {
                format!("{}–{}", DAY_LABELS[start], DAY_LABELS[end])
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `7am`, `7:30pm`, `12am`; minutes are dropped when zero.
fn short_time(minutes: u16) -> String {
    let hour = (minutes / 60) % 24;
    let minute = minutes % 60;
    let suffix = if hour < 12 { "am" } else { "pm" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    if minute == 0 {
        format!("{hour12}{suffix}")
    } else {
        format!("{hour12}:{minute:02}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(data: Value) -> Staged<Sourced<String>> {
        let page = PageRecord {
            structured_data: vec![data],
            ..PageRecord::default()
        };
        resolve_hours(&[&page])
    }

    #[test]
    fn seven_day_midnight_rows_render_as_24_7() {
        let staged = resolve(json!({
            "@type": "Plumber",
            "openingHoursSpecification": [{
                "@type": "OpeningHoursSpecification",
                "dayOfWeek": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
                "opens": "00:00",
                "closes": "23:59"
            }]
        }));
        assert_eq!(staged.value.value().map(String::as_str), Some("24/7"));
        assert!(staged.warnings.is_empty());
    }

    #[test]
    fn separate_rows_with_24_00_close_also_render_as_24_7() {
        let rows: Vec<Value> = DAY_NAMES
            .iter()
            .map(|d| json!({"dayOfWeek": format!("https://schema.org/{d}"), "opens": "00:00:00", "closes": "24:00"}))
            .collect();
        let staged = resolve(json!({"@type": "LocalBusiness", "openingHoursSpecification": rows}));
        assert_eq!(staged.value.value().map(String::as_str), Some("24/7"));
    }

    #[test]
    fn rows_group_by_open_close_pair() {
        let staged = resolve(json!({
            "@type": "LocalBusiness",
            "openingHoursSpecification": [
                {"dayOfWeek": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"], "opens": "07:00", "closes": "19:00"},
                {"dayOfWeek": "Saturday", "opens": "08:30", "closes": "12:00"}
            ]
        }));
        assert_eq!(
            staged.value.value().map(String::as_str),
            Some("Mon–Fri 7am–7pm; Sat 8:30am–12pm")
        );
    }

    #[test]
    fn delimited_string_is_parsed() {
        let parsed = parse_hours_strings(&["Mo,Tu,We 07:00-19:00".to_string()]).unwrap();
        assert_eq!(parsed.render(), "Mon–Wed 7am–7pm");

        let parsed = parse_hours_strings(&["Mo-Su 00:00-23:59".to_string()]).unwrap();
        assert_eq!(parsed.render(), "24/7");
    }

    #[test]
    fn wrapping_day_range() {
        assert_eq!(parse_day_spec("Sa-Mo"), Some(0b110_0001));
    }

    #[test]
    fn unparseable_string_is_kept_verbatim() {
        let staged = resolve(json!({"@type": "LocalBusiness", "openingHours": "Call for hours"}));
        assert_eq!(staged.value.value().map(String::as_str), Some("Call for hours"));
        assert!(staged.has_warning(WarningCode::HoursBlob));
    }

    #[test]
    fn missing_hours_warn() {
        let staged = resolve(json!({"@type": "LocalBusiness", "name": "X"}));
        assert_eq!(staged.value, Sourced::Absent);
        assert!(staged.has_warning(WarningCode::HoursMissing));
    }

    #[test]
    fn short_time_drops_zero_minutes() {
        assert_eq!(short_time(0), "12am");
        assert_eq!(short_time(7 * 60), "7am");
        assert_eq!(short_time(13 * 60 + 5), "1:05pm");
        assert_eq!(short_time(END_OF_DAY), "12am");
    }
}
