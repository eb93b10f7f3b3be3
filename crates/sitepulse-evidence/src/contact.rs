//! Phone and email merging across structured data, anchors and free text.

use std::sync::LazyLock;

use regex::Regex;
use sitepulse_core::{EmailEntry, PageRecord, PhoneEntry, Provenance, Staged, WarningCode};

use crate::jsonld;
use crate::merge::{merge_ranked, Candidate, CONTACT_PRIORITY};

/// Maximum retained values per contact field.
pub const MAX_PER_FIELD: usize = 5;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[\s.\-]?)?\(?\b\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}\b").expect("valid regex")
});
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}\b").expect("valid regex")
});

const ASSET_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp"];
const PLACEHOLDER_DOMAINS: &[&str] = &[
    "example.com",
    "domain.com",
    "email.com",
    "yourdomain.com",
    "sentry.io",
    "wixpress.com",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactChannels {
    pub phones: Vec<PhoneEntry>,
    pub emails: Vec<EmailEntry>,
}

/// Digits-only dedup key. A leading US country code on an 11-digit number is
/// dropped; anything outside 10–15 digits is not a phone number.
#[must_use]
pub fn phone_key(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = if digits.len() == 11 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits
    };
    (10..=15).contains(&digits.len()).then_some(digits)
}

/// Lowercased `local@domain`, or `None` for asset names and placeholders.
#[must_use]
pub fn email_key(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return None;
    }
    if ASSET_SUFFIXES.iter().any(|s| email.ends_with(s)) {
        return None;
    }
    if PLACEHOLDER_DOMAINS.contains(&domain) {
        return None;
    }
    Some(email)
}

/// `(305) 555-0100` for 10-digit North American numbers, the trimmed raw
/// text otherwise.
fn display_phone(raw: &str) -> String {
    match phone_key(raw) {
        Some(d) if d.len() == 10 => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
        _ => raw.trim().to_string(),
    }
}

/// Value of a `tel:`/`mailto:` href, without query string or encoding noise.
pub(crate) fn anchor_value(href: &str, scheme: &str) -> Option<String> {
    let href = href.trim();
    let prefix = href.get(..scheme.len())?;
    if !prefix.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let value = href[scheme.len()..]
        .split('?')
        .next()
        .unwrap_or_default()
        .replace("%20", " ");
    let value = value.trim().trim_start_matches("//").to_string();
    (!value.is_empty()).then_some(value)
}

fn page_hrefs(page: &PageRecord) -> impl Iterator<Item = &str> {
    page.cta_candidates
        .iter()
        .filter_map(|c| c.href.as_deref())
        .chain(page.links.iter().map(String::as_str))
}

fn text_sources(page: &PageRecord, is_home: bool) -> [(Provenance, Option<&str>); 3] {
    let body = if is_home {
        Provenance::BodyTextRegex
    } else {
        Provenance::SecondaryPageText
    };
    [
        (Provenance::HeaderText, page.header_text.as_deref()),
        (Provenance::FooterText, page.footer_text.as_deref()),
        (body, page.text_snippet.as_deref()),
    ]
}

fn collect_candidates(pages: &[&PageRecord]) -> (Vec<Candidate<String>>, Vec<Candidate<String>>) {
    let mut phones = Vec::new();
    let mut emails = Vec::new();

    for (idx, page) in pages.iter().enumerate() {
        for node in jsonld::nodes(&page.structured_data) {
            for phone in jsonld::texts(node, "telephone") {
                phones.push(Candidate::new(phone, Provenance::StructuredData));
            }
            for email in jsonld::texts(node, "email") {
                let email = anchor_value(&email, "mailto:").unwrap_or(email);
                emails.push(Candidate::new(email, Provenance::StructuredData));
            }
        }

        for href in page_hrefs(page) {
            if let Some(phone) = anchor_value(href, "tel:") {
                phones.push(Candidate::new(phone, Provenance::AnchorTarget));
            } else if let Some(email) = anchor_value(href, "mailto:") {
                emails.push(Candidate::new(email, Provenance::AnchorTarget));
            }
        }

        for (origin, text) in text_sources(page, idx == 0) {
            let Some(text) = text else { continue };
            for m in PHONE_RE.find_iter(text) {
                phones.push(Candidate::new(m.as_str().to_string(), origin));
            }
            for m in EMAIL_RE.find_iter(text) {
                emails.push(Candidate::new(m.as_str().to_string(), origin));
            }
        }
    }

    (phones, emails)
}

/// Merges phone and email candidates from `pages`.
///
/// `pages` must already be in canonical order (home first); the first page's
/// snippet counts as general body text, every other page's as secondary text.
#[must_use]
pub fn merge_contacts(pages: &[&PageRecord]) -> Staged<ContactChannels> {
    let (phones, emails) = collect_candidates(pages);
    tracing::debug!(
        phone_candidates = phones.len(),
        email_candidates = emails.len(),
        "merging contact channels"
    );

    let phones: Vec<PhoneEntry> = merge_ranked(phones, &CONTACT_PRIORITY, MAX_PER_FIELD, |v| {
        phone_key(v)
    })
    .into_iter()
    .map(|c| PhoneEntry {
        value: display_phone(&c.value),
        source: c.origin,
    })
    .collect();

    let emails: Vec<EmailEntry> = merge_ranked(emails, &CONTACT_PRIORITY, MAX_PER_FIELD, |v| {
        email_key(v)
    })
    .into_iter()
    .filter_map(|c| {
        email_key(&c.value).map(|address| EmailEntry {
            address,
            source: c.origin,
        })
    })
    .collect();

    let mut staged = Staged::new(ContactChannels { phones, emails });
    if staged.value.phones.is_empty() {
        staged.warn(WarningCode::PhoneMissing, "no phone number found on any page");
    }
    if staged.value.emails.is_empty() {
        staged.warn(WarningCode::EmailMissing, "no email address found on any page");
    }
    staged
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sitepulse_core::{CtaCandidate, LinkTarget};

    use super::*;

    #[test]
    fn phone_key_normalizes_country_code() {
        assert_eq!(phone_key("+1 (305) 555-0100").as_deref(), Some("3055550100"));
        assert_eq!(phone_key("305.555.0100").as_deref(), Some("3055550100"));
        assert_eq!(phone_key("555-0100"), None);
        assert_eq!(phone_key("+44 20 7946 0958").as_deref(), Some("442079460958"));
    }

    #[test]
    fn email_key_rejects_assets_and_placeholders() {
        assert_eq!(email_key(" Info@EmpirePlumbing.com ").as_deref(), Some("info@empireplumbing.com"));
        assert_eq!(email_key("logo@2x.png"), None);
        assert_eq!(email_key("you@example.com"), None);
        assert_eq!(email_key("not-an-email"), None);
    }

    #[test]
    fn anchor_values_strip_scheme_and_query() {
        assert_eq!(
            anchor_value("TEL:+1%20305%20555%200100", "tel:").as_deref(),
            Some("+1 305 555 0100")
        );
        assert_eq!(
            anchor_value("mailto:office@x.com?subject=Hi", "mailto:").as_deref(),
            Some("office@x.com")
        );
        assert_eq!(anchor_value("https://x.com", "tel:"), None);
        assert_eq!(anchor_value("tel:", "tel:"), None);
    }

    #[test]
    fn structured_data_outranks_anchor_and_text() {
        let page = PageRecord {
            url: "https://x.com/".to_string(),
            structured_data: vec![json!({"@type": "Plumber", "telephone": "305-555-0199"})],
            cta_candidates: vec![CtaCandidate {
                text: "Call".to_string(),
                target: LinkTarget::Tel,
                href: Some("tel:3055550100".to_string()),
                ..CtaCandidate::default()
            }],
            footer_text: Some("Call (305) 555-0100 or email office@x.com".to_string()),
            ..PageRecord::default()
        };
        let staged = merge_contacts(&[&page]);
        let phones = &staged.value.phones;
        assert_eq!(phones.len(), 2);
        assert_eq!(phones[0].value, "(305) 555-0199");
        assert_eq!(phones[0].source, Provenance::StructuredData);
        assert_eq!(phones[1].source, Provenance::AnchorTarget);
        assert_eq!(staged.value.emails[0].source, Provenance::FooterText);
        assert!(staged.warnings.is_empty());
    }

    #[test]
    fn secondary_pages_rank_below_home_body() {
        let home = PageRecord {
            url: "https://x.com/".to_string(),
            text_snippet: Some("Email hello@x.com".to_string()),
            ..PageRecord::default()
        };
        let contact = PageRecord {
            url: "https://x.com/contact".to_string(),
            text_snippet: Some("Email office@x.com".to_string()),
            ..PageRecord::default()
        };
        let staged = merge_contacts(&[&home, &contact]);
        let emails = &staged.value.emails;
        assert_eq!(emails[0].address, "hello@x.com");
        assert_eq!(emails[0].source, Provenance::BodyTextRegex);
        assert_eq!(emails[1].source, Provenance::SecondaryPageText);
    }

    #[test]
    fn empty_pages_warn_for_each_channel() {
        let page = PageRecord::default();
        let staged = merge_contacts(&[&page]);
        assert!(staged.has_warning(WarningCode::PhoneMissing));
        assert!(staged.has_warning(WarningCode::EmailMissing));
    }

    #[test]
    fn phones_cap_at_five() {
        let text = (0..8)
            .map(|i| format!("(305) 555-010{i}"))
            .collect::<Vec<_>>()
            .join(" / ");
        let page = PageRecord {
            header_text: Some(text),
            ..PageRecord::default()
        };
        assert_eq!(merge_contacts(&[&page]).value.phones.len(), MAX_PER_FIELD);
    }
}
