//! Deterministic issue detection.
//!
//! Turns data-quality warnings, weak health axes and upstream mobile
//! findings into raw issue candidates for the deduplicator. The same
//! finding often arrives from more than one detector; dedup sorts that out.

use sitepulse_core::{
    AxisKey, EvidencePack, HealthSnapshot, RawIssue, SiteSignals, StatusTier, WarningCode,
    WarningSeverity,
};

struct Template {
    title: &'static str,
    impact: &'static str,
    fix: &'static str,
    category: &'static str,
}

const fn template(
    title: &'static str,
    impact: &'static str,
    fix: &'static str,
    category: &'static str,
) -> Template {
    Template {
        title,
        impact,
        fix,
        category,
    }
}

/// Warnings that describe the audit rather than the site have no template.
fn warning_template(code: WarningCode) -> Option<Template> {
    let t = match code {
        WarningCode::PhoneMissing => template(
            "No phone number found on the website",
            "Visitors who want to call cannot, and search engines cannot confirm your NAP details.",
            "Add a click-to-call phone number to the header and footer of every page.",
            "contact",
        ),
        WarningCode::EmailMissing => template(
            "No email address listed",
            "Some customers prefer writing; without an email they may leave.",
            "Publish a monitored business email address on the contact page.",
            "contact",
        ),
        WarningCode::AddressMissing => template(
            "Business address not found",
            "Local search ranking depends on a consistent, visible address.",
            "Show the full street address in the footer and in LocalBusiness schema markup.",
            "local_seo",
        ),
        WarningCode::AddressPartialMissingStreet | WarningCode::AddressPartialFromText => template(
            "Business address is incomplete",
            "A partial address weakens local search signals and map listings.",
            "Publish the complete street address as PostalAddress structured data.",
            "local_seo",
        ),
        WarningCode::AddressBlob => template(
            "Address in structured data is not machine-readable",
            "Search engines may not parse an address stored as free text.",
            "Split the address into streetAddress, addressLocality, addressRegion and postalCode.",
            "local_seo",
        ),
        WarningCode::HoursMissing => template(
            "Opening hours are not listed",
            "Customers cannot tell when you are available and may call a competitor.",
            "Add opening hours to the contact page and to openingHoursSpecification markup.",
            "local_seo",
        ),
        WarningCode::HoursBlob => template(
            "Opening hours are not machine-readable",
            "Search engines may ignore hours they cannot parse.",
            "Express hours as openingHoursSpecification rows with dayOfWeek, opens and closes.",
            "local_seo",
        ),
        WarningCode::NameFromDomain | WarningCode::NameFromTitle => template(
            "Business name is not clearly declared",
            "Search engines and visitors may not know the exact name of the business.",
            "Declare the business name in Organization or LocalBusiness structured data.",
            "brand",
        ),
        WarningCode::LogoMissing | WarningCode::LogoOversized => template(
            "No usable logo detected",
            "A missing or oversized logo makes the brand harder to recognize.",
            "Add a properly sized logo to the header and to the Organization logo property.",
            "brand",
        ),
        WarningCode::CtaUnclear => template(
            "No clear call to action above the fold",
            "Visitors land without an obvious next step, which lowers enquiries.",
            "Place a prominent call or quote button in the first screen on desktop and mobile.",
            "conversion",
        ),
        WarningCode::PrimaryCtaNotIntent => template(
            "Above-the-fold buttons do not ask for action",
            "Buttons that only navigate do not convert visitors into leads.",
            "Reword the main button around the action you want, such as calling or requesting a quote.",
            "conversion",
        ),
        WarningCode::ServicesMissing => template(
            "Services are not clearly listed",
            "Visitors and search engines cannot see what work you do.",
            "Add a services section with one heading and short description per service.",
            "content",
        ),
        WarningCode::TrustMissing => template(
            "No trust signals found",
            "Without reviews, licensing or guarantees, visitors have little reason to choose you.",
            "Show licensing, insurance, reviews and guarantees near the main call to action.",
            "trust",
        ),
        WarningCode::ContactFormMissing => template(
            "No contact form found",
            "Visitors who will not call have no easy way to reach you.",
            "Add a short contact or quote form with name, phone and message fields.",
            "conversion",
        ),
        WarningCode::CityMissing | WarningCode::ScreenshotsMissing => return None,
    };
    Some(t)
}

fn severity_label(severity: WarningSeverity) -> &'static str {
    match severity {
        WarningSeverity::High => "high",
        WarningSeverity::Medium => "medium",
        WarningSeverity::Low => "low",
    }
}

fn axis_fix(key: AxisKey) -> (&'static str, &'static str) {
    match key {
        AxisKey::LocalSeo => (
            "Local search visibility is limited.",
            "Complete your NAP details and add LocalBusiness structured data.",
        ),
        AxisKey::GeoSignals => (
            "Search engines cannot tie the site to your service area.",
            "Mention your city in the main heading and list the areas you serve.",
        ),
        AxisKey::Content => (
            "Thin or missing pages give search engines little to rank.",
            "Build out dedicated service, about and location pages with useful detail.",
        ),
        AxisKey::Design => (
            "Mobile visitors struggle to read and navigate the site.",
            "Fix mobile layout problems and simplify the first screen.",
        ),
        AxisKey::Trust => (
            "Visitors see little proof that you are reliable.",
            "Add reviews, licensing, insurance and guarantees to key pages.",
        ),
        AxisKey::Conversion => (
            "The path from visit to enquiry has too much friction.",
            "Make calling and requesting a quote possible from every screen.",
        ),
    }
}

fn issue(title: String, severity: &str, impact: &str, fix: &str, category: &str, source: &str) -> RawIssue {
    RawIssue {
        title,
        severity: severity.to_string(),
        impact: impact.to_string(),
        fix: fix.to_string(),
        category: category.to_string(),
        source: source.to_string(),
    }
}

/// Collects raw issue candidates from the pack, the snapshot and upstream
/// mobile findings, in that order.
#[must_use]
pub fn detect_issues(
    pack: &EvidencePack,
    snapshot: &HealthSnapshot,
    signals: &SiteSignals,
) -> Vec<RawIssue> {
    let mut out = Vec::new();

    for warning in &pack.data_quality_warnings {
        if let Some(t) = warning_template(warning.code) {
            out.push(issue(
                t.title.to_string(),
                severity_label(warning.severity),
                t.impact,
                t.fix,
                t.category,
                "data_quality",
            ));
        }
    }

    for metric in &snapshot.metrics {
        let (severity, verdict) = match metric.status {
            StatusTier::Critical => ("critical", "critically weak"),
            StatusTier::Warning => ("warning", "below par"),
            StatusTier::Good => continue,
        };
        let (impact, fix) = axis_fix(metric.key);
        out.push(issue(
            format!("{} score is {verdict} ({}/100)", metric.label, metric.score),
            severity,
            impact,
            fix,
            "health",
            "health_snapshot",
        ));
    }

    for finding in &signals.mobile_issues {
        let title = finding.trim();
        if title.is_empty() {
            continue;
        }
        out.push(issue(
            title.to_string(),
            "medium",
            "Mobile visitors may give up before they contact you.",
            "Fix the issue on small screens and re-test with a mobile viewport.",
            "design",
            "page_analysis",
        ));
    }

    tracing::debug!(count = out.len(), "detected raw issues");
    out
}
