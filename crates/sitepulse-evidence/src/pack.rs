//! Evidence Pack assembly.

use std::collections::BTreeSet;

use sitepulse_core::{
    AuditJob, CompanyProfile, CoreError, EvidencePack, NicheVocabulary, PageRecord,
    ScreenshotBundle, ScreenshotsAvailable, SiteSignals, Staged, StructuredDataSummary,
    WarningCode,
};

use crate::address::resolve_address;
use crate::contact::merge_contacts;
use crate::cta::build_cta_map;
use crate::forms::detect_contact_form;
use crate::hours::resolve_hours;
use crate::identity::resolve_name;
use crate::jsonld;
use crate::logo::resolve_logo;
use crate::pages::{order_pages, PageClassifier};
use crate::services::extract_services;
use crate::signals::collect_signals;
use crate::social::resolve_social_links;
use crate::trust::extract_trust;

/// The Evidence Pack plus the raw statistics the health scorer needs.
#[derive(Debug, Clone)]
pub struct EvidenceOutput {
    pub pack: EvidencePack,
    pub signals: SiteSignals,
}

/// Summarizes which schema.org shapes appear across `pages`.
#[must_use]
pub fn summarize_structured_data(pages: &[&PageRecord]) -> StructuredDataSummary {
    let mut summary = StructuredDataSummary::default();
    let mut types = BTreeSet::new();
    for node in pages.iter().flat_map(|p| jsonld::nodes(&p.structured_data)) {
        types.extend(jsonld::type_names(node).into_iter().map(str::to_string));
        summary.has_organization |= jsonld::is_organization(node);
        summary.has_local_business |= jsonld::is_local_business(node);
        summary.has_aggregate_rating |= node.contains_key("aggregateRating");
        summary.has_opening_hours |= node.contains_key("openingHoursSpecification")
            || node.contains_key("openingHours");
    }
    summary.types = types.into_iter().collect();
    summary
}

fn present(path: Option<&String>) -> bool {
    path.is_some_and(|p| !p.trim().is_empty())
}

fn screenshots_available(bundle: &ScreenshotBundle) -> ScreenshotsAvailable {
    ScreenshotsAvailable {
        above_fold: present(bundle.above_fold.as_ref()),
        fullpage: present(bundle.fullpage.as_ref()),
    }
}

/// Runs every evidence stage over `job` and assembles the pack.
///
/// Pages are put in canonical order first, so the pack does not depend on
/// the order the crawler emitted them in. Soft gaps become warnings on the
/// pack; the only error is a missing niche.
///
/// # Errors
///
/// Returns [`CoreError::MissingRequiredInput`] when the job has no niche.
pub fn build_evidence(
    job: &AuditJob,
    vocabulary: &NicheVocabulary,
) -> Result<EvidenceOutput, CoreError> {
    let niche = job.require_niche()?;
    let niche_terms = vocabulary.terms_for(niche);
    let classifier = PageClassifier::new(niche_terms);
    let pages = order_pages(&job.pages);
    tracing::debug!(niche, pages = pages.len(), "building evidence pack");

    let mut run = Staged::new(());
    let company_name = run.absorb(resolve_name(&pages, &job.base_url));
    let logo_url = run.absorb(resolve_logo(&pages));
    let contacts = run.absorb(merge_contacts(&pages));
    let address = run.absorb(resolve_address(&pages));
    let hours = run.absorb(resolve_hours(&pages));
    let social_links = resolve_social_links(&pages, address.value());
    let contact_form = run.absorb(detect_contact_form(&pages));
    let home_candidates = pages
        .first()
        .map(|home| home.cta_candidates.as_slice())
        .unwrap_or_default();
    let cta_map = run.absorb(build_cta_map(home_candidates));
    let services = run.absorb(extract_services(&pages, niche_terms));
    let trust = run.absorb(extract_trust(&pages));

    if job.city().is_none() {
        run.warn(WarningCode::CityMissing, "job has no target city");
    }
    let screenshots = screenshots_available(&job.screenshots);
    if !screenshots.above_fold && !screenshots.fullpage {
        run.warn(WarningCode::ScreenshotsMissing, "no screenshots were captured");
    }

    let pack = EvidencePack {
        company_name,
        logo_url,
        company_profile: CompanyProfile {
            phones: contacts.phones,
            emails: contacts.emails,
            address,
            hours,
            social_links,
        },
        contact_form,
        cta_map,
        services,
        trust,
        structured_data: summarize_structured_data(&pages),
        screenshots_available: screenshots,
        data_quality_warnings: run.warnings,
    };
    let signals = collect_signals(job, &pages, classifier, &pack);

    tracing::info!(
        niche,
        company = ?pack.company_name.value(),
        warnings = pack.data_quality_warnings.len(),
        "evidence pack built"
    );
    Ok(EvidenceOutput { pack, signals })
}

#[cfg(test)]
#[path = "pack_test.rs"]
mod tests;
