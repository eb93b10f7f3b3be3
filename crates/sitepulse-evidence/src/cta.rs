//! Call-to-action intent classification and primary election.

use sitepulse_core::{
    ClassifiedCta, CtaCandidate, CtaIntent, CtaMap, LinkTarget, PrimaryCta, Provenance, Sourced,
    Staged, WarningCode,
};

use crate::text::{collapse_whitespace, contains_term, tokens};

pub const ABOVE_FOLD_POINTS: i32 = 50;
pub const PHONE_TARGET_POINTS: i32 = 40;
pub const BUTTON_POINTS: i32 = 20;
pub const INTENT_POINTS: i32 = 10;

/// Structural navigation labels that are never conversion actions.
const NAV_TEXT: &[&str] = &["home", "services", "about"];

const BUTTON_HINTS: &[&str] = &["button", "btn", "cta"];

const CALL_WORDS: &[&str] = &["call", "emergency", "phone"];
const QUOTE_WORDS: &[&str] = &["quote", "quotes"];
const ESTIMATE_WORDS: &[&str] = &["estimate", "estimates"];
const SCHEDULE_WORDS: &[&str] = &["schedule", "appointment", "appointments"];
const BOOK_WORDS: &[&str] = &["book", "booking"];
const CONTACT_WORDS: &[&str] = &["contact", "email", "message", "get in touch", "reach us"];

fn normalize(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

fn mentions(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

fn has_any(tokens: &[String], words: &[&str]) -> bool {
    words.iter().any(|w| contains_term(tokens, w))
}

/// Infers the intent of a candidate.
///
/// An explicit upstream tag in the allowed set wins; otherwise the link
/// target and the text's whole-word tokens are matched against fixed
/// keyword rules, so "Facebook" is not a booking.
#[must_use]
pub fn classify_intent(candidate: &CtaCandidate) -> Option<CtaIntent> {
    if let Some(tagged) = candidate.intent.as_deref().and_then(CtaIntent::from_tag) {
        return Some(tagged);
    }

    let words = tokens(&candidate.text);
    let round_the_clock = candidate.text.contains("24/7");
    if candidate.target == LinkTarget::Tel || round_the_clock || has_any(&words, CALL_WORDS) {
        Some(CtaIntent::Call)
    } else if has_any(&words, QUOTE_WORDS) {
        Some(CtaIntent::Quote)
    } else if has_any(&words, ESTIMATE_WORDS) {
        Some(CtaIntent::Estimate)
    } else if has_any(&words, SCHEDULE_WORDS) {
        Some(CtaIntent::Schedule)
    } else if has_any(&words, BOOK_WORDS) {
        Some(CtaIntent::Book)
    } else if candidate.target == LinkTarget::Mailto || has_any(&words, CONTACT_WORDS) {
        Some(CtaIntent::Contact)
    } else {
        None
    }
}

fn is_button_like(candidate: &CtaCandidate) -> bool {
    candidate
        .dom_context
        .as_deref()
        .map(str::to_ascii_lowercase)
        .is_some_and(|ctx| mentions(&ctx, BUTTON_HINTS))
}

/// Classifies and scores one candidate.
#[must_use]
pub fn classify(candidate: &CtaCandidate) -> ClassifiedCta {
    let intent = classify_intent(candidate);
    let above_fold = candidate.above_fold();
    let button_like = is_button_like(candidate);
    let excluded = candidate.in_nav || NAV_TEXT.contains(&normalize(&candidate.text).as_str());

    let mut score = 0;
    if above_fold {
        score += ABOVE_FOLD_POINTS;
    }
    if candidate.target == LinkTarget::Tel {
        score += PHONE_TARGET_POINTS;
    }
    if button_like {
        score += BUTTON_POINTS;
    }
    if intent.is_some() {
        score += INTENT_POINTS;
    }

    ClassifiedCta {
        text: collapse_whitespace(&candidate.text),
        href: candidate.href.clone(),
        target: candidate.target,
        intent,
        above_fold,
        in_nav: candidate.in_nav,
        button_like,
        score,
        excluded,
    }
}

/// Elects the primary CTA among classified candidates.
///
/// Only non-excluded, above-fold candidates with an intent are eligible; the
/// highest score wins and input order breaks ties.
#[must_use]
pub fn select_primary(candidates: &[ClassifiedCta]) -> Option<PrimaryCta> {
    candidates
        .iter()
        .filter(|c| !c.excluded && c.above_fold)
        .filter_map(|c| c.intent.map(|intent| (c, intent)))
        .fold(None::<(&ClassifiedCta, CtaIntent)>, |best, (c, intent)| match best {
            Some((b, _)) if b.score >= c.score => best,
            _ => Some((c, intent)),
        })
        .map(|(c, intent)| PrimaryCta {
            text: c.text.clone(),
            href: c.href.clone(),
            target: c.target,
            intent,
            score: c.score,
        })
}

/// Builds the CTA map from the home page's candidates.
#[must_use]
pub fn build_cta_map(candidates: &[CtaCandidate]) -> Staged<CtaMap> {
    let classified: Vec<ClassifiedCta> = candidates.iter().map(classify).collect();
    let primary = select_primary(&classified);

    let mut staged = Staged::new(CtaMap {
        primary: Sourced::from(primary.map(|p| (p, Provenance::AboveFoldCta))),
        candidates: classified,
    });

    if !staged.value.primary.is_present() {
        let above_fold_actions = staged
            .value
            .candidates
            .iter()
            .any(|c| c.above_fold && !c.excluded);
        if above_fold_actions {
            staged.warn(
                WarningCode::PrimaryCtaNotIntent,
                "above-the-fold calls to action exist but none has a clear intent",
            );
        } else {
            staged.warn(
                WarningCode::CtaUnclear,
                "no above-the-fold call to action found",
            );
        }
    }
    tracing::debug!(
        candidates = staged.value.candidates.len(),
        primary = staged.value.primary.is_present(),
        "elected primary cta"
    );
    staged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cta(text: &str, target: LinkTarget, above_fold: bool) -> CtaCandidate {
        CtaCandidate {
            text: text.to_string(),
            target,
            above_fold_desktop: above_fold,
            ..CtaCandidate::default()
        }
    }

    #[test]
    fn keyword_rules() {
        assert_eq!(
            classify_intent(&cta("Get a Free Quote", LinkTarget::Internal, true)),
            Some(CtaIntent::Quote)
        );
        assert_eq!(
            classify_intent(&cta("(305) 555-0100", LinkTarget::Tel, true)),
            Some(CtaIntent::Call)
        );
        assert_eq!(
            classify_intent(&cta("24/7 Service", LinkTarget::Internal, true)),
            Some(CtaIntent::Call)
        );
        assert_eq!(
            classify_intent(&cta("Book Online", LinkTarget::External, true)),
            Some(CtaIntent::Book)
        );
        assert_eq!(
            classify_intent(&cta("Learn more", LinkTarget::Internal, true)),
            None
        );
    }

    #[test]
    fn keywords_match_whole_words_only() {
        for text in ["Facebook", "Like us on Facebook", "iPhone app", "Product recall"] {
            assert_eq!(
                classify_intent(&cta(text, LinkTarget::External, true)),
                None,
                "{text}"
            );
        }
        assert_eq!(
            classify_intent(&cta("Get in touch", LinkTarget::Internal, true)),
            Some(CtaIntent::Contact)
        );
    }

    #[test]
    fn social_icon_is_not_elected_primary() {
        let staged = build_cta_map(&[cta("Facebook", LinkTarget::External, true)]);
        assert_eq!(staged.value.primary, Sourced::Absent);
        assert!(staged.has_warning(WarningCode::PrimaryCtaNotIntent));
    }

    #[test]
    fn explicit_tag_wins_only_when_allowed() {
        let mut c = cta("Learn more", LinkTarget::Internal, true);
        c.intent = Some("schedule".to_string());
        assert_eq!(classify_intent(&c), Some(CtaIntent::Schedule));
        c.intent = Some("newsletter".to_string());
        assert_eq!(classify_intent(&c), None);
    }

    #[test]
    fn scoring_adds_each_signal() {
        let mut c = cta("Call Now", LinkTarget::Tel, true);
        c.dom_context = Some("a.btn.btn-primary".to_string());
        assert_eq!(classify(&c).score, 120);
        assert_eq!(classify(&cta("Call Now", LinkTarget::Tel, false)).score, 50);
    }

    #[test]
    fn nav_home_is_never_primary() {
        let mut home = cta("Home", LinkTarget::Internal, true);
        home.in_nav = true;
        home.intent = Some("contact".to_string());
        let staged = build_cta_map(&[home]);
        assert_eq!(staged.value.primary, Sourced::Absent);
        assert!(staged.has_warning(WarningCode::CtaUnclear));
    }

    #[test]
    fn structural_text_is_excluded_even_outside_nav() {
        let mut services = cta(" Services ", LinkTarget::Internal, true);
        services.intent = Some("contact".to_string());
        assert!(classify(&services).excluded);
    }

    #[test]
    fn ties_break_by_input_order() {
        let staged = build_cta_map(&[
            cta("Get a Quote", LinkTarget::Internal, true),
            cta("Free Estimate", LinkTarget::Internal, true),
        ]);
        let primary = staged.value.primary.value().unwrap();
        assert_eq!(primary.text, "Get a Quote");
        assert_eq!(staged.value.primary.source(), Some(Provenance::AboveFoldCta));
    }

    #[test]
    fn phone_link_outranks_button() {
        let mut quote = cta("Get a Quote", LinkTarget::Internal, true);
        quote.dom_context = Some("button".to_string());
        let staged = build_cta_map(&[quote, cta("Call (305) 555-0100", LinkTarget::Tel, true)]);
        assert_eq!(
            staged.value.primary.value().map(|p| p.intent),
            Some(CtaIntent::Call)
        );
    }

    #[test]
    fn above_fold_without_intent_warns_not_intent() {
        let staged = build_cta_map(&[cta("Learn more", LinkTarget::Internal, true)]);
        assert!(staged.has_warning(WarningCode::PrimaryCtaNotIntent));
        assert!(!staged.has_warning(WarningCode::CtaUnclear));
    }
}
