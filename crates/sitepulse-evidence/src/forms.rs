use sitepulse_core::{ContactForm, ContactFormDetection, DetectedForm, PageRecord, Staged, WarningCode};

const IGNORED_PURPOSES: &[&str] = &["search", "newsletter", "subscribe", "login", "signup"];
const CONTACT_PURPOSES: &[&str] = &[
    "contact",
    "quote",
    "estimate",
    "booking",
    "appointment",
    "request",
];
const CONTACT_FIELDS: &[&str] = &[
    "email", "phone", "tel", "message", "comment", "inquiry", "details",
];
const MIN_HEURISTIC_FIELDS: usize = 2;

fn purpose(form: &DetectedForm) -> String {
    form.purpose
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// How `form` qualifies as a contact form, if it does.
#[must_use]
pub fn detect(form: &DetectedForm) -> Option<ContactFormDetection> {
    let purpose = purpose(form);
    if IGNORED_PURPOSES.iter().any(|p| purpose.contains(p)) {
        return None;
    }
    if CONTACT_PURPOSES.iter().any(|p| purpose.contains(p)) {
        return Some(ContactFormDetection::PurposeLabel);
    }
    let contactish = form.fields.iter().any(|field| {
        let field = field.to_ascii_lowercase();
        CONTACT_FIELDS.iter().any(|c| field.contains(c))
    });
    (form.fields.len() >= MIN_HEURISTIC_FIELDS && contactish)
        .then_some(ContactFormDetection::FieldHeuristic)
}

/// Reports the first contact form across canonically ordered `pages`.
/// Purpose-labelled forms are preferred over heuristic matches.
#[must_use]
pub fn detect_contact_form(pages: &[&PageRecord]) -> Staged<ContactForm> {
    let detected: Vec<(&DetectedForm, ContactFormDetection)> = pages
        .iter()
        .flat_map(|p| p.forms.iter())
        .filter_map(|f| detect(f).map(|d| (f, d)))
        .collect();

    let chosen = detected
        .iter()
        .find(|(_, d)| *d == ContactFormDetection::PurposeLabel)
        .or_else(|| detected.first());

    match chosen {
        Some((form, detection)) => Staged::new(ContactForm {
            contact_form_detected: true,
            contact_form_fields_count: form.fields.len(),
            contact_form_fields: form.fields.clone(),
            detection_source: Some(*detection),
        }),
        None => Staged::new(ContactForm::default())
            .with_warning(WarningCode::ContactFormMissing, "no contact form detected"),
    }
}
