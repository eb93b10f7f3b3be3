//! Weighted local-search factors.
//!
//! An upstream audit may ship its own factor set. Otherwise the engine
//! computes one from the Evidence Pack and site signals, tagged
//! [`FactorOrigin::Template`].

use sitepulse_core::{EvidencePack, FactorOrigin, FactorSet, LocalFactor, Provenance, SiteSignals};

const NAP_WEIGHT: f64 = 25.0;
const LOCAL_BUSINESS_SCHEMA_WEIGHT: f64 = 15.0;
const CITY_IN_H1_WEIGHT: f64 = 10.0;
const CITY_MENTIONS_WEIGHT: f64 = 15.0;
const SERVICE_AREA_WEIGHT: f64 = 10.0;
const OPENING_HOURS_WEIGHT: f64 = 10.0;
const AGGREGATE_RATING_WEIGHT: f64 = 15.0;

/// Mentions past this count earn nothing more.
const CITY_MENTIONS_CAP: u32 = 5;
const POINTS_PER_MENTION: f64 = 3.0;

fn factor(key: &str, label: &str, weight: f64, earned: f64, geo: bool) -> LocalFactor {
    LocalFactor {
        key: key.to_string(),
        label: label.to_string(),
        weight,
        earned,
        geo,
    }
}

fn all_or_nothing(key: &str, label: &str, weight: f64, present: bool, geo: bool) -> LocalFactor {
    factor(key, label, weight, if present { weight } else { 0.0 }, geo)
}

/// Name, address and phone each earn a third of the NAP weight. A name
/// guessed from the domain does not count.
fn nap_points(pack: &EvidencePack) -> f64 {
    let name = pack
        .company_name
        .source()
        .is_some_and(|s| s != Provenance::DomainFallback);
    let address = pack.company_profile.address.is_present();
    let phone = !pack.company_profile.phones.is_empty();
    let parts: u8 = [name, address, phone].into_iter().map(u8::from).sum();
    NAP_WEIGHT * f64::from(parts) / 3.0
}

/// Computes the engine's own factor set.
#[must_use]
pub fn template_factors(pack: &EvidencePack, signals: &SiteSignals) -> FactorSet {
    let structured = &pack.structured_data;
    let mentions = signals.city_mentions.min(CITY_MENTIONS_CAP);
    FactorSet {
        origin: FactorOrigin::Template,
        factors: vec![
            factor("nap", "Name, address & phone", NAP_WEIGHT, nap_points(pack), false),
            all_or_nothing(
                "local_business_schema",
                "LocalBusiness structured data",
                LOCAL_BUSINESS_SCHEMA_WEIGHT,
                structured.has_local_business,
                true,
            ),
            all_or_nothing(
                "city_in_h1",
                "City in main heading",
                CITY_IN_H1_WEIGHT,
                signals.city_in_h1,
                true,
            ),
            factor(
                "city_mentions",
                "City mentions",
                CITY_MENTIONS_WEIGHT,
                f64::from(mentions) * POINTS_PER_MENTION,
                true,
            ),
            all_or_nothing(
                "service_area",
                "Defined service area",
                SERVICE_AREA_WEIGHT,
                !pack.services.service_areas.is_empty(),
                true,
            ),
            all_or_nothing(
                "opening_hours_schema",
                "Opening hours in structured data",
                OPENING_HOURS_WEIGHT,
                structured.has_opening_hours,
                false,
            ),
            all_or_nothing(
                "aggregate_rating",
                "Aggregate rating",
                AGGREGATE_RATING_WEIGHT,
                structured.has_aggregate_rating,
                false,
            ),
        ],
    }
}

/// The upstream factor set when one was supplied, else the template set.
#[must_use]
pub fn resolve_factors(pack: &EvidencePack, signals: &SiteSignals) -> FactorSet {
    match &signals.local_factors {
        Some(set) if !set.factors.is_empty() => set.clone(),
        _ => template_factors(pack, signals),
    }
}

/// Earned points as a 0–100 share of total weight. Each factor's earned
/// value is held inside `[0, weight]`; an empty or weightless set is zero.
#[must_use]
pub fn earned_percent<'a, I>(factors: I) -> f64
where
    I: IntoIterator<Item = &'a LocalFactor>,
{
    let (earned, total) = factors
        .into_iter()
        .filter(|f| f.weight.is_finite() && f.weight > 0.0)
        .fold((0.0, 0.0), |(earned, total), f| {
            let got = if f.earned.is_nan() {
                0.0
            } else {
                f.earned.clamp(0.0, f.weight)
            };
            (earned + got, total + f.weight)
        });
    if total > 0.0 {
        earned / total * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use sitepulse_core::{Address, PhoneEntry, Sourced};

    use super::*;

    fn earned(set: &FactorSet, key: &str) -> f64 {
        set.factors
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.earned)
            .unwrap()
    }

    #[test]
    fn nap_ignores_domain_guesses() {
        let mut pack = EvidencePack::default();
        pack.company_name = Sourced::present("Miami Plumbing".to_string(), Provenance::DomainFallback);
        pack.company_profile.phones.push(PhoneEntry {
            value: "(305) 555-0100".to_string(),
            source: Provenance::AnchorTarget,
        });
        let set = template_factors(&pack, &SiteSignals::default());
        assert!((earned(&set, "nap") - 25.0 / 3.0).abs() < 1e-9);

        pack.company_name = Sourced::present("Empire Plumbing".to_string(), Provenance::JsonldOrganization);
        pack.company_profile.address = Sourced::present(Address::default(), Provenance::AddressText);
        let set = template_factors(&pack, &SiteSignals::default());
        assert!((earned(&set, "nap") - 25.0).abs() < 1e-9);
    }

    #[test]
    fn city_mentions_scale_to_fifteen() {
        let signals = SiteSignals {
            city_mentions: 2,
            ..SiteSignals::default()
        };
        let set = template_factors(&EvidencePack::default(), &signals);
        assert!((earned(&set, "city_mentions") - 6.0).abs() < 1e-9);

        let signals = SiteSignals {
            city_mentions: 40,
            ..SiteSignals::default()
        };
        let set = template_factors(&EvidencePack::default(), &signals);
        assert!((earned(&set, "city_mentions") - 15.0).abs() < 1e-9);
        assert_eq!(set.origin, FactorOrigin::Template);
    }

    #[test]
    fn upstream_factors_win_when_present() {
        let upstream = FactorSet {
            origin: FactorOrigin::Legacy,
            factors: vec![factor("gbp", "Business profile", 10.0, 5.0, true)],
        };
        let signals = SiteSignals {
            local_factors: Some(upstream.clone()),
            ..SiteSignals::default()
        };
        let set = resolve_factors(&EvidencePack::default(), &signals);
        assert_eq!(set.origin, FactorOrigin::Legacy);
        assert_eq!(set.factors, upstream.factors);
    }

    #[test]
    fn earned_percent_clamps_each_factor() {
        let factors = [
            factor("a", "A", 10.0, 50.0, false),
            factor("b", "B", 10.0, -5.0, false),
            factor("c", "C", 0.0, 3.0, false),
        ];
        assert!((earned_percent(&factors) - 50.0).abs() < 1e-9);
        assert!(earned_percent(&[] as &[LocalFactor]).abs() < f64::EPSILON);
    }
}
