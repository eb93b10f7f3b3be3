use proptest::prelude::*;
use sitepulse_core::{LocalFactor, StatusTier};

use super::*;

fn page(role: PageRole, words: u32, hash: &str) -> PageStat {
    PageStat {
        url: format!("https://x.com/{hash}-{words}"),
        role,
        word_count: words,
        content_hash: hash.to_string(),
    }
}

fn geo_factor(earned: f64) -> LocalFactor {
    LocalFactor {
        key: "geo".to_string(),
        label: "Geo".to_string(),
        weight: 10.0,
        earned,
        geo: true,
    }
}

#[test]
fn trust_levels_map_through_adjustment() {
    let at = |level| {
        trust(&SiteSignals {
            trust_level: Some(level),
            ..SiteSignals::default()
        })
        .score
    };
    assert_eq!(at(TrustLevel::Strong), 53);
    assert_eq!(at(TrustLevel::Ok), 38);
    assert_eq!(at(TrustLevel::Weak), 19);
    assert_eq!(trust(&SiteSignals::default()).score, 19);
}

#[test]
fn conversion_uses_friction_and_skips_adjustment() {
    let signals = SiteSignals {
        ux_score: Some(100.0),
        friction_level: Some(FrictionLevel::Low),
        ..SiteSignals::default()
    };
    assert_eq!(conversion(&EvidencePack::default(), &signals).score, 90);

    let signals = SiteSignals {
        ux_score: Some(40.0),
        friction_level: Some(FrictionLevel::Medium),
        ..SiteSignals::default()
    };
    assert_eq!(conversion(&EvidencePack::default(), &signals).score, 39);

    let metric = conversion(&EvidencePack::default(), &SiteSignals::default());
    assert_eq!(metric.score, 0);
    assert_eq!(metric.status, StatusTier::Critical);
}

#[test]
fn design_blends_and_penalizes_issues() {
    assert_eq!(design(&SiteSignals::default()).score, 35);

    let signals = SiteSignals {
        mobile_score: Some(60.0),
        clarity_score: Some(40.0),
        ..SiteSignals::default()
    };
    // 45 * 0.6 + 30 * 0.4
    assert_eq!(design(&signals).score, 39);

    let signals = SiteSignals {
        mobile_score: Some(60.0),
        mobile_issues: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        ..SiteSignals::default()
    };
    assert_eq!(design(&signals).score, 27);
}

#[test]
fn geo_penalties_only_hit_legacy_sets() {
    let signals = SiteSignals::default();
    let pack = EvidencePack::default();
    let template = FactorSet {
        origin: FactorOrigin::Template,
        factors: vec![geo_factor(10.0)],
    };
    let legacy = FactorSet {
        origin: FactorOrigin::Legacy,
        ..template.clone()
    };
    // raw 100 -> 69 before penalties
    assert_eq!(geo_signals(&template, &pack, &signals).score, 69);
    assert_eq!(geo_signals(&legacy, &pack, &signals).score, 19);
}

#[test]
fn content_rewards_coverage_and_depth() {
    let signals = SiteSignals {
        pages: vec![
            page(PageRole::Home, 700, "h"),
            page(PageRole::Services, 800, "s"),
            page(PageRole::About, 400, "a"),
            page(PageRole::Faq, 250, "f"),
        ],
        ..SiteSignals::default()
    };
    // coverage 30 + home 17 + services 12 + rich 2 = 61, adjusted
    assert_eq!(content(&signals).score, 46);
}

#[test]
fn full_coverage_content_is_capped_at_warning() {
    let signals = SiteSignals {
        pages: vec![
            page(PageRole::Home, 1500, "h"),
            page(PageRole::Services, 1500, "s"),
            page(PageRole::About, 400, "a"),
            page(PageRole::Locations, 400, "l"),
            page(PageRole::Faq, 400, "f"),
            page(PageRole::Blog, 400, "b"),
        ],
        ..SiteSignals::default()
    };
    // 40 + 20 + 15 + 5 = 80 -> 80 * 0.75 - 6
    let metric = content(&signals);
    assert_eq!(metric.score, 54);
    assert_eq!(metric.status, StatusTier::Warning);
}

#[test]
fn content_duplicate_penalty_needs_ten_pages() {
    let blog = |n: usize| -> Vec<PageStat> {
        let mut pages: Vec<PageStat> = (0..n)
            .map(|i| page(PageRole::Blog, 400, &format!("b{i}")))
            .collect();
        pages[1].content_hash = "b0".to_string();
        pages
    };
    let score = |pages| {
        content(&SiteSignals {
            pages,
            ..SiteSignals::default()
        })
        .score
    };
    // coverage 4 + rich 5 = 9, adjusted
    assert_eq!(score(blog(9)), 7);
    // two of ten pages share a hash: 6.75 - 0.2 * 40
    assert_eq!(score(blog(10)), 0);
}

#[test]
fn thin_pages_cost_points() {
    let signals = SiteSignals {
        pages: vec![
            page(PageRole::Home, 100, "h"),
            page(PageRole::Services, 100, "s"),
        ],
        ..SiteSignals::default()
    };
    // (18 + 8 + 2) * 0.75 - 10
    assert_eq!(content(&signals).score, 11);
}

fn role_strategy() -> impl Strategy<Value = PageRole> {
    prop_oneof![
        Just(PageRole::Home),
        Just(PageRole::Services),
        Just(PageRole::About),
        Just(PageRole::Faq),
        Just(PageRole::Blog),
        Just(PageRole::Contact),
        Just(PageRole::Other),
    ]
}

proptest! {
    #[test]
    fn every_axis_stays_in_range(
        mobile in proptest::option::of(-1.0e6..1.0e6_f64),
        clarity in proptest::option::of(-1.0e6..1.0e6_f64),
        ux in proptest::option::of(-1.0e6..1.0e6_f64),
        issues in 0usize..20,
        mentions in 0u32..1000,
        earned in -1.0e6..1.0e6_f64,
        pages in proptest::collection::vec((role_strategy(), 0u32..5000, 0u8..4), 0..30),
    ) {
        let signals = SiteSignals {
            pages: pages
                .iter()
                .map(|(role, words, h)| page(*role, *words, &h.to_string()))
                .collect(),
            city_mentions: mentions,
            mobile_score: mobile,
            clarity_score: clarity,
            mobile_issues: vec!["x".to_string(); issues],
            ux_score: ux,
            ..SiteSignals::default()
        };
        let pack = EvidencePack::default();
        let legacy = FactorSet {
            origin: FactorOrigin::Legacy,
            factors: vec![geo_factor(earned)],
        };
        for metric in [
            local_seo(&legacy),
            geo_signals(&legacy, &pack, &signals),
            content(&signals),
            design(&signals),
            trust(&signals),
            conversion(&pack, &signals),
        ] {
            prop_assert!(metric.score <= 100);
            prop_assert_eq!(metric.status, StatusTier::from_score(metric.score));
        }
    }
}
