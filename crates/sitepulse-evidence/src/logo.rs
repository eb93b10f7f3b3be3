use std::collections::HashSet;

use sitepulse_core::{
    AssetSource, BrandAssetCandidate, PageRecord, Provenance, Sourced, Staged, WarningCode,
};

/// Wider than this is a hero banner, not a logo.
pub const MAX_LOGO_WIDTH: u32 = 1500;
/// Taller than this is a hero banner, not a logo.
pub const MAX_LOGO_HEIGHT: u32 = 800;

fn provenance(source: AssetSource) -> Provenance {
    match source {
        AssetSource::JsonldLogo => Provenance::JsonldLogo,
        AssetSource::HeaderImage => Provenance::HeaderImage,
        AssetSource::OgImage => Provenance::OgImage,
        AssetSource::SiteIcon => Provenance::SiteIcon,
        AssetSource::Image => Provenance::PageImage,
    }
}

/// Unknown dimensions are given the benefit of the doubt.
fn within_bounds(candidate: &BrandAssetCandidate) -> bool {
    candidate.width.is_none_or(|w| w <= MAX_LOGO_WIDTH)
        && candidate.height.is_none_or(|h| h <= MAX_LOGO_HEIGHT)
}

/// Highest priority wins; the earlier candidate wins ties.
fn best<'a, I>(candidates: I) -> Option<&'a BrandAssetCandidate>
where
    I: IntoIterator<Item = &'a BrandAssetCandidate>,
{
    candidates.into_iter().fold(None, |best, c| match best {
        Some(b) if b.priority >= c.priority => Some(b),
        _ => Some(c),
    })
}

/// Picks the logo from every page's brand-asset candidates.
///
/// The highest-priority candidate within 1500x800 wins. When every
/// candidate is oversize the highest-priority one is used anyway and a
/// warning records it.
#[must_use]
pub fn resolve_logo(pages: &[&PageRecord]) -> Staged<Sourced<String>> {
    let mut seen = HashSet::new();
    let candidates: Vec<&BrandAssetCandidate> = pages
        .iter()
        .flat_map(|p| p.brand_assets.iter())
        .filter(|c| !c.url.trim().is_empty())
        .filter(|c| seen.insert(c.url.trim().to_string()))
        .collect();

    if let Some(logo) = best(candidates.iter().copied().filter(|c| within_bounds(c))) {
        return Staged::new(Sourced::present(
            logo.url.trim().to_string(),
            provenance(logo.source),
        ));
    }

    match best(candidates.iter().copied()) {
        Some(logo) => {
            tracing::debug!(
                url = %logo.url,
                width = ?logo.width,
                height = ?logo.height,
                "only oversize logo candidates available"
            );
            Staged::new(Sourced::present(
                logo.url.trim().to_string(),
                provenance(logo.source),
            ))
            .with_warning(
                WarningCode::LogoOversized,
                "every logo candidate exceeds 1500x800; using the highest ranked",
            )
        }
        None => Staged::new(Sourced::Absent)
            .with_warning(WarningCode::LogoMissing, "no logo candidate found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(url: &str, source: AssetSource, priority: i32, dims: Option<(u32, u32)>) -> BrandAssetCandidate {
        BrandAssetCandidate {
            url: url.to_string(),
            source,
            priority,
            width: dims.map(|d| d.0),
            height: dims.map(|d| d.1),
        }
    }

    fn page(assets: Vec<BrandAssetCandidate>) -> PageRecord {
        PageRecord {
            brand_assets: assets,
            ..PageRecord::default()
        }
    }

    #[test]
    fn oversize_banner_is_skipped_for_smaller_candidate() {
        let p = page(vec![
            asset("https://x.com/hero.jpg", AssetSource::HeaderImage, 90, Some((1920, 1080))),
            asset("https://x.com/logo.svg", AssetSource::JsonldLogo, 80, None),
        ]);
        let staged = resolve_logo(&[&p]);
        assert_eq!(
            staged.value,
            Sourced::present("https://x.com/logo.svg".to_string(), Provenance::JsonldLogo)
        );
        assert!(staged.warnings.is_empty());
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let p = page(vec![
            asset("https://x.com/a.png", AssetSource::Image, 50, Some((200, 80))),
            asset("https://x.com/b.png", AssetSource::OgImage, 50, Some((200, 80))),
        ]);
        let staged = resolve_logo(&[&p]);
        assert_eq!(staged.value.source(), Some(Provenance::PageImage));
    }

    #[test]
    fn all_oversize_uses_highest_and_warns() {
        let p = page(vec![
            asset("https://x.com/a.jpg", AssetSource::OgImage, 10, Some((1600, 900))),
            asset("https://x.com/b.jpg", AssetSource::HeaderImage, 20, Some((2000, 600))),
        ]);
        let staged = resolve_logo(&[&p]);
        assert_eq!(
            staged.value.value().map(String::as_str),
            Some("https://x.com/b.jpg")
        );
        assert!(staged.has_warning(WarningCode::LogoOversized));
    }

    #[test]
    fn no_candidates_warns_missing() {
        let p = page(Vec::new());
        let staged = resolve_logo(&[&p]);
        assert_eq!(staged.value, Sourced::Absent);
        assert!(staged.has_warning(WarningCode::LogoMissing));
    }
}
