//! Standard resolution selection.
//!
//! Picks the catalog entry closest to an observed resolution by Euclidean
//! distance in (width, height) space. Ties go to the entry that appears
//! first in the catalog.

use crate::catalog::StandardCatalog;
use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;

use std::fmt;
use std::str::FromStr;

/// Which catalog entries are candidates for a given observed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Every catalog entry is a candidate.
    #[default]
    Nearest,
    /// Only entries whose height is strictly below the observed height.
    /// Fails with [`CoreError::NoEligibleCandidate`] when none qualify.
    BelowObservedHeight,
}

impl SelectionPolicy {
    fn admits(self, observed: &Resolution, candidate: &Resolution) -> bool {
        match self {
            SelectionPolicy::Nearest => true,
            SelectionPolicy::BelowObservedHeight => candidate.height() < observed.height(),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Nearest => write!(f, "nearest"),
            SelectionPolicy::BelowObservedHeight => write!(f, "below-height"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "nearest" => Ok(SelectionPolicy::Nearest),
            "below-height" => Ok(SelectionPolicy::BelowObservedHeight),
            other => Err(CoreError::Config(format!(
                "unknown selection policy '{other}' (expected 'nearest' or 'below-height')"
            ))),
        }
    }
}

/// Selects the normalization target for `observed` from `catalog`.
///
/// Scans the catalog in order and keeps a candidate only when it is
/// strictly closer than the current best, so the first of several
/// equidistant entries wins.
pub fn select(
    observed: Resolution,
    catalog: &StandardCatalog,
    policy: SelectionPolicy,
) -> CoreResult<Resolution> {
    let mut best: Option<(Resolution, u128)> = None;

    for candidate in catalog.iter().filter(|c| policy.admits(&observed, c)) {
        let distance = observed.squared_distance(candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((*candidate, distance)),
        }
    }

    match best {
        Some((target, distance)) => {
            log::debug!(
                "Selected {target} for {observed} (distance {:.2}, policy {policy})",
                (distance as f64).sqrt()
            );
            Ok(target)
        }
        None => Err(CoreError::NoEligibleCandidate { observed, policy }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h).unwrap()
    }

    #[test]
    fn test_catalog_entries_select_themselves() {
        let catalog = StandardCatalog::default();
        for entry in catalog.iter() {
            let chosen = select(*entry, &catalog, SelectionPolicy::Nearest).unwrap();
            assert_eq!(chosen, *entry);
            assert_eq!(chosen.squared_distance(entry), 0);
        }
    }

    #[test]
    fn test_scenario_near_1080p() {
        let catalog = StandardCatalog::default();
        assert_eq!(
            select(res(1918, 1080), &catalog, SelectionPolicy::Nearest).unwrap(),
            res(1920, 1080)
        );
        assert_eq!(
            select(res(2558, 1438), &catalog, SelectionPolicy::Nearest).unwrap(),
            res(1920, 1080)
        );
        assert_eq!(
            select(res(854, 476), &catalog, SelectionPolicy::Nearest).unwrap(),
            res(854, 480)
        );
    }

    #[test]
    fn test_remaining_default_variants() {
        let catalog = StandardCatalog::default();
        assert_eq!(
            select(res(642, 358), &catalog, SelectionPolicy::Nearest).unwrap(),
            res(640, 360)
        );
        assert_eq!(
            select(res(1250, 720), &catalog, SelectionPolicy::Nearest).unwrap(),
            res(1280, 720)
        );
        assert_eq!(
            select(res(3838, 2158), &catalog, SelectionPolicy::Nearest).unwrap(),
            res(1920, 1080)
        );
    }

    #[test]
    fn test_extreme_sizes_select_nearest() {
        let huge = res(u32::MAX, u32::MAX);
        let catalog = StandardCatalog::default();
        assert_eq!(select(huge, &catalog, SelectionPolicy::Nearest).unwrap(), res(1920, 1080));

        let wide = StandardCatalog::new(vec![res(1, 1), res(u32::MAX - 1, u32::MAX)]).unwrap();
        assert_eq!(select(huge, &wide, SelectionPolicy::Nearest).unwrap(), res(u32::MAX - 1, u32::MAX));
        assert_eq!(select(res(1, 1), &wide, SelectionPolicy::Nearest).unwrap(), res(1, 1));
        assert_eq!(
            select(huge, &wide, SelectionPolicy::BelowObservedHeight).unwrap(),
            res(1, 1)
        );
    }

    #[test]
    fn test_tie_break_prefers_catalog_order() {
        // (100, 100) is exactly 10 away from both entries.
        let observed = res(100, 100);
        let forward = StandardCatalog::new(vec![res(110, 100), res(90, 100)]).unwrap();
        let reversed = StandardCatalog::new(vec![res(90, 100), res(110, 100)]).unwrap();

        for _ in 0..3 {
            assert_eq!(select(observed, &forward, SelectionPolicy::Nearest).unwrap(), res(110, 100));
            assert_eq!(select(observed, &reversed, SelectionPolicy::Nearest).unwrap(), res(90, 100));
        }
    }

    #[test]
    fn test_below_height_filters_candidates() {
        let catalog = StandardCatalog::default();
        // 1918x1080 may not pick 1920x1080 (same height) under the restricted policy.
        assert_eq!(
            select(res(1918, 1080), &catalog, SelectionPolicy::BelowObservedHeight).unwrap(),
            res(1280, 720)
        );
        assert_eq!(
            select(res(642, 358), &catalog, SelectionPolicy::BelowObservedHeight).unwrap(),
            res(426, 240)
        );
    }

    #[test]
    fn test_below_height_with_no_candidates_fails() {
        let catalog = StandardCatalog::new(vec![res(640, 360), res(854, 480)]).unwrap();
        let err = select(res(642, 358), &catalog, SelectionPolicy::BelowObservedHeight).unwrap_err();
        match err {
            CoreError::NoEligibleCandidate { observed, policy } => {
                assert_eq!(observed, res(642, 358));
                assert_eq!(policy, SelectionPolicy::BelowObservedHeight);
            }
            e => panic!("Unexpected error type: {e:?}"),
        }

        // Smallest default entry has nothing strictly below it.
        let default_catalog = StandardCatalog::default();
        assert!(matches!(
            select(res(426, 240), &default_catalog, SelectionPolicy::BelowObservedHeight),
            Err(CoreError::NoEligibleCandidate { .. })
        ));
    }

    #[test]
    fn test_policy_parse_round_trip() {
        for policy in [SelectionPolicy::Nearest, SelectionPolicy::BelowObservedHeight] {
            assert_eq!(policy.to_string().parse::<SelectionPolicy>().unwrap(), policy);
        }
        assert!("closest".parse::<SelectionPolicy>().is_err());
    }
}
