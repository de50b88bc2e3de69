//! Which tiers a caller is offered
//!
//! Downgrades are never offered: a subscriber sees their own tier and
//! anything above it. Callers without a recognizable paid tier see the whole
//! catalog.

use bubblecleaner_shared::SubscriptionTier;

use crate::subscriptions::{SubscriptionStatus, Tier};

/// Subset of `catalog` to display for a caller currently on `current_tier_name`.
///
/// Catalog order is preserved and the result is always a subset of the
/// catalog. An unknown or missing current tier returns the catalog unchanged.
pub fn filter_visible_tiers(catalog: &[Tier], current_tier_name: Option<&str>) -> Vec<Tier> {
    let Some(current) = current_tier_name.and_then(SubscriptionTier::from_name) else {
        return catalog.to_vec();
    };

    match current {
        SubscriptionTier::Free => catalog.to_vec(),
        SubscriptionTier::Basic | SubscriptionTier::Premium => catalog
            .iter()
            .filter(|tier| tier.kind().is_some_and(|kind| kind >= current))
            .cloned()
            .collect(),
    }
}

/// Same as [`filter_visible_tiers`], reading the current tier from a status
/// response. `None` means the status is unknown (logged out or fetch failed).
pub fn visible_tiers_for(catalog: &[Tier], status: Option<&SubscriptionStatus>) -> Vec<Tier> {
    filter_visible_tiers(catalog, status.and_then(|s| s.current_tier_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubblecleaner_shared::Price;

    fn catalog() -> Vec<Tier> {
        SubscriptionTier::ALL.into_iter().map(Tier::from_kind).collect()
    }

    fn names(tiers: &[Tier]) -> Vec<&str> {
        tiers.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_no_current_tier_shows_everything() {
        assert_eq!(filter_visible_tiers(&catalog(), None), catalog());
    }

    #[test]
    fn test_free_shows_everything() {
        assert_eq!(filter_visible_tiers(&catalog(), Some("Free")), catalog());
    }

    #[test]
    fn test_basic_shows_basic_and_premium() {
        let visible = filter_visible_tiers(&catalog(), Some("Basic"));
        assert_eq!(names(&visible), vec!["Basic", "Premium"]);
    }

    #[test]
    fn test_premium_shows_premium_only() {
        let visible = filter_visible_tiers(&catalog(), Some("Premium"));
        assert_eq!(names(&visible), vec!["Premium"]);
    }

    #[test]
    fn test_unknown_tier_fails_open() {
        assert_eq!(filter_visible_tiers(&catalog(), Some("Gold")), catalog());
        assert_eq!(filter_visible_tiers(&catalog(), Some("")), catalog());
    }

    #[test]
    fn test_current_tier_missing_from_catalog() {
        let partial: Vec<Tier> = catalog().into_iter().filter(|t| t.name != "Basic").collect();
        let visible = filter_visible_tiers(&partial, Some("Basic"));
        assert_eq!(names(&visible), vec!["Premium"]);

        let visible = filter_visible_tiers(&[], Some("Premium"));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_visible_tiers_for_status() {
        let status = SubscriptionStatus::with_current("premium", Price::from_cents(1699));
        let visible = visible_tiers_for(&catalog(), Some(&status));
        assert_eq!(names(&visible), vec!["Premium"]);

        let empty = SubscriptionStatus::default();
        assert_eq!(visible_tiers_for(&catalog(), Some(&empty)), catalog());
        assert_eq!(visible_tiers_for(&catalog(), None), catalog());
    }
}
