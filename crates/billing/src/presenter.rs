//! Plan card presentation
//!
//! Pure functions from (tier, status, loading) to what the card shows.
//! Button rules, first match wins:
//!
//! 1. request in flight → "loading", disabled
//! 2. caller's current paid tier → "manage subscription"
//! 3. free tier → "free", always disabled
//! 4. caller holds another paid tier → "upgrade" if strictly pricier, else "change plan"
//! 5. no paid tier → "subscribe — {price}"

use bubblecleaner_shared::UNLIMITED_SYMBOL;

use crate::subscriptions::{SubscriptionStatus, Tier};

/// What clicking the button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    None,
    Subscribe,
    Manage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonLabel {
    Loading,
    ManageSubscription,
    Free,
    Upgrade,
    ChangePlan,
    Subscribe { price: String },
}

impl std::fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::ManageSubscription => write!(f, "manage subscription"),
            Self::Free => write!(f, "free"),
            Self::Upgrade => write!(f, "upgrade"),
            Self::ChangePlan => write!(f, "change plan"),
            Self::Subscribe { price } => write!(f, "subscribe — {}", price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: ButtonLabel,
    pub enabled: bool,
    pub action: ButtonAction,
}

impl ButtonView {
    fn new(label: ButtonLabel, enabled: bool, action: ButtonAction) -> Self {
        Self {
            label,
            enabled,
            action,
        }
    }
}

/// Compute the action button of one card
pub fn present_button(
    tier: &Tier,
    status: Option<&SubscriptionStatus>,
    loading: bool,
) -> ButtonView {
    if loading {
        return ButtonView::new(ButtonLabel::Loading, false, ButtonAction::None);
    }

    let is_current = status
        .and_then(|s| s.current_tier_name())
        .is_some_and(|name| tier.is_named(name));

    if is_current && !tier.is_free() {
        return ButtonView::new(ButtonLabel::ManageSubscription, true, ButtonAction::Manage);
    }

    if tier.is_free() {
        return ButtonView::new(ButtonLabel::Free, false, ButtonAction::None);
    }

    match status.and_then(|s| s.active_paid()) {
        Some(current) => {
            let label = if tier.price > current.price {
                ButtonLabel::Upgrade
            } else {
                ButtonLabel::ChangePlan
            };
            ButtonView::new(label, true, ButtonAction::Subscribe)
        }
        None => ButtonView::new(
            ButtonLabel::Subscribe {
                price: tier.formatted_price(),
            },
            true,
            ButtonAction::Subscribe,
        ),
    }
}

/// Everything a plan card displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCardView {
    pub name: String,
    /// `free`, or `3,99 € / month`
    pub price_label: String,
    pub description: Option<String>,
    /// `50 images/day`, `∞/day`
    pub daily_quota: String,
    pub monthly_quota: String,
    pub features: Vec<&'static str>,
    pub is_current: bool,
    pub button: ButtonView,
}

pub fn present_card(tier: &Tier, status: Option<&SubscriptionStatus>, loading: bool) -> PlanCardView {
    let quotas = tier.quotas();
    let quota_text = |limit: bubblecleaner_shared::QuotaLimit, period: &str| {
        if limit.is_unlimited() {
            format!("{}/{}", UNLIMITED_SYMBOL, period)
        } else {
            format!("{} images/{}", limit, period)
        }
    };

    PlanCardView {
        name: tier.name.clone(),
        price_label: if tier.is_free() {
            "free".to_string()
        } else {
            format!("{} / month", tier.formatted_price())
        },
        description: tier.description.clone(),
        daily_quota: quota_text(quotas.daily, "day"),
        monthly_quota: quota_text(quotas.monthly, "month"),
        features: tier
            .kind()
            .map(|kind| kind.features().to_vec())
            .unwrap_or_default(),
        is_current: status
            .and_then(|s| s.current_tier_name())
            .is_some_and(|name| tier.is_named(name)),
        button: present_button(tier, status, loading),
    }
}
