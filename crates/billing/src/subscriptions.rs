//! Subscription catalog and status wire types

use bubblecleaner_shared::{Price, QuotaAllowance, QuotaLimit, SubscriptionTier, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// One entry of `GET /subscriptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub price: Price,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Only sent by newer backends; see [`Tier::quotas`]
    #[serde(default)]
    pub daily_quota: Option<QuotaLimit>,
    #[serde(default)]
    pub monthly_quota: Option<QuotaLimit>,
}

impl Tier {
    /// Catalog entry built from the built-in price table
    pub fn from_kind(kind: SubscriptionTier) -> Self {
        let quotas = kind.default_quotas();
        Self {
            id: None,
            name: kind.as_str().to_string(),
            price: kind.list_price(),
            currency: default_currency(),
            description: None,
            daily_quota: Some(quotas.daily),
            monthly_quota: Some(quotas.monthly),
        }
    }

    /// The known tier this entry names, if any
    pub fn kind(&self) -> Option<SubscriptionTier> {
        SubscriptionTier::from_name(&self.name)
    }

    pub fn is_free(&self) -> bool {
        self.kind().is_some_and(|kind| kind.is_free())
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Allowance sent by the backend, else the tier's defaults.
    /// Unrecognized tiers get the Free allowance.
    pub fn quotas(&self) -> QuotaAllowance {
        let defaults = self.kind().unwrap_or_default().default_quotas();
        QuotaAllowance {
            daily: self.daily_quota.unwrap_or(defaults.daily),
            monthly: self.monthly_quota.unwrap_or(defaults.monthly),
        }
    }

    pub fn formatted_price(&self) -> String {
        self.price.format(&self.currency)
    }
}

/// `GET /subscription/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    #[serde(default)]
    pub current_subscription: Option<CurrentSubscription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSubscription {
    #[serde(default)]
    pub status: Option<String>,
    pub subscription: SubscriptionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSummary {
    pub name: String,
    pub price: Price,
}

impl SubscriptionStatus {
    pub fn with_current(name: &str, price: Price) -> Self {
        Self {
            current_subscription: Some(CurrentSubscription {
                status: Some("active".to_string()),
                subscription: SubscriptionSummary {
                    name: name.to_string(),
                    price,
                },
            }),
        }
    }

    pub fn current(&self) -> Option<&SubscriptionSummary> {
        self.current_subscription.as_ref().map(|c| &c.subscription)
    }

    pub fn current_tier_name(&self) -> Option<&str> {
        self.current().map(|s| s.name.as_str())
    }

    /// The current subscription if it is a paid one.
    ///
    /// A subscription named Free, or priced at zero, does not count.
    pub fn active_paid(&self) -> Option<&SubscriptionSummary> {
        self.current().filter(|s| {
            let named_free = SubscriptionTier::from_name(&s.name).is_some_and(|t| t.is_free());
            !named_free && !s.price.is_zero()
        })
    }

    pub fn holds_paid_tier(&self) -> bool {
        self.active_paid().is_some()
    }
}

/// `POST /subscription/checkout` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub subscription_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalSession {
    pub portal_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelConfirmation {
    pub message: String,
}
