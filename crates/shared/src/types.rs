//! Common types used across Bubble Cleaner

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::quota::{QuotaAllowance, QuotaLimit};

// =============================================================================
// Money
// =============================================================================

/// Currency amount stored as integer minor units (cents).
///
/// The backend sends prices as JSON decimals (`3.99`). They are rounded to
/// cents once on ingestion so every comparison after that is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    pub const ZERO: Price = Price { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Convert a decimal amount (e.g. `16.99`) to cents
    pub fn from_amount(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn amount(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Format for display, French locale style: `3,99 €`
    ///
    /// USD renders as `$3.99`; any other ISO code is appended verbatim.
    pub fn format(&self, currency: &str) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let (units, frac) = (abs / 100, abs % 100);

        match currency.to_ascii_uppercase().as_str() {
            "EUR" => format!("{sign}{units},{frac:02}\u{a0}€"),
            "USD" => format!("{sign}${units}.{frac:02}"),
            other => format!("{sign}{units},{frac:02}\u{a0}{other}"),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.amount())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAmount {
            Number(f64),
            Text(String),
        }

        match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(amount) => Ok(Price::from_amount(amount)),
            RawAmount::Text(text) => text
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .map(Price::from_amount)
                .map_err(|_| serde::de::Error::custom(format!("invalid price '{}'", text))),
        }
    }
}

/// Default currency for catalog entries that omit one
pub const DEFAULT_CURRENCY: &str = "EUR";

// =============================================================================
// Subscription tiers
// =============================================================================

/// Closed set of subscription tiers, declared in ascending price order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum SubscriptionTier {
    #[default]
    Free,
    Basic,
    Premium,
}

/// Returned when a tier name does not match any known tier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subscription tier '{0}'")]
pub struct UnknownTier(pub String);

impl SubscriptionTier {
    /// All tiers, cheapest first
    pub const ALL: [SubscriptionTier; 3] = [Self::Free, Self::Basic, Self::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Basic => "Basic",
            Self::Premium => "Premium",
        }
    }

    /// Case-insensitive lookup of a backend tier name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Monthly list price in EUR
    pub fn list_price(&self) -> Price {
        match self {
            Self::Free => Price::ZERO,
            Self::Basic => Price::from_cents(399),
            Self::Premium => Price::from_cents(1699),
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }

    /// Default processing allowance for the tier
    pub fn default_quotas(&self) -> QuotaAllowance {
        match self {
            Self::Free => QuotaAllowance {
                daily: QuotaLimit::Limited(5),
                monthly: QuotaLimit::Limited(5),
            },
            Self::Basic => QuotaAllowance {
                daily: QuotaLimit::Limited(50),
                monthly: QuotaLimit::Limited(200),
            },
            Self::Premium => QuotaAllowance {
                daily: QuotaLimit::Unlimited,
                monthly: QuotaLimit::Unlimited,
            },
        }
    }

    /// Feature bullets shown on the plan card
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            Self::Free => &[
                "Basic image processing",
                "Automatic bubble detection",
                "Automatic translation",
            ],
            Self::Basic => &[
                "Everything in Free",
                "Extended quotas",
                "Priority support",
                "Advanced reprocessing",
            ],
            Self::Premium => &[
                "Everything in Basic",
                "Unlimited quotas",
                "Premium support",
                "Advanced features",
            ],
        }
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownTier(s.to_string()))
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
