//! Processing quotas
//!
//! The backend reports "unlimited" two ways: `-1` and the sentinel `999999`.
//! Both are folded into [`QuotaLimit::Unlimited`] when a value is
//! deserialized, so nothing downstream ever looks at the raw numbers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Large-integer sentinel the backend uses for unlimited quotas
pub const UNLIMITED_SENTINEL: i64 = 999_999;

/// Symbol rendered in place of an unlimited limit
pub const UNLIMITED_SYMBOL: &str = "∞";

/// Label rendered in place of a percentage for unlimited quotas
pub const UNLIMITED_LABEL: &str = "unlimited";

/// A daily or monthly processing ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaLimit {
    Limited(u64),
    Unlimited,
}

impl QuotaLimit {
    /// Normalize a raw backend value
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 || raw == UNLIMITED_SENTINEL {
            Self::Unlimited
        } else {
            Self::Limited(raw as u64)
        }
    }

    /// Backend representation (`-1` for unlimited)
    pub fn as_raw(&self) -> i64 {
        match self {
            Self::Limited(n) => *n as i64,
            Self::Unlimited => -1,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Share of the quota consumed, in percent. `None` for unlimited quotas.
    ///
    /// A zero limit counts as fully consumed.
    pub fn usage_percent(&self, used: u64) -> Option<f64> {
        match self {
            Self::Unlimited => None,
            Self::Limited(0) => Some(100.0),
            Self::Limited(limit) => Some(used as f64 / *limit as f64 * 100.0),
        }
    }
}

impl std::fmt::Display for QuotaLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{}", n),
            Self::Unlimited => write!(f, "{}", UNLIMITED_SYMBOL),
        }
    }
}

impl Serialize for QuotaLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_raw())
    }
}

impl<'de> Deserialize<'de> for QuotaLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(QuotaLimit::from_raw)
    }
}

/// Daily and monthly allowance of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaAllowance {
    pub daily: QuotaLimit,
    pub monthly: QuotaLimit,
}

/// Current usage as reported by `GET /quotas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub daily_used: u64,
    pub daily_limit: QuotaLimit,
    pub monthly_used: u64,
    pub monthly_limit: QuotaLimit,
    pub can_process: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl QuotaSnapshot {
    /// Snapshot for an account with no quota enforcement (superusers)
    pub fn unlimited(message: Option<String>) -> Self {
        Self {
            daily_used: 0,
            daily_limit: QuotaLimit::Unlimited,
            monthly_used: 0,
            monthly_limit: QuotaLimit::Unlimited,
            can_process: true,
            message,
        }
    }

    pub fn daily(&self) -> QuotaMeter {
        QuotaMeter {
            used: self.daily_used,
            limit: self.daily_limit,
        }
    }

    pub fn monthly(&self) -> QuotaMeter {
        QuotaMeter {
            used: self.monthly_used,
            limit: self.monthly_limit,
        }
    }

    /// Message to show when processing is currently blocked
    pub fn warning(&self) -> Option<&str> {
        if self.can_process {
            None
        } else {
            self.message.as_deref()
        }
    }
}

/// One progress bar of the quota display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuotaMeter {
    pub used: u64,
    pub limit: QuotaLimit,
}

impl QuotaMeter {
    pub fn percent(&self) -> Option<f64> {
        self.limit.usage_percent(self.used)
    }

    /// Bar width, capped at 100%
    pub fn fill_percent(&self) -> f64 {
        self.percent().map_or(0.0, |p| p.min(100.0))
    }

    /// `12.5%`, or the unlimited label
    pub fn percent_label(&self) -> String {
        match self.percent() {
            Some(p) => format!("{:.1}%", p),
            None => UNLIMITED_LABEL.to_string(),
        }
    }

    /// `3/50`, `3/∞`
    pub fn numbers(&self) -> String {
        format!("{}/{}", self.used, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_sentinels_render_unlimited() {
        for raw in [-1, UNLIMITED_SENTINEL] {
            let limit = QuotaLimit::from_raw(raw);
            assert_eq!(limit, QuotaLimit::Unlimited);
            assert_eq!(limit.to_string(), "∞");
        }
    }

    #[test]
    fn test_other_values_render_literally() {
        for raw in [0, 5, 200, 999_998, 1_000_000] {
            assert_eq!(QuotaLimit::from_raw(raw).to_string(), raw.to_string());
        }
    }

    #[test]
    fn test_snapshot_normalizes_on_ingestion() {
        let json = r#"{
            "can_process": true,
            "message": null,
            "daily_used": 3,
            "daily_limit": 999999,
            "monthly_used": 40,
            "monthly_limit": -1
        }"#;
        let snapshot: QuotaSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.daily_limit.is_unlimited());
        assert!(snapshot.monthly_limit.is_unlimited());
        assert_eq!(snapshot.daily().numbers(), "3/∞");
        assert_eq!(snapshot.monthly().numbers(), "40/∞");
    }

    #[test]
    fn test_unlimited_never_shows_percentage() {
        let meter = QuotaMeter {
            used: 12,
            limit: QuotaLimit::Unlimited,
        };
        assert_eq!(meter.percent(), None);
        assert_eq!(meter.percent_label(), "unlimited");
        assert_eq!(meter.fill_percent(), 0.0);
    }

    #[test]
    fn test_percentage_one_decimal_and_capped_fill() {
        let meter = QuotaMeter {
            used: 1,
            limit: QuotaLimit::Limited(8),
        };
        assert_eq!(meter.percent_label(), "12.5%");

        let over = QuotaMeter {
            used: 7,
            limit: QuotaLimit::Limited(5),
        };
        assert_eq!(over.percent_label(), "140.0%");
        assert_eq!(over.fill_percent(), 100.0);

        let zero = QuotaMeter {
            used: 0,
            limit: QuotaLimit::Limited(0),
        };
        assert_eq!(zero.percent(), Some(100.0));
    }

    #[test]
    fn test_warning_only_when_blocked() {
        let mut snapshot = QuotaSnapshot {
            daily_used: 5,
            daily_limit: QuotaLimit::Limited(5),
            monthly_used: 5,
            monthly_limit: QuotaLimit::Limited(5),
            can_process: false,
            message: Some("Daily limit of 5 images reached.".to_string()),
        };
        assert_eq!(snapshot.warning(), Some("Daily limit of 5 images reached."));

        snapshot.can_process = true;
        assert_eq!(snapshot.warning(), None);
    }
}
