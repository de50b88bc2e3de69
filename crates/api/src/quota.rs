//! Quota display
//!
//! Fetches `GET /quotas` and renders the daily and monthly meters.

use std::sync::Arc;

use bubblecleaner_shared::{QuotaMeter, QuotaSnapshot, ViewState};
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::{AccountOperation, ApiError, ApiResult};

/// Body of `GET /quotas`; superusers get a message instead of counters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuotaResponse {
    Snapshot(QuotaSnapshot),
    Exempt { message: String },
}

impl QuotaResponse {
    pub fn into_snapshot(self) -> QuotaSnapshot {
        match self {
            Self::Snapshot(snapshot) => snapshot,
            Self::Exempt { message } => QuotaSnapshot::unlimited(Some(message)),
        }
    }

    pub fn is_exempt(&self) -> bool {
        matches!(self, Self::Exempt { .. })
    }
}

/// One rendered meter row
#[derive(Debug, Clone, PartialEq)]
pub struct MeterView {
    pub title: &'static str,
    pub numbers: String,
    pub percent_label: String,
    pub fill_percent: f64,
}

impl MeterView {
    fn new(title: &'static str, meter: QuotaMeter) -> Self {
        Self {
            title,
            numbers: meter.numbers(),
            percent_label: meter.percent_label(),
            fill_percent: meter.fill_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuotaView {
    pub daily: MeterView,
    pub monthly: MeterView,
    /// Shown when processing is currently blocked
    pub warning: Option<String>,
    /// Superuser exemption notice
    pub notice: Option<String>,
}

impl QuotaView {
    pub fn from_response(response: QuotaResponse) -> Self {
        let exempt = response.is_exempt();
        let snapshot = response.into_snapshot();

        let notice = if exempt {
            snapshot.message.clone()
        } else {
            None
        };

        Self {
            daily: MeterView::new("Daily", snapshot.daily()),
            monthly: MeterView::new("Monthly", snapshot.monthly()),
            warning: snapshot.warning().map(str::to_string),
            notice,
        }
    }
}

impl std::fmt::Display for QuotaView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for meter in [&self.daily, &self.monthly] {
            writeln!(
                f,
                "{:<8} {:>10}  {}",
                meter.title, meter.numbers, meter.percent_label
            )?;
        }
        if let Some(notice) = &self.notice {
            writeln!(f, "{}", notice)?;
        }
        if let Some(warning) = &self.warning {
            writeln!(f, "Warning: {}", warning)?;
        }
        Ok(())
    }
}

/// Owns the quota view state across refreshes
pub struct QuotaDisplay {
    client: Arc<ApiClient>,
    state: ViewState<QuotaView>,
}

impl QuotaDisplay {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState<QuotaView> {
        &self.state
    }

    /// Fetch the current snapshot; the previous view is replaced on both
    /// success and failure
    pub async fn refresh(&mut self) -> ApiResult<QuotaView> {
        self.state = ViewState::Loading;

        match self.client.quotas().await {
            Ok(response) => {
                tracing::debug!(exempt = response.is_exempt(), "Quotas loaded");
                let view = QuotaView::from_response(response);
                self.state = ViewState::Ready(view.clone());
                Ok(view)
            }
            Err(e) => {
                let err = ApiError::request(AccountOperation::FetchQuotas)(e);
                self.state = ViewState::Failed(err.user_message());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubblecleaner_shared::QuotaLimit;

    #[test]
    fn test_snapshot_body() {
        let body = r#"{
            "can_process": true,
            "message": null,
            "daily_used": 3,
            "daily_limit": 50,
            "monthly_used": 120,
            "monthly_limit": -1,
            "retreatment_limit": 2
        }"#;
        let response: QuotaResponse = serde_json::from_str(body).unwrap();
        assert!(!response.is_exempt());

        let view = QuotaView::from_response(response);
        assert_eq!(view.daily.numbers, "3/50");
        assert_eq!(view.daily.percent_label, "6.0%");
        assert_eq!(view.monthly.numbers, "120/∞");
        assert_eq!(view.monthly.percent_label, "unlimited");
        assert_eq!(view.monthly.fill_percent, 0.0);
        assert!(view.warning.is_none());
    }

    #[test]
    fn test_superuser_body() {
        let body = r#"{"message": "Superuser: no quotas applied."}"#;
        let response: QuotaResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_exempt());

        let snapshot = response.clone().into_snapshot();
        assert_eq!(snapshot.daily_limit, QuotaLimit::Unlimited);
        assert!(snapshot.can_process);

        let view = QuotaView::from_response(response);
        assert_eq!(view.daily.numbers, "0/∞");
        assert_eq!(view.notice.as_deref(), Some("Superuser: no quotas applied."));
    }

    #[test]
    fn test_blocked_snapshot_shows_warning() {
        let body = r#"{
            "can_process": false,
            "message": "Daily limit of 5 images reached. Try again tomorrow.",
            "daily_used": 5,
            "daily_limit": 5,
            "monthly_used": 5,
            "monthly_limit": 999999
        }"#;
        let view = QuotaView::from_response(serde_json::from_str(body).unwrap());
        assert_eq!(view.daily.percent_label, "100.0%");
        assert_eq!(view.monthly.numbers, "5/∞");
        assert_eq!(
            view.warning.as_deref(),
            Some("Daily limit of 5 images reached. Try again tomorrow.")
        );
        assert!(view.to_string().contains("Warning: Daily limit"));
    }
}
