//! Billing error types

use bubblecleaner_shared::ClientError;

/// Alert shown when the backend reports the billing portal has no configuration
pub const PORTAL_NOT_CONFIGURED_MESSAGE: &str =
    "The subscription management portal is not configured yet. Please contact support.";

/// Substring of the payment provider's error when no portal configuration exists
pub(crate) const PORTAL_NOT_CONFIGURED_MARKER: &str = "No configuration provided";

/// Backend call a [`BillingError::Request`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingOperation {
    ListTiers,
    FetchStatus,
    Checkout,
    Portal,
    Cancel,
}

impl BillingOperation {
    /// Message used when the backend gave no `detail`
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::ListTiers => "Could not load the available plans",
            Self::FetchStatus => "Could not load your subscription status",
            Self::Checkout => "Could not start the checkout session",
            Self::Portal => "Could not open the subscription portal",
            Self::Cancel => "Could not cancel the subscription",
        }
    }
}

impl std::fmt::Display for BillingOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ListTiers => "list_tiers",
            Self::FetchStatus => "fetch_status",
            Self::Checkout => "checkout",
            Self::Portal => "portal",
            Self::Cancel => "cancel",
        };
        write!(f, "{}", name)
    }
}

/// Hosted page a redirect leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Checkout,
    Portal,
}

impl std::fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Checkout => write!(f, "checkout"),
            Self::Portal => write!(f, "portal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    #[error("{operation} request failed: {source}")]
    Request {
        operation: BillingOperation,
        source: ClientError,
    },

    #[error("billing portal is not configured: {0}")]
    PortalNotConfigured(String),

    #[error("no {0} URL provided")]
    MissingRedirectUrl(RedirectKind),
}

pub type BillingResult<T> = Result<T, BillingError>;

impl BillingError {
    pub(crate) fn request(operation: BillingOperation) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Request { operation, source }
    }

    /// Message for the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { operation, source } => {
                source.user_message(operation.fallback_message())
            }
            Self::PortalNotConfigured(_) => PORTAL_NOT_CONFIGURED_MESSAGE.to_string(),
            Self::MissingRedirectUrl(kind) => format!("No {} URL provided", kind),
        }
    }

    /// Text of the blocking alert raised for a failed redirect
    pub fn alert_message(&self) -> String {
        match self {
            Self::PortalNotConfigured(_) => PORTAL_NOT_CONFIGURED_MESSAGE.to_string(),
            other => format!("Error: {}", other.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_prefers_backend_detail() {
        let err = BillingError::request(BillingOperation::Checkout)(ClientError::Backend {
            status: 404,
            detail: Some("Subscription not found".to_string()),
        });
        assert_eq!(err.user_message(), "Subscription not found");
        assert_eq!(err.alert_message(), "Error: Subscription not found");
    }

    #[test]
    fn test_request_error_falls_back_per_operation() {
        let err = BillingError::request(BillingOperation::Cancel)(ClientError::Backend {
            status: 500,
            detail: None,
        });
        assert_eq!(err.user_message(), "Could not cancel the subscription");
    }

    #[test]
    fn test_portal_not_configured_alert_is_special_cased() {
        let err = BillingError::PortalNotConfigured("No configuration provided".to_string());
        assert_eq!(err.alert_message(), PORTAL_NOT_CONFIGURED_MESSAGE);
    }
}
