//! Billing redirect dispatcher
//!
//! Turns a card action into a single backend call that yields a hosted page
//! URL, then hands the URL to the [`Navigator`]. No retries, no polling.

use std::sync::Arc;

use crate::client::SubscriptionApi;
use crate::error::{
    BillingError, BillingOperation, BillingResult, RedirectKind, PORTAL_NOT_CONFIGURED_MARKER,
};
use crate::presenter::ButtonAction;
use crate::subscriptions::SubscriptionStatus;

/// Host environment able to leave the page and raise blocking alerts
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
    fn alert(&self, message: &str);
}

/// Where a dispatched action leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub url: String,
}

/// Decide which hosted page an action needs.
///
/// Anyone already holding a paid tier goes through the portal, even when
/// they clicked another tier's subscribe button.
pub fn route(action: ButtonAction, status: Option<&SubscriptionStatus>) -> Option<RedirectKind> {
    let holds_paid = status.is_some_and(|s| s.holds_paid_tier());
    match action {
        ButtonAction::None => None,
        ButtonAction::Manage => Some(RedirectKind::Portal),
        ButtonAction::Subscribe if holds_paid => Some(RedirectKind::Portal),
        ButtonAction::Subscribe => Some(RedirectKind::Checkout),
    }
}

pub struct BillingRedirectDispatcher {
    api: Arc<dyn SubscriptionApi>,
    navigator: Arc<dyn Navigator>,
}

impl BillingRedirectDispatcher {
    pub fn new(api: Arc<dyn SubscriptionApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self { api, navigator }
    }

    /// Request the redirect URL for an action without navigating
    pub async fn resolve(
        &self,
        action: ButtonAction,
        tier_name: &str,
        status: Option<&SubscriptionStatus>,
    ) -> BillingResult<Option<Redirect>> {
        let Some(kind) = route(action, status) else {
            return Ok(None);
        };

        tracing::info!(tier = %tier_name, destination = %kind, "Requesting billing redirect");

        let url = match kind {
            RedirectKind::Checkout => {
                self.api
                    .create_checkout_session(tier_name)
                    .await
                    .map_err(BillingError::request(BillingOperation::Checkout))?
                    .checkout_url
            }
            RedirectKind::Portal => {
                self.api
                    .create_portal_session()
                    .await
                    .map_err(|source| {
                        if let Some(detail) = source
                            .detail()
                            .filter(|d| d.contains(PORTAL_NOT_CONFIGURED_MARKER))
                        {
                            return BillingError::PortalNotConfigured(detail.to_string());
                        }
                        BillingError::request(BillingOperation::Portal)(source)
                    })?
                    .portal_url
            }
        };

        if url.trim().is_empty() {
            return Err(BillingError::MissingRedirectUrl(kind));
        }

        Ok(Some(Redirect { kind, url }))
    }

    /// Resolve the redirect, then navigate to it or raise an alert
    pub async fn dispatch(
        &self,
        action: ButtonAction,
        tier_name: &str,
        status: Option<&SubscriptionStatus>,
    ) -> BillingResult<Option<Redirect>> {
        match self.resolve(action, tier_name, status).await {
            Ok(Some(redirect)) => {
                self.navigator.navigate(&redirect.url);
                Ok(Some(redirect))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::error!(tier = %tier_name, error = %e, "Billing redirect failed");
                self.navigator.alert(&e.alert_message());
                Err(e)
            }
        }
    }
}
