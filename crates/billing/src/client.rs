//! Backend interface consumed by the billing view models
//!
//! Components receive an `Arc<dyn SubscriptionApi>` instead of reaching for a
//! global client, so tests can substitute their own implementation.

use async_trait::async_trait;
use bubblecleaner_shared::ClientResult;

use crate::subscriptions::{
    CancelConfirmation, CheckoutSession, PortalSession, SubscriptionStatus, Tier,
};

#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// Whether a session exists; gates the authenticated endpoints
    fn is_authenticated(&self) -> bool;

    /// `GET /subscriptions`
    async fn list_tiers(&self) -> ClientResult<Vec<Tier>>;

    /// `GET /subscription/status`
    async fn subscription_status(&self) -> ClientResult<SubscriptionStatus>;

    /// `POST /subscription/checkout`
    async fn create_checkout_session(&self, tier_name: &str) -> ClientResult<CheckoutSession>;

    /// `POST /subscription/portal`
    async fn create_portal_session(&self) -> ClientResult<PortalSession>;

    /// `POST /subscription/cancel`
    async fn cancel_subscription(&self) -> ClientResult<CancelConfirmation>;
}
