//! Subscription cancellation

use crate::client::SubscriptionApi;
use crate::error::{BillingError, BillingOperation, BillingResult};

/// Cancel the caller's current subscription, returning the backend's
/// confirmation message
pub async fn cancel_subscription(api: &dyn SubscriptionApi) -> BillingResult<String> {
    let confirmation = api
        .cancel_subscription()
        .await
        .map_err(BillingError::request(BillingOperation::Cancel))?;

    tracing::info!("Subscription cancelled");
    Ok(confirmation.message)
}
