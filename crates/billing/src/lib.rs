// Billing crate clippy configuration
#![allow(clippy::result_large_err)] // BillingError carries the backend detail string
// Test code patterns (expected in test files):
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Bubble Cleaner Billing Module
//!
//! Plan gating and billing redirects for the pricing page.
//!
//! ## Features
//!
//! - **Catalog Loading**: Fetch the tier list and the caller's subscription status
//! - **Tier Visibility**: Hide downgrade paths from current subscribers
//! - **Plan Cards**: Button label/action per tier, with a single in-flight request per card
//! - **Redirects**: Send the caller to hosted checkout or the management portal
//! - **Cancellation**: Cancel the current subscription

pub mod cancel;
pub mod card;
pub mod catalog;
pub mod client;
pub mod dispatcher;
pub mod error;
pub mod presenter;
pub mod subscriptions;
pub mod visibility;

#[cfg(test)]
mod test_support;

// Cancel
pub use cancel::cancel_subscription;

// Card
pub use card::{CardState, ClickOutcome, PlanCard};

// Catalog
pub use catalog::{CatalogLoader, PlanCatalog, PricingPage, PricingView};

// Client
pub use client::SubscriptionApi;

// Dispatcher
pub use dispatcher::{route, BillingRedirectDispatcher, Navigator, Redirect};

// Error
pub use error::{
    BillingError, BillingOperation, BillingResult, RedirectKind, PORTAL_NOT_CONFIGURED_MESSAGE,
};

// Presenter
pub use presenter::{
    present_button, present_card, ButtonAction, ButtonLabel, ButtonView, PlanCardView,
};

// Subscriptions
pub use subscriptions::{
    CancelConfirmation, CheckoutRequest, CheckoutSession, CurrentSubscription, PortalSession,
    SubscriptionStatus, SubscriptionSummary, Tier,
};

// Visibility
pub use visibility::{filter_visible_tiers, visible_tiers_for};
