// Test code patterns:
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Bubble Cleaner shared types
//!
//! Domain types used by both the billing view models and the HTTP client:
//! subscription tiers, prices, quotas, the client error taxonomy and the
//! generic view state.

pub mod error;
pub mod quota;
pub mod state;
pub mod types;

pub use error::{ClientError, ClientResult, CONNECTION_ERROR_MESSAGE, NOT_AUTHENTICATED_MESSAGE};
pub use quota::{
    QuotaAllowance, QuotaLimit, QuotaMeter, QuotaSnapshot, UNLIMITED_LABEL, UNLIMITED_SENTINEL,
    UNLIMITED_SYMBOL,
};
pub use state::ViewState;
pub use types::{Price, SubscriptionTier, UnknownTier, DEFAULT_CURRENCY};
