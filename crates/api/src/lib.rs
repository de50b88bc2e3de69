// Client crate clippy configuration
#![allow(clippy::result_large_err)] // ApiError wraps BillingError and the backend detail
// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Bubble Cleaner Client Library
//!
//! HTTP client, account flows, quota display and the command-line front end
//! for the Bubble Cleaner backend.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod navigator;
pub mod quota;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use config::Config;
pub use error::{AccountOperation, ApiError, ApiResult};
pub use navigator::TerminalNavigator;
pub use quota::{QuotaDisplay, QuotaResponse, QuotaView};
pub use session::{Session, SessionStore, User};
pub use state::AppState;
