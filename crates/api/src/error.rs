//! Client error types

use bubblecleaner_billing::BillingError;
use bubblecleaner_shared::ClientError;

use crate::auth::ValidationError;

/// Account and quota calls; each knows its fallback message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountOperation {
    Register,
    Login,
    Logout,
    VerifyEmail,
    ResendVerification,
    FetchQuotas,
}

impl AccountOperation {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::Register => "Registration failed. Please try again.",
            Self::Login => "Login failed. Please try again.",
            Self::Logout => "Logout failed",
            Self::VerifyEmail => "Email verification failed",
            Self::ResendVerification => "Could not send the verification email",
            Self::FetchQuotas => "Could not load your quotas",
        }
    }
}

impl std::fmt::Display for AccountOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::VerifyEmail => "verify_email",
            Self::ResendVerification => "resend_verification",
            Self::FetchQuotas => "fetch_quotas",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{operation} request failed: {source}")]
    Request {
        operation: AccountOperation,
        source: ClientError,
    },

    /// Rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("plan '{0}' is not available for your current subscription")]
    PlanUnavailable(String),

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub(crate) fn request(operation: AccountOperation) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Request { operation, source }
    }

    /// Message for the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { operation, source } => {
                source.user_message(operation.fallback_message())
            }
            Self::Validation(e) => e.to_string(),
            Self::Billing(e) => e.user_message(),
            Self::Config(msg) => format!("Invalid configuration: {}", msg),
            Self::PlanUnavailable(name) => {
                format!("The {} plan is not available for your current subscription", name)
            }
            Self::Input(e) => format!("Could not read input: {}", e),
        }
    }
}
