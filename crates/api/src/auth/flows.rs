//! Account flows: registration, login, logout and email verification

use std::sync::Arc;

use bubblecleaner_shared::ClientError;

use super::validation::{
    extract_verification_token, LoginForm, RegistrationForm, ValidationError,
};
use crate::client::ApiClient;
use crate::error::{AccountOperation, ApiError, ApiResult};
use crate::session::{Session, User};

#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Create an account. The backend sends a verification email; the caller
    /// is not logged in until the email is verified.
    pub async fn register(&self, form: &RegistrationForm) -> ApiResult<User> {
        let request = form.validate()?;

        let user = self
            .client
            .register(&request)
            .await
            .map_err(ApiError::request(AccountOperation::Register))?;

        tracing::info!(user_id = user.id, username = %user.username, "Account registered");
        Ok(user)
    }

    pub async fn login(&self, form: &LoginForm) -> ApiResult<Session> {
        let request = form.validate()?;

        let token = self
            .client
            .login(&request)
            .await
            .map_err(ApiError::request(AccountOperation::Login))?;

        let session = Session {
            access_token: token.access_token,
            user: None,
        };
        self.client.session().set(session.clone());

        tracing::info!(email = %request.email, "Logged in");
        Ok(session)
    }

    /// End the session. The local session is always cleared, even when the
    /// backend call fails.
    pub async fn logout(&self) {
        match self.client.logout().await {
            Ok(()) => tracing::info!("Logged out"),
            Err(ClientError::NotAuthenticated) => tracing::debug!("Logout without a session"),
            Err(e) => tracing::warn!(error = %e, "Backend logout failed; clearing local session"),
        }
        self.client.session().clear();
    }

    /// Consume a verification token (or a link carrying one) and log in
    pub async fn verify_email(&self, token_or_link: &str) -> ApiResult<User> {
        let token = extract_verification_token(token_or_link)?;

        let account = self
            .client
            .verify_email(&token)
            .await
            .map_err(ApiError::request(AccountOperation::VerifyEmail))?;

        self.client.session().set(Session {
            access_token: account.access_token,
            user: Some(account.user.clone()),
        });

        tracing::info!(user_id = account.user.id, "Email verified, logged in");
        Ok(account.user)
    }

    pub async fn resend_verification(&self, email: &str) -> ApiResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail.into());
        }

        self.client
            .resend_verification(email)
            .await
            .map_err(ApiError::request(AccountOperation::ResendVerification))?;

        tracing::info!(email = %email, "Verification email re-sent");
        Ok(())
    }
}

/// Verification page state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VerificationState {
    #[default]
    Idle,
    Verifying,
    Verified(User),
    Resending,
    Resent,
    Failed(String),
}

pub const VERIFIED_MESSAGE: &str = "Your email has been verified. You are now logged in.";
pub const RESENT_MESSAGE: &str = "A new verification email has been sent.";

/// Drives [`VerificationState`] through verify and resend attempts
pub struct EmailVerification {
    auth: AuthService,
    state: VerificationState,
}

impl EmailVerification {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            state: VerificationState::Idle,
        }
    }

    pub fn state(&self) -> &VerificationState {
        &self.state
    }

    /// Resend is offered only after a failed verification
    pub fn can_resend(&self) -> bool {
        matches!(self.state, VerificationState::Failed(_))
    }

    pub async fn verify(&mut self, token_or_link: &str) -> &VerificationState {
        self.state = VerificationState::Verifying;
        self.state = match self.auth.verify_email(token_or_link).await {
            Ok(user) => VerificationState::Verified(user),
            Err(e) => VerificationState::Failed(e.user_message()),
        };
        &self.state
    }

    pub async fn resend(&mut self, email: &str) -> &VerificationState {
        self.state = VerificationState::Resending;
        self.state = match self.auth.resend_verification(email).await {
            Ok(()) => VerificationState::Resent,
            Err(e) => VerificationState::Failed(e.user_message()),
        };
        &self.state
    }
}
