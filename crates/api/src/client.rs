//! HTTP client for the Bubble Cleaner backend

use std::sync::Arc;

use async_trait::async_trait;
use bubblecleaner_billing::{
    CancelConfirmation, CheckoutRequest, CheckoutSession, PortalSession, SubscriptionApi,
    SubscriptionStatus, Tier,
};
use bubblecleaner_shared::{ClientError, ClientResult};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::types::{
    LoginRequest, RegisterRequest, ResendVerificationRequest, TokenResponse, VerifiedAccount,
};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::quota::QuotaResponse;
use crate::session::{SessionStore, User};

/// Whether an endpoint needs the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Required,
    None,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let session = Arc::new(SessionStore::new(config.access_token.clone()));
        Self::with_session(config, session)
    }

    pub fn with_session(config: &Config, session: Arc<SessionStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("bubblecleaner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Transport(format!("invalid endpoint {}: {}", path, e)))
    }

    fn request(&self, method: Method, url: Url, auth: Auth) -> ClientResult<RequestBuilder> {
        let builder = self.http.request(method, url);
        match auth {
            Auth::None => Ok(builder),
            Auth::Required => {
                let token = self
                    .session
                    .access_token()
                    .ok_or(ClientError::NotAuthenticated)?;
                Ok(builder.bearer_auth(token))
            }
        }
    }

    /// Send and return the raw body of a 2xx response
    async fn send(&self, builder: RequestBuilder, path: &str) -> ClientResult<String> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Request failed before a response");
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(
                path = %path,
                status = status.as_u16(),
                detail = error.detail().unwrap_or_default(),
                "Backend request failed"
            );
            return Err(error);
        }

        tracing::debug!(path = %path, status = status.as_u16(), "Backend request succeeded");
        Ok(body)
    }

    async fn call<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let mut builder = self.request(method, url, auth)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let raw = self.send(builder, path).await?;
        serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Unexpected response body");
            ClientError::Decode(e.to_string())
        })
    }

    /// Like [`Self::call`] for endpoints whose success body is not used
    async fn call_unit<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let mut builder = self.request(method, url, auth)?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        self.send(builder, path).await.map(|_| ())
    }

    // =========================================================================
    // Account endpoints
    // =========================================================================

    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<User> {
        self.call(Method::POST, "register", Some(request), Auth::None)
            .await
    }

    /// `POST /login`
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<TokenResponse> {
        self.call(Method::POST, "login", Some(request), Auth::None).await
    }

    /// `DELETE /logout`
    pub async fn logout(&self) -> ClientResult<()> {
        self.call_unit::<()>(Method::DELETE, "logout", None, Auth::Required)
            .await
    }

    /// `GET /verify-email?token=`
    pub async fn verify_email(&self, token: &str) -> ClientResult<VerifiedAccount> {
        let mut url = self.endpoint("verify-email")?;
        url.query_pairs_mut().append_pair("token", token);

        let builder = self.request(Method::GET, url, Auth::None)?;
        let raw = self.send(builder, "verify-email").await?;
        serde_json::from_str(&raw).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `POST /resend-verification`
    pub async fn resend_verification(&self, email: &str) -> ClientResult<()> {
        let request = ResendVerificationRequest {
            email: email.to_string(),
        };
        self.call_unit(Method::POST, "resend-verification", Some(&request), Auth::None)
            .await
    }

    /// `GET /quotas`
    pub async fn quotas(&self) -> ClientResult<QuotaResponse> {
        self.call::<(), _>(Method::GET, "quotas", None, Auth::Required)
            .await
    }
}

#[async_trait]
impl SubscriptionApi for ApiClient {
    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    async fn list_tiers(&self) -> ClientResult<Vec<Tier>> {
        self.call::<(), _>(Method::GET, "subscriptions", None, Auth::None)
            .await
    }

    async fn subscription_status(&self) -> ClientResult<SubscriptionStatus> {
        self.call::<(), _>(Method::GET, "subscription/status", None, Auth::Required)
            .await
    }

    async fn create_checkout_session(&self, tier_name: &str) -> ClientResult<CheckoutSession> {
        let request = CheckoutRequest {
            subscription_name: tier_name.to_string(),
        };
        self.call(
            Method::POST,
            "subscription/checkout",
            Some(&request),
            Auth::Required,
        )
        .await
    }

    async fn create_portal_session(&self) -> ClientResult<PortalSession> {
        self.call::<(), _>(Method::POST, "subscription/portal", None, Auth::Required)
            .await
    }

    async fn cancel_subscription(&self) -> ClientResult<CancelConfirmation> {
        self.call::<(), _>(Method::POST, "subscription/cancel", None, Auth::Required)
            .await
    }
}
