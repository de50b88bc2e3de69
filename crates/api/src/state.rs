//! Application state

use std::sync::Arc;

use bubblecleaner_billing::{BillingRedirectDispatcher, Navigator, PricingPage, SubscriptionApi};

use crate::{
    auth::{AuthService, EmailVerification},
    client::ApiClient,
    config::Config,
    error::ApiResult,
    quota::QuotaDisplay,
};

/// Shared application state; every component gets its dependencies from here
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub client: Arc<ApiClient>,
    pub navigator: Arc<dyn Navigator>,
}

impl AppState {
    pub fn new(config: Config, navigator: Arc<dyn Navigator>) -> ApiResult<Self> {
        let client = Arc::new(ApiClient::new(&config)?);
        Ok(Self {
            config,
            client,
            navigator,
        })
    }

    fn subscription_api(&self) -> Arc<dyn SubscriptionApi> {
        self.client.clone()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    pub fn email_verification(&self) -> EmailVerification {
        EmailVerification::new(self.auth())
    }

    pub fn pricing_page(&self) -> PricingPage {
        PricingPage::new(self.subscription_api(), self.navigator.clone())
    }

    pub fn dispatcher(&self) -> BillingRedirectDispatcher {
        BillingRedirectDispatcher::new(self.subscription_api(), self.navigator.clone())
    }

    pub fn quota_display(&self) -> QuotaDisplay {
        QuotaDisplay::new(self.client.clone())
    }
}
