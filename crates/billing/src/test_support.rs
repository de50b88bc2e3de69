//! In-memory doubles for the billing interfaces

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bubblecleaner_shared::{ClientError, ClientResult, SubscriptionTier};
use tokio::sync::Notify;

use crate::client::SubscriptionApi;
use crate::dispatcher::Navigator;
use crate::subscriptions::{
    CancelConfirmation, CheckoutSession, PortalSession, SubscriptionStatus, Tier,
};

pub(crate) const CHECKOUT_URL: &str = "https://checkout.stripe.test/c/session_1";
pub(crate) const PORTAL_URL: &str = "https://billing.stripe.test/p/session_1";

pub(crate) struct MockSubscriptionApi {
    authenticated: bool,
    tiers: ClientResult<Vec<Tier>>,
    status: ClientResult<SubscriptionStatus>,
    checkout: ClientResult<CheckoutSession>,
    portal: ClientResult<PortalSession>,
    cancel: ClientResult<CancelConfirmation>,
    /// When set, list/checkout/portal calls block until notified
    gate: Option<Arc<Notify>>,
    list_calls: AtomicUsize,
    status_calls: AtomicUsize,
    checkout_calls: AtomicUsize,
    portal_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
    checkout_tiers: Mutex<Vec<String>>,
}

impl MockSubscriptionApi {
    pub fn new() -> Self {
        Self {
            authenticated: false,
            tiers: Ok(SubscriptionTier::ALL.into_iter().map(Tier::from_kind).collect()),
            status: Ok(SubscriptionStatus::default()),
            checkout: Ok(CheckoutSession {
                checkout_url: CHECKOUT_URL.to_string(),
            }),
            portal: Ok(PortalSession {
                portal_url: PORTAL_URL.to_string(),
            }),
            cancel: Ok(CancelConfirmation {
                message: "Subscription cancelled".to_string(),
            }),
            gate: None,
            list_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            checkout_calls: AtomicUsize::new(0),
            portal_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
            checkout_tiers: Mutex::new(Vec::new()),
        }
    }

    pub fn authenticated_as(mut self, status: SubscriptionStatus) -> Self {
        self.authenticated = true;
        self.status = Ok(status);
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<Tier>) -> Self {
        self.tiers = Ok(tiers);
        self
    }

    pub fn with_tiers_error(mut self, error: ClientError) -> Self {
        self.tiers = Err(error);
        self
    }

    pub fn with_status_error(mut self, error: ClientError) -> Self {
        self.authenticated = true;
        self.status = Err(error);
        self
    }

    pub fn with_checkout_url(mut self, url: &str) -> Self {
        self.checkout = Ok(CheckoutSession {
            checkout_url: url.to_string(),
        });
        self
    }

    pub fn with_checkout_error(mut self, error: ClientError) -> Self {
        self.checkout = Err(error);
        self
    }

    pub fn with_portal_error(mut self, error: ClientError) -> Self {
        self.portal = Err(error);
        self
    }

    pub fn with_cancel_error(mut self, error: ClientError) -> Self {
        self.cancel = Err(error);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn checkout_calls(&self) -> usize {
        self.checkout_calls.load(Ordering::SeqCst)
    }

    pub fn portal_calls(&self) -> usize {
        self.portal_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }

    pub fn checkout_tiers(&self) -> Vec<String> {
        self.checkout_tiers.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl SubscriptionApi for MockSubscriptionApi {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn list_tiers(&self) -> ClientResult<Vec<Tier>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate().await;
        self.tiers.clone()
    }

    async fn subscription_status(&self) -> ClientResult<SubscriptionStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if !self.authenticated {
            return Err(ClientError::NotAuthenticated);
        }
        self.status.clone()
    }

    async fn create_checkout_session(&self, tier_name: &str) -> ClientResult<CheckoutSession> {
        self.checkout_calls.fetch_add(1, Ordering::SeqCst);
        self.checkout_tiers.lock().unwrap().push(tier_name.to_string());
        self.wait_for_gate().await;
        self.checkout.clone()
    }

    async fn create_portal_session(&self) -> ClientResult<PortalSession> {
        self.portal_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_for_gate().await;
        self.portal.clone()
    }

    async fn cancel_subscription(&self) -> ClientResult<CancelConfirmation> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        self.cancel.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    navigations: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.navigations.lock().unwrap().push(url.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
