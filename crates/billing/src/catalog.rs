//! Plan catalog loading and the pricing page
//!
//! The page owns one [`ViewState`]. Each load gets a generation number; a
//! result is applied only if the page is still open and no newer load has
//! started since.

use std::sync::{Arc, Mutex, MutexGuard};

use bubblecleaner_shared::{SubscriptionTier, ViewState};

use crate::card::PlanCard;
use crate::client::SubscriptionApi;
use crate::dispatcher::{BillingRedirectDispatcher, Navigator};
use crate::error::{BillingError, BillingOperation, BillingResult};
use crate::subscriptions::{SubscriptionStatus, Tier};
use crate::visibility::visible_tiers_for;

/// Result of one catalog load
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCatalog {
    pub tiers: Vec<Tier>,
    /// `None` when logged out or when the status request failed
    pub status: Option<Arc<SubscriptionStatus>>,
}

impl PlanCatalog {
    pub fn current_tier_name(&self) -> Option<&str> {
        self.status.as_deref().and_then(|s| s.current_tier_name())
    }

    /// Name shown as "current plan"; the implicit default is Free
    pub fn current_plan_label(&self) -> &str {
        self.current_tier_name()
            .unwrap_or(SubscriptionTier::Free.as_str())
    }

    pub fn visible_tiers(&self) -> Vec<Tier> {
        visible_tiers_for(&self.tiers, self.status.as_deref())
    }
}

pub struct CatalogLoader {
    api: Arc<dyn SubscriptionApi>,
}

impl CatalogLoader {
    pub fn new(api: Arc<dyn SubscriptionApi>) -> Self {
        Self { api }
    }

    /// Fetch the tier list, then the caller's status when logged in.
    ///
    /// A failed tier list fails the load. A failed status only degrades to
    /// "no current tier" so the full catalog is still shown.
    pub async fn load(&self) -> BillingResult<PlanCatalog> {
        let tiers = self
            .api
            .list_tiers()
            .await
            .map_err(BillingError::request(BillingOperation::ListTiers))?;

        let status = if self.api.is_authenticated() {
            match self.api.subscription_status().await {
                Ok(status) => Some(Arc::new(status)),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load subscription status, showing all plans");
                    None
                }
            }
        } else {
            None
        };

        tracing::debug!(
            tiers = tiers.len(),
            current = status.as_deref().and_then(|s| s.current_tier_name()).unwrap_or("none"),
            "Plan catalog loaded"
        );

        Ok(PlanCatalog { tiers, status })
    }
}

/// A loaded pricing page: the catalog plus one card per visible tier
#[derive(Clone)]
pub struct PricingView {
    pub catalog: PlanCatalog,
    pub cards: Vec<Arc<PlanCard>>,
}

impl std::fmt::Debug for PricingView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingView")
            .field("catalog", &self.catalog)
            .field("cards", &self.cards.len())
            .finish()
    }
}

struct PageState {
    view: ViewState<PricingView>,
    generation: u64,
    closed: bool,
}

pub struct PricingPage {
    loader: CatalogLoader,
    dispatcher: Arc<BillingRedirectDispatcher>,
    state: Mutex<PageState>,
}

impl PricingPage {
    pub fn new(api: Arc<dyn SubscriptionApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            loader: CatalogLoader::new(api.clone()),
            dispatcher: Arc::new(BillingRedirectDispatcher::new(api, navigator)),
            state: Mutex::new(PageState {
                view: ViewState::Idle,
                generation: 0,
                closed: false,
            }),
        }
    }

    pub fn view(&self) -> ViewState<PricingView> {
        self.lock_state().view.clone()
    }

    /// Load (or reload) the page. Returns whether the result was applied.
    pub async fn load(&self) -> bool {
        let generation = {
            let mut state = self.lock_state();
            if state.closed {
                return false;
            }
            state.generation += 1;
            state.view = ViewState::Loading;
            state.generation
        };

        let result = self.loader.load().await;

        let mut state = self.lock_state();
        if state.closed || state.generation != generation {
            tracing::debug!(generation, "Discarding stale pricing page load");
            return false;
        }

        state.view = match result {
            Ok(catalog) => {
                let cards = catalog
                    .visible_tiers()
                    .into_iter()
                    .map(|tier| {
                        Arc::new(PlanCard::new(
                            tier,
                            catalog.status.clone(),
                            self.dispatcher.clone(),
                        ))
                    })
                    .collect();
                ViewState::Ready(PricingView { catalog, cards })
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load pricing page");
                ViewState::Failed(e.user_message())
            }
        };
        true
    }

    /// Abandon the page; in-flight loads will not be applied
    pub fn close(&self) {
        self.lock_state().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    fn lock_state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
