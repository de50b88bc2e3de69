//! Plan card lifecycle
//!
//! `Idle → InFlight → NavigatedAway`, or back to `Idle` carrying the error.
//! A click is only honored from `Idle`; the switch to `InFlight` happens
//! under the lock before any request is awaited, so a second click while a
//! request is outstanding sends nothing.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::dispatcher::{BillingRedirectDispatcher, Redirect};
use crate::presenter::{present_button, present_card, ButtonAction, PlanCardView};
use crate::subscriptions::{SubscriptionStatus, Tier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardState {
    Idle { last_error: Option<String> },
    InFlight,
    /// The browser has left the page; the card never leaves this state
    NavigatedAway { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing to do: free tier, request already in flight, or already navigated
    Ignored,
    Navigated(Redirect),
    Failed(String),
}

pub struct PlanCard {
    tier: Tier,
    status: Option<Arc<SubscriptionStatus>>,
    dispatcher: Arc<BillingRedirectDispatcher>,
    state: Mutex<CardState>,
}

impl PlanCard {
    pub fn new(
        tier: Tier,
        status: Option<Arc<SubscriptionStatus>>,
        dispatcher: Arc<BillingRedirectDispatcher>,
    ) -> Self {
        Self {
            tier,
            status,
            dispatcher,
            state: Mutex::new(CardState::Idle { last_error: None }),
        }
    }

    pub fn tier(&self) -> &Tier {
        &self.tier
    }

    pub fn state(&self) -> CardState {
        self.lock_state().clone()
    }

    pub fn view(&self) -> PlanCardView {
        let in_flight = matches!(*self.lock_state(), CardState::InFlight);
        present_card(&self.tier, self.status.as_deref(), in_flight)
    }

    pub async fn click(&self) -> ClickOutcome {
        let action = {
            let mut state = self.lock_state();
            if !matches!(*state, CardState::Idle { .. }) {
                tracing::debug!(tier = %self.tier.name, "Ignoring click while card is busy");
                return ClickOutcome::Ignored;
            }

            let button = present_button(&self.tier, self.status.as_deref(), false);
            if !button.enabled || button.action == ButtonAction::None {
                return ClickOutcome::Ignored;
            }

            *state = CardState::InFlight;
            button.action
        };

        let result = self
            .dispatcher
            .dispatch(action, &self.tier.name, self.status.as_deref())
            .await;

        let mut state = self.lock_state();
        match result {
            Ok(Some(redirect)) => {
                *state = CardState::NavigatedAway {
                    url: redirect.url.clone(),
                };
                ClickOutcome::Navigated(redirect)
            }
            Ok(None) => {
                *state = CardState::Idle { last_error: None };
                ClickOutcome::Ignored
            }
            Err(e) => {
                let message = e.user_message();
                *state = CardState::Idle {
                    last_error: Some(message.clone()),
                };
                ClickOutcome::Failed(message)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
