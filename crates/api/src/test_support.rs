//! Helpers for tests against a mockito backend

use std::sync::{Arc, Mutex};

use bubblecleaner_billing::Navigator;

use crate::client::ApiClient;
use crate::config::Config;

pub(crate) const TEST_TOKEN: &str = "test-access-token";

pub(crate) fn client_for(server: &mockito::ServerGuard, token: Option<&str>) -> Arc<ApiClient> {
    let config = Config::for_url(&server.url())
        .unwrap()
        .with_access_token(token.map(str::to_string));
    Arc::new(ApiClient::new(&config).unwrap())
}

pub(crate) fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
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
