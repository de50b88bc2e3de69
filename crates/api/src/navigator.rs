//! Terminal implementation of the billing navigator

use bubblecleaner_billing::Navigator;

/// Prints redirect URLs to stdout and alerts to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, url: &str) {
        tracing::debug!(url = %url, "Redirect ready");
        println!("Open this link to continue:\n  {}", url);
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}
