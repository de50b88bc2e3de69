//! Command-line interface
//!
//! Every account, billing and quota flow is exposed as a subcommand. The
//! session token comes from `--token` or `BUBBLE_CLEANER_TOKEN` and is never
//! written to disk; `login` prints it so it can be exported.

use std::io::{BufRead, Write};
use std::process::ExitCode;

use bubblecleaner_billing::{
    cancel_subscription, ButtonAction, ClickOutcome, PlanCardView, SubscriptionApi,
};
use bubblecleaner_shared::ViewState;
use clap::{Parser, Subcommand};

use crate::auth::{LoginForm, RegistrationForm, VerificationState, RESENT_MESSAGE, VERIFIED_MESSAGE};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "bubblecleaner", version, about = "Bubble Cleaner account and subscription client")]
pub struct Cli {
    /// Backend base URL (overrides BUBBLE_CLEANER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token of an existing session (overrides BUBBLE_CLEANER_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the plans available to you
    Plans,
    /// Start a checkout or plan change for a tier
    Subscribe {
        /// Tier name, e.g. Basic
        tier: String,
    },
    /// Open the subscription management portal
    Manage,
    /// Cancel the current subscription
    Cancel,
    /// Show daily and monthly quota usage
    Quotas,
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Log in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Verify an email address from a token or the link in the email
    VerifyEmail { token_or_link: String },
    /// Send the verification email again
    ResendVerification { email: String },
}

/// Run one command to completion
pub async fn run(command: Command, state: &AppState) -> ApiResult<ExitCode> {
    match command {
        Command::Plans => plans(state).await,
        Command::Subscribe { tier } => subscribe(state, &tier).await,
        Command::Manage => manage(state).await,
        Command::Cancel => {
            let message = cancel_subscription(state.client.as_ref()).await?;
            println!("{}", message);
            Ok(ExitCode::SUCCESS)
        }
        Command::Quotas => {
            let view = state.quota_display().refresh().await?;
            print!("{}", view);
            Ok(ExitCode::SUCCESS)
        }
        Command::Register {
            email,
            username,
            password,
            confirm_password,
        } => {
            let password = secret_or_prompt(password, "Password: ")?;
            let confirm_password = secret_or_prompt(confirm_password, "Confirm password: ")?;
            let form = RegistrationForm {
                email,
                username,
                password,
                confirm_password,
            };
            let user = state.auth().register(&form).await?;
            println!(
                "Account created for {}. Check {} for the verification link.",
                user.username, user.email
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Login { email, password } => {
            let password = secret_or_prompt(password, "Password: ")?;
            let session = state.auth().login(&LoginForm { email, password }).await?;
            println!("Logged in. Export this token to stay logged in:");
            println!("  BUBBLE_CLEANER_TOKEN={}", session.access_token);
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => {
            state.auth().logout().await;
            println!("Logged out.");
            Ok(ExitCode::SUCCESS)
        }
        Command::VerifyEmail { token_or_link } => {
            let mut flow = state.email_verification();
            match flow.verify(&token_or_link).await {
                VerificationState::Verified(_) => {
                    println!("{}", VERIFIED_MESSAGE);
                    if let Some(token) = state.client.session().access_token() {
                        println!("  BUBBLE_CLEANER_TOKEN={}", token);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                VerificationState::Failed(message) => {
                    eprintln!("{}", message);
                    eprintln!("Run `bubblecleaner resend-verification <email>` to get a new link.");
                    Ok(ExitCode::FAILURE)
                }
                _ => Ok(ExitCode::FAILURE),
            }
        }
        Command::ResendVerification { email } => {
            let mut flow = state.email_verification();
            match flow.resend(&email).await {
                VerificationState::Resent => {
                    println!("{}", RESENT_MESSAGE);
                    Ok(ExitCode::SUCCESS)
                }
                VerificationState::Failed(message) => {
                    eprintln!("{}", message);
                    Ok(ExitCode::FAILURE)
                }
                _ => Ok(ExitCode::FAILURE),
            }
        }
    }
}

async fn plans(state: &AppState) -> ApiResult<ExitCode> {
    let page = state.pricing_page();
    page.load().await;

    match page.view() {
        ViewState::Ready(view) => {
            println!("Current plan: {}\n", view.catalog.current_plan_label());
            for card in &view.cards {
                print!("{}", render_card(&card.view()));
            }
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Failed(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::FAILURE)
        }
        ViewState::Idle | ViewState::Loading => Ok(ExitCode::FAILURE),
    }
}

async fn subscribe(state: &AppState, tier_name: &str) -> ApiResult<ExitCode> {
    let page = state.pricing_page();
    page.load().await;

    let view = match page.view() {
        ViewState::Ready(view) => view,
        ViewState::Failed(message) => {
            eprintln!("{}", message);
            return Ok(ExitCode::FAILURE);
        }
        ViewState::Idle | ViewState::Loading => return Ok(ExitCode::FAILURE),
    };

    let card = view
        .cards
        .iter()
        .find(|card| card.tier().is_named(tier_name))
        .ok_or_else(|| ApiError::PlanUnavailable(tier_name.to_string()))?;

    match card.click().await {
        ClickOutcome::Navigated(_) => Ok(ExitCode::SUCCESS),
        ClickOutcome::Ignored => {
            println!(
                "Nothing to do for {}: {}",
                card.tier().name,
                card.view().button.label
            );
            Ok(ExitCode::SUCCESS)
        }
        // The navigator has already shown the alert
        ClickOutcome::Failed(_) => Ok(ExitCode::FAILURE),
    }
}

async fn manage(state: &AppState) -> ApiResult<ExitCode> {
    let status = if state.client.is_authenticated() {
        state.client.subscription_status().await.ok()
    } else {
        None
    };
    let current = status
        .as_ref()
        .and_then(|s| s.current_tier_name())
        .unwrap_or_default()
        .to_string();

    match state
        .dispatcher()
        .dispatch(ButtonAction::Manage, &current, status.as_ref())
        .await
    {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

pub fn render_card(card: &PlanCardView) -> String {
    let mut out = String::new();
    let marker = if card.is_current { " (current)" } else { "" };
    out.push_str(&format!("{}{}  {}\n", card.name, marker, card.price_label));
    if let Some(description) = &card.description {
        out.push_str(&format!("  {}\n", description));
    }
    out.push_str(&format!("  {}, {}\n", card.daily_quota, card.monthly_quota));
    for feature in &card.features {
        out.push_str(&format!("  - {}\n", feature));
    }
    let disabled = if card.button.enabled { "" } else { " (disabled)" };
    out.push_str(&format!("  [{}]{}\n\n", card.button.label, disabled));
    out
}

fn secret_or_prompt(value: Option<String>, prompt: &str) -> ApiResult<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    let mut stderr = std::io::stderr();
    write!(stderr, "{}", prompt)?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubblecleaner_billing::{present_card, SubscriptionStatus, Tier};
    use bubblecleaner_shared::{Price, SubscriptionTier};

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bubblecleaner",
            "subscribe",
            "Basic",
            "--api-url",
            "http://127.0.0.1:8000",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:8000"));
        assert!(matches!(cli.command, Command::Subscribe { ref tier } if tier == "Basic"));
    }

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from([
            "bubblecleaner",
            "register",
            "--email",
            "reader@example.com",
            "--username",
            "reader",
        ])
        .unwrap();
        match cli.command {
            Command::Register { password, .. } => assert!(password.is_none()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_render_current_card() {
        let status = SubscriptionStatus::with_current("Basic", Price::from_cents(399));
        let view = present_card(&Tier::from_kind(SubscriptionTier::Basic), Some(&status), false);
        let text = render_card(&view);

        assert!(text.starts_with("Basic (current)  3,99\u{a0}€ / month"));
        assert!(text.contains("50 images/day, 200 images/month"));
        assert!(text.contains("[manage subscription]"));
    }

    #[test]
    fn test_render_free_card_is_disabled() {
        let view = present_card(&Tier::from_kind(SubscriptionTier::Free), None, false);
        assert!(render_card(&view).contains("[free] (disabled)"));
    }
}
