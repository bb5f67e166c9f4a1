//! Library root for `mention-bot`.
//!
//! Mention-bot is a GitHub Actions step that keeps people in the loop on Slack:
//! - Reads the comment or review event that triggered the workflow
//! - Finds the `@mentions` in its body
//! - Maps each GitHub handle to a Slack user via a configured email table
//! - Sends each of them a direct message with the comment
//!
//! The bot talks to GitHub through `octocrab` and to Slack through
//! `slack-morphism`. Each service sits behind a trait so the pipeline can be
//! driven with other implementations, and with mocks in tests.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{
    config::Config,
    types::{NotifyError, Void},
};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and handles one event payload:
/// - Initializes the crypto provider
/// - Reads and parses the event payload file
/// - Creates the runtime context with the GitHub and Slack clients
/// - Runs the notification pipeline
pub async fn start(config: Config, event_path: &std::path::Path) -> Void {
    info!("Starting mention-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the default crypto provider."))?;

    // Read the event payload.
    let raw = tokio::fs::read_to_string(event_path)
        .await
        .map_err(|e| NotifyError::MalformedInput(format!("failed to read event payload `{}`: {e}", event_path.display())))?;
    let payload = serde_json::from_str(&raw).map_err(|e| NotifyError::MalformedInput(format!("event payload is not valid JSON: {e}")))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Handle the event.
    runtime.handle(&payload).await?;

    Ok(())
}
