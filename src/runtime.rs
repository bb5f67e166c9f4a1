//! Runtime services and shared state for mention-bot.

use serde_json::Value;
use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction,
    service::{chat::ChatClient, markup::MarkupConverter, repo::RepoClient},
};

/// Runtime service context for a single run.
///
/// This struct holds the configuration and the service clients.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The code-hosting client instance.
    pub repo: RepoClient,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The markup converter instance.
    pub markup: MarkupConverter,
}

impl Runtime {
    /// Create a new runtime instance backed by GitHub and Slack.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the GitHub client.
        let repo = RepoClient::github(&config)?;

        // Initialize the slack client.
        let chat = ChatClient::slack(&config)?;

        // Initialize the markup converter.
        let markup = MarkupConverter::slack();

        Ok(Self { config, repo, chat, markup })
    }

    /// Process one webhook payload.
    pub async fn handle(&self, payload: &Value) -> Void {
        interaction::notify::handle_payload(payload, &self.config, &self.repo, &self.chat, &self.markup).await
    }
}
