//! Slack implementation of the chat client, on top of `slack-morphism`.

use crate::base::{
    config::Config,
    types::{Block, BlockText, NotifyError, Res, Void},
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::{errors::SlackClientError, prelude::*};
use tracing::{debug, instrument};

use std::sync::Arc;

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    pub bot_token: SlackApiToken,
    pub client: Arc<FullClient>,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        Ok(Self { bot_token, client })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    #[instrument(skip(self))]
    async fn lookup_user_by_email(&self, email: &str) -> Res<String> {
        let request = SlackApiUsersLookupByEmailRequest::new(EmailAddress(email.to_string()));
        let session = self.client.open_session(&self.bot_token);

        let response = match session.users_lookup_by_email(&request).await {
            Ok(response) => response,
            Err(SlackClientError::ApiError(ae)) if ae.code == "users_not_found" => return Err(NotifyError::unknown_slack_email(email).into()),
            Err(e) => return Err(NotifyError::RemoteCall(format!("failed to look up Slack user: {e}")).into()),
        };

        let user_id = response.user.id.0;

        debug!("Resolved Slack user: {}", user_id);

        Ok(user_id)
    }

    #[instrument(skip(self, blocks))]
    async fn send_direct_message(&self, user_id: &str, blocks: &[Block]) -> Void {
        // The header doubles as the notification preview text.
        let fallback = blocks.iter().find_map(Block::text).unwrap_or_default().to_string();

        let message = SlackMessageContent::new().with_text(fallback).with_blocks(blocks.iter().map(to_slack_block).collect());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(user_id.to_string()), message).with_as_user(true);

        let session = self.client.open_session(&self.bot_token);

        let _ = session
            .chat_post_message(&request)
            .await
            .map_err(|e| NotifyError::RemoteCall(format!("failed to send direct message: {e}")))?;

        Ok(())
    }
}

// Helpers.

fn to_slack_block(block: &Block) -> SlackBlock {
    match block {
        Block::Section { text: BlockText::Mrkdwn { text } } => SlackBlock::Section(SlackSectionBlock::new().with_text(SlackBlockText::MarkDown(SlackBlockMarkDownText::new(text.clone())))),
        Block::Divider => SlackBlock::Divider(SlackDividerBlock::new()),
    }
}

// Tests.
