//! Chat service integration for mention-bot.
//!
//! This module provides functionality for interacting with chat platforms like Slack:
//! - Resolving a person's chat identity from their email
//! - Sending direct messages made of display blocks
//!
//! It defines the `GenericChatClient` trait that can be implemented for different
//! chat services, with a default implementation for Slack.

pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Block, Res, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the core functionality for interacting with chat platforms
/// like Slack. Implementing this trait allows different chat services to be used
/// with mention-bot.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Resolve a chat user ID from an email address.
    ///
    /// Fails with `NotifyError::UnknownRecipient` when no account uses the email.
    async fn lookup_user_by_email(&self, email: &str) -> Res<String>;

    /// Send a direct message to a user.
    async fn send_direct_message(&self, user_id: &str, blocks: &[Block]) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
