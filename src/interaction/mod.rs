//! Event handling for mention-bot.
//!
//! This module turns a GitHub webhook payload into Slack direct messages:
//! - Classifying the payload into a comment or review event
//! - Extracting `@mentions` from the body
//! - Formatting and delivering one message per recipient

pub mod event;
pub mod format;
pub mod mention;
pub mod notify;
