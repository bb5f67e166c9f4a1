//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for various services used by mention-bot:
//! - Chat services (e.g., Slack)
//! - Code-hosting services (e.g., GitHub)
//! - Markup conversion (e.g., GitHub markdown to Slack mrkdwn)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod markup;
pub mod repo;
