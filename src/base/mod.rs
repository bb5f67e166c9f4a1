//! Core components, types, and utilities for mention-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The GitHub handle → Slack email table.
//! - Common types, errors, and result handling.

pub mod config;
pub mod types;
pub mod user_map;
