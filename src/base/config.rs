//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::{
    types::{NotifyError, Res},
    user_map::UserMap,
};

/// Configuration for the mention-bot application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// GitHub API token (`GITHUB_TOKEN`, action input `githubToken`).
    #[serde(alias = "githubtoken")]
    pub github_token: String,
    /// GitHub API base URL, for GitHub Enterprise installs (`GITHUB_API_URL`).
    #[serde(default)]
    pub github_api_url: Option<String>,
    /// Slack bot token (`SLACK_BOT_TOKEN`, action input `slackToken`).
    #[serde(alias = "slacktoken")]
    pub slack_bot_token: String,
    /// Slack signing secret (`SLACK_SIGNING_SECRET`, action input `slackSigningSecret`).
    ///
    /// Accepted so workflows that pass it do not fail; direct messages are
    /// sent with the bot token alone.
    #[serde(default, alias = "slacksigningsecret")]
    pub slack_signing_secret: Option<String>,
    /// GitHub handle → Slack email table (`USER_MAP`, action input `userMap`), as a table or a JSON object string.
    #[serde(default, alias = "usermap")]
    pub user_map: UserMap,
    /// Also DM the pull request or issue author about comments from others (`NOTIFY_THREAD_AUTHOR`).
    #[serde(default)]
    pub notify_thread_author: bool,
}

impl Config {
    /// Load the configuration.
    ///
    /// Sources, lowest precedence first: the config file, GitHub Actions
    /// inputs (`INPUT_*`), then `MENTION_BOT_*` environment variables.
    ///
    /// The runner upper-cases input names without inserting separators, so
    /// `userMap` arrives as `INPUT_USERMAP`; both that and `INPUT_USER_MAP`
    /// are read. Give each setting through one name only.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        Self::load_from(explicit_path, config::Environment::with_prefix("INPUT"), config::Environment::with_prefix("MENTION_BOT"))
    }

    fn load_from(explicit_path: Option<&std::path::Path>, inputs: config::Environment, overrides: config::Environment) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let cfg = cfg.add_source(inputs).add_source(overrides);

        let inner: ConfigInner = cfg
            .build()?
            .try_deserialize()
            .map_err(|e| NotifyError::MalformedInput(format!("invalid configuration: {e}")))?;

        let result = Config { inner: Arc::new(inner) };

        result.validate()?;

        Ok(result)
    }

    fn validate(&self) -> Res<()> {
        if self.github_token.trim().is_empty() {
            return Err(NotifyError::MalformedInput("GitHub token must not be empty.".to_string()).into());
        }

        if self.slack_bot_token.trim().is_empty() {
            return Err(NotifyError::MalformedInput("Slack bot token must not be empty.".to_string()).into());
        }

        Ok(())
    }
}
