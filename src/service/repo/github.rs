//! GitHub implementation of the repo client, on top of `octocrab`.

use std::sync::Arc;

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    types::{NotifyError, Res},
};

use super::{GenericRepoClient, RepoClient};

// Extra methods on `RepoClient` applied by the github implementation.

impl RepoClient {
    /// Creates a new GitHub repo client.
    pub fn github(config: &Config) -> Res<Self> {
        let client = GithubRepoClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// GitHub client implementation.
#[derive(Clone)]
struct GithubRepoClient {
    client: Octocrab,
}

impl GithubRepoClient {
    /// Create a new GitHub client.
    #[instrument(name = "GithubRepoClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let mut builder = Octocrab::builder().personal_token(config.github_token.clone());

        if let Some(url) = config.github_api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            builder = builder.base_uri(url)?;
        }

        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl GenericRepoClient for GithubRepoClient {
    #[instrument(skip(self))]
    async fn pull_request_author(&self, owner: &str, repo: &str, number: u64) -> Res<String> {
        let pr = self
            .client
            .pulls(owner, repo)
            .get(number)
            .await
            .map_err(|e| NotifyError::RemoteCall(format!("failed to fetch pull request {owner}/{repo}#{number}: {e}")))?;

        let author = pr
            .user
            .map(|u| u.login)
            .ok_or_else(|| NotifyError::MalformedInput(format!("pull request {owner}/{repo}#{number} has no author")))?;

        debug!("Pull request author: {}", author);

        Ok(author)
    }

    #[instrument(skip(self))]
    async fn issue_author(&self, owner: &str, repo: &str, number: u64) -> Res<String> {
        let issue = self
            .client
            .issues(owner, repo)
            .get(number)
            .await
            .map_err(|e| NotifyError::RemoteCall(format!("failed to fetch issue {owner}/{repo}#{number}: {e}")))?;

        debug!("Issue author: {}", issue.user.login);

        Ok(issue.user.login)
    }
}
