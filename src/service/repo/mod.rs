//! Code-hosting service integration.
//!
//! Only thread metadata is needed here: who opened a pull request or issue.

pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic "repo" trait that code-hosting clients must implement.
#[async_trait]
pub trait GenericRepoClient: Send + Sync + 'static {
    /// Get the login of the user who opened a pull request.
    async fn pull_request_author(&self, owner: &str, repo: &str, number: u64) -> Res<String>;

    /// Get the login of the user who opened an issue.
    async fn issue_author(&self, owner: &str, repo: &str, number: u64) -> Res<String>;
}

// Structs.

/// Repo client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct RepoClient {
    inner: Arc<dyn GenericRepoClient>,
}

impl Deref for RepoClient {
    type Target = dyn GenericRepoClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl RepoClient {
    pub fn new(inner: Arc<dyn GenericRepoClient>) -> Self {
        Self { inner }
    }
}
