//! Classification of inbound GitHub webhook payloads.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::base::types::{NotifyError, Res};

// Payload pieces.

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    pub owner: User,
}

/// A comment on an issue, a pull request conversation, or a pull request diff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub user: User,
}

/// A pull request review; its body is `null` for reviews left without a summary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub user: User,
}

/// The pull request or issue being discussed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thread {
    pub number: u64,
    pub html_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub user: Option<User>,
    /// Present on an issue payload when the issue is really a pull request.
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl Thread {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

// Events.

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueCommentEvent {
    pub comment: Comment,
    pub issue: Thread,
    pub repository: Repository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestCommentEvent {
    pub comment: Comment,
    pub pull_request: Thread,
    pub repository: Repository,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestReviewEvent {
    pub review: Review,
    pub pull_request: Thread,
    pub repository: Repository,
}

/// The three payload shapes that can lead to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    IssueComment(IssueCommentEvent),
    PullRequestComment(PullRequestCommentEvent),
    PullRequestReview(PullRequestReviewEvent),
}

/// Which kind of thread an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadKind {
    PullRequest,
    Issue,
}

impl Event {
    /// Pick the event variant from the payload's shape.
    ///
    /// Shapes are checked in order: `comment` + `issue`, `comment` +
    /// `pull_request`, then `review` + `pull_request`. A payload that fits
    /// none of them is `Ok(None)`; one that fits a shape but lacks the fields
    /// that shape needs is a `MalformedInput` error.
    pub fn classify(payload: &Value) -> Res<Option<Self>> {
        let has = |key: &str| payload.get(key).is_some_and(|v| !v.is_null());

        let event = if has("comment") && has("issue") {
            Event::IssueComment(parse(payload, "issue comment")?)
        } else if has("comment") && has("pull_request") {
            Event::PullRequestComment(parse(payload, "pull request comment")?)
        } else if has("review") && has("pull_request") {
            Event::PullRequestReview(parse(payload, "pull request review")?)
        } else {
            return Ok(None);
        };

        Ok(Some(event))
    }

    pub fn thread_kind(&self) -> ThreadKind {
        match self {
            Event::IssueComment(_) => ThreadKind::Issue,
            Event::PullRequestComment(_) | Event::PullRequestReview(_) => ThreadKind::PullRequest,
        }
    }

    pub fn repository(&self) -> &Repository {
        match self {
            Event::IssueComment(e) => &e.repository,
            Event::PullRequestComment(e) => &e.repository,
            Event::PullRequestReview(e) => &e.repository,
        }
    }

    pub fn thread(&self) -> &Thread {
        match self {
            Event::IssueComment(e) => &e.issue,
            Event::PullRequestComment(e) => &e.pull_request,
            Event::PullRequestReview(e) => &e.pull_request,
        }
    }

    /// The comment or review text; an absent body reads as empty.
    pub fn body(&self) -> &str {
        let body = match self {
            Event::IssueComment(e) => &e.comment.body,
            Event::PullRequestComment(e) => &e.comment.body,
            Event::PullRequestReview(e) => &e.review.body,
        };

        body.as_deref().unwrap_or_default()
    }

    /// The login of whoever wrote the comment or review.
    pub fn sender(&self) -> &str {
        match self {
            Event::IssueComment(e) => &e.comment.user.login,
            Event::PullRequestComment(e) => &e.comment.user.login,
            Event::PullRequestReview(e) => &e.review.user.login,
        }
    }

    /// Link to the comment or review itself.
    pub fn source_url(&self) -> &str {
        match self {
            Event::IssueComment(e) => &e.comment.html_url,
            Event::PullRequestComment(e) => &e.comment.html_url,
            Event::PullRequestReview(e) => &e.review.html_url,
        }
    }

    pub fn is_review(&self) -> bool {
        matches!(self, Event::PullRequestReview(_))
    }
}

fn parse<T: DeserializeOwned>(payload: &Value, what: &str) -> Res<T> {
    T::deserialize(payload).map_err(|e| NotifyError::MalformedInput(format!("{what} payload: {e}")).into())
}
