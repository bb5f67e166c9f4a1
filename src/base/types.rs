use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Typed failures the notification pipeline can surface.
///
/// These travel inside an [`anyhow::Error`] like everything else, so callers
/// that care about the kind can `downcast_ref::<NotifyError>()`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotifyError {
    /// A handle or email could not be mapped to a Slack user.
    #[error("unknown recipient `{identity}`: {reason}")]
    UnknownRecipient { identity: String, reason: &'static str },
    /// A GitHub or Slack API call failed.
    #[error("remote call failed: {0}")]
    RemoteCall(String),
    /// The configuration or the event payload is not shaped as expected.
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl NotifyError {
    /// The handle is missing from the user map.
    pub fn unmapped_handle(handle: &str) -> Self {
        NotifyError::UnknownRecipient {
            identity: handle.to_string(),
            reason: "GitHub user has no entry in the user map",
        }
    }

    /// The email is mapped, but no Slack account uses it.
    pub fn unknown_slack_email(email: &str) -> Self {
        NotifyError::UnknownRecipient {
            identity: email.to_string(),
            reason: "no Slack user has this email",
        }
    }
}

/// A single Slack Block Kit display unit.
///
/// Serializes to the same JSON shape Slack expects, which keeps the payload
/// easy to assert on in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: BlockText },
    Divider,
}

/// Text element of a section block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockText {
    Mrkdwn { text: String },
}

impl Block {
    /// Create a section block with mrkdwn text.
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section { text: BlockText::Mrkdwn { text: text.into() } }
    }

    /// The mrkdwn text of a section, if this is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Section { text: BlockText::Mrkdwn { text } } => Some(text),
            Block::Divider => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_serialize_to_slack_shape() {
        let blocks = vec![Block::section("*hi*"), Block::Divider];
        let json = serde_json::to_value(&blocks).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "type": "section", "text": { "type": "mrkdwn", "text": "*hi*" } },
                { "type": "divider" }
            ])
        );
    }

    #[test]
    fn unknown_recipient_messages() {
        let err = NotifyError::unmapped_handle("ghost");
        assert_eq!(err.to_string(), "unknown recipient `ghost`: GitHub user has no entry in the user map");

        let err = NotifyError::unknown_slack_email("ghost@example.com");
        assert!(matches!(err, NotifyError::UnknownRecipient { ref identity, .. } if identity == "ghost@example.com"));
    }
}
