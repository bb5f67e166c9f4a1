//! The static GitHub handle → Slack email table.

use std::collections::HashMap;

use serde::Deserialize;
use serde_with::{PickFirst, json::JsonString, serde_as};

use super::types::NotifyError;

/// Raw form of the map as it arrives from configuration.
///
/// A TOML table deserializes directly; a GitHub Actions input arrives as a
/// JSON object inside a string, which `JsonString` unpacks.
#[serde_as]
#[derive(Deserialize)]
#[serde(transparent)]
struct UserMapRaw {
    #[serde_as(as = "PickFirst<(_, JsonString)>")]
    entries: HashMap<String, String>,
}

/// Maps GitHub handles to the email of their Slack account.
///
/// GitHub logins are case-insensitive, so keys are stored lowercased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "UserMapRaw")]
pub struct UserMap {
    entries: HashMap<String, String>,
}

impl From<UserMapRaw> for UserMap {
    fn from(raw: UserMapRaw) -> Self {
        raw.entries.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for UserMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into())).collect();
        Self { entries }
    }
}

impl UserMap {
    /// Look up the email for a handle.
    ///
    /// A missing or blank entry is an unknown recipient.
    pub fn email_for(&self, handle: &str) -> Result<&str, NotifyError> {
        self.entries
            .get(&handle.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| NotifyError::unmapped_handle(handle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
