//! Extraction of `@handle` mentions from comment text.

use std::sync::LazyLock;

use regex::Regex;

/// An `@` at the start of the text or after anything but an ASCII word
/// character, followed by a handle. The leading character is consumed so
/// `foo@example.com` never yields `example`.
static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|[^0-9A-Za-z_])@([0-9A-Za-z_-]+)").expect("mention pattern is valid"));

/// Extract the mentioned handles, without the `@`, in the order they appear.
///
/// Repeated mentions are kept. Returns `None` when the text mentions nobody.
pub fn extract_mentions(text: &str) -> Option<Vec<String>> {
    let mentions: Vec<String> = MENTION.captures_iter(text).map(|c| c[1].to_string()).collect();

    if mentions.is_empty() { None } else { Some(mentions) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mentions(text: &str) -> Vec<String> {
        extract_mentions(text).unwrap_or_default()
    }

    #[test]
    fn extracts_in_order() {
        assert_eq!(mentions("hello @alice and @bob-2, cc @carol_x"), vec!["alice", "bob-2", "carol_x"]);
    }

    #[test]
    fn no_mentions_is_none() {
        assert_eq!(extract_mentions(""), None);
        assert_eq!(extract_mentions("nothing to see here"), None);
        assert_eq!(extract_mentions("@ alice"), None);
        assert_eq!(extract_mentions("trailing @"), None);
        assert_eq!(extract_mentions("@!"), None);
    }

    #[test]
    fn emails_are_not_mentions() {
        assert_eq!(extract_mentions("contact foo@example.com for details"), None);
        assert_eq!(mentions("mail foo@example.com or ping @alice"), vec!["alice"]);
    }

    #[test]
    fn boundary_conformance() {
        let table = [
            ("@alice at start", vec!["alice"]),
            ("(@alice)", vec!["alice"]),
            ("\"@alice\"", vec!["alice"]),
            (",@alice", vec!["alice"]),
            ("line one\n@alice", vec!["alice"]),
            ("@alice@bob", vec!["alice"]),
            ("@alice.", vec!["alice"]),
            ("é@alice", vec!["alice"]),
            ("请@alice看一下", vec!["alice"]),
            ("_@alice", vec![]),
            ("x1@alice", vec![]),
        ];

        for (input, expected) in table {
            assert_eq!(mentions(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn keeps_case_and_duplicates() {
        assert_eq!(mentions("@Alice @alice @alice"), vec!["Alice", "alice", "alice"]);
    }
}
