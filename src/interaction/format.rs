//! Block layout of the direct message.

use crate::{
    base::types::Block,
    interaction::event::{Event, ThreadKind},
    service::markup::slack::escape,
};

/// Why a recipient is being notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The recipient was `@mentioned` in the body.
    Mentioned,
    /// The recipient opened the thread being commented on.
    ThreadAuthor,
}

/// Slack rejects section text longer than this many characters.
const MAX_SECTION_CHARS: usize = 3000;

/// Build the message blocks for one recipient.
///
/// The layout is a header section, a divider, the converted body inside a
/// preformatted block, and a trailing divider. `body` is embedded verbatim,
/// unless it would overflow the section, in which case it is cut and followed
/// by a link to the full comment or review.
pub fn format_notification(event: &Event, reason: Reason, body: &str) -> Vec<Block> {
    vec![Block::section(header(event, reason)), Block::Divider, Block::section(body_text(event, body)), Block::Divider]
}

fn body_text(event: &Event, body: &str) -> String {
    let text = format!("```\n{body}\n```");
    if text.chars().count() <= MAX_SECTION_CHARS {
        return text;
    }

    let more = format!("\n<{}|See the full {}>", event.source_url(), noun(event));
    let budget = MAX_SECTION_CHARS.saturating_sub(more.chars().count() + "```\n…\n```".chars().count());

    let mut cut: String = body.chars().take(budget).collect();

    // Do not leave half an `&amp;` style entity behind.
    if let Some(amp) = cut.rfind('&') {
        if !cut[amp..].contains(';') {
            cut.truncate(amp);
        }
    }

    format!("```\n{cut}…\n```{more}")
}

fn noun(event: &Event) -> &'static str {
    if event.is_review() { "review" } else { "comment" }
}

fn header(event: &Event, reason: Reason) -> String {
    let sender = escape(event.sender());
    let source = event.source_url();
    let noun = noun(event);
    let thread = thread_link(event);

    let action = match reason {
        Reason::Mentioned => format!("mentioned you in a <{source}|{noun}> on {thread}"),
        Reason::ThreadAuthor => format!("left a <{source}|{noun}> on your {thread}"),
    };

    match event.thread_kind() {
        ThreadKind::PullRequest => {
            let repository = event.repository();
            format!("*{sender}* {action} for _<{}|{}>_", repository.html_url, escape(&repository.name))
        }
        ThreadKind::Issue => format!("*{sender}* {action}"),
    }
}

fn thread_link(event: &Event) -> String {
    let thread = event.thread();
    let label = match event.thread_kind() {
        ThreadKind::Issue if !thread.is_pull_request() => format!("issue #{}", thread.number),
        _ => format!("PR #{}", thread.number),
    };

    if thread.title.trim().is_empty() {
        format!("*<{}|{label}>*", thread.html_url)
    } else {
        format!("*<{}|{label}: {}>*", thread.html_url, escape(thread.title.trim()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::service::markup::{GenericMarkupConverter, slack::SlackMarkupConverter};

    fn event(payload: serde_json::Value) -> Event {
        Event::classify(&payload).unwrap().unwrap()
    }

    fn repository() -> serde_json::Value {
        json!({ "name": "widgets", "html_url": "https://github.com/acme/widgets", "owner": { "login": "acme" } })
    }

    fn pull_request_comment() -> Event {
        event(json!({
            "comment": { "body": "hi @alice", "html_url": "https://github.com/acme/widgets/pull/7#discussion_r1", "user": { "login": "dave" } },
            "pull_request": { "number": 7, "html_url": "https://github.com/acme/widgets/pull/7", "title": "Fix <it> & more" },
            "repository": repository(),
        }))
    }

    #[test]
    fn pull_request_layout() {
        let blocks = format_notification(&pull_request_comment(), Reason::Mentioned, "hi @alice");

        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks[0].text().unwrap(),
            "*dave* mentioned you in a <https://github.com/acme/widgets/pull/7#discussion_r1|comment> on *<https://github.com/acme/widgets/pull/7|PR #7: Fix &lt;it&gt; &amp; more>* for _<https://github.com/acme/widgets|widgets>_"
        );
        assert_eq!(blocks[1], Block::Divider);
        assert_eq!(blocks[2].text().unwrap(), "```\nhi @alice\n```");
        assert_eq!(blocks[3], Block::Divider);
    }

    #[test]
    fn thread_author_layout() {
        let blocks = format_notification(&pull_request_comment(), Reason::ThreadAuthor, "hi");

        assert!(blocks[0].text().unwrap().starts_with("*dave* left a <https://github.com/acme/widgets/pull/7#discussion_r1|comment> on your *<"));
    }

    #[test]
    fn issue_layout_has_no_repository() {
        let event = event(json!({
            "comment": { "body": "hi", "html_url": "https://github.com/acme/widgets/issues/3#issuecomment-1", "user": { "login": "dave" } },
            "issue": { "number": 3, "html_url": "https://github.com/acme/widgets/issues/3", "title": "" },
            "repository": repository(),
        }));

        let blocks = format_notification(&event, Reason::Mentioned, "hi");

        assert_eq!(
            blocks[0].text().unwrap(),
            "*dave* mentioned you in a <https://github.com/acme/widgets/issues/3#issuecomment-1|comment> on *<https://github.com/acme/widgets/issues/3|issue #3>*"
        );
    }

    #[test]
    fn issue_comment_on_pull_request_is_labelled_as_pr() {
        let event = event(json!({
            "comment": { "body": "hi", "html_url": "https://github.com/acme/widgets/pull/7#issuecomment-1", "user": { "login": "dave" } },
            "issue": {
                "number": 7,
                "html_url": "https://github.com/acme/widgets/pull/7",
                "title": "Fix",
                "pull_request": { "url": "https://api.github.com/repos/acme/widgets/pulls/7" },
            },
            "repository": repository(),
        }));

        let blocks = format_notification(&event, Reason::Mentioned, "hi");

        assert_eq!(
            blocks[0].text().unwrap(),
            "*dave* mentioned you in a <https://github.com/acme/widgets/pull/7#issuecomment-1|comment> on *<https://github.com/acme/widgets/pull/7|PR #7: Fix>*"
        );
    }

    #[test]
    fn body_with_code_block_keeps_one_fence_pair() {
        let body = SlackMarkupConverter.convert("@alice try:\n\n```\nlet x = 1;\n```\n\nthanks");

        let blocks = format_notification(&pull_request_comment(), Reason::Mentioned, &body);
        let text = blocks[2].text().unwrap();

        assert_eq!(text.matches("```").count(), 2);
        assert_eq!(text, "```\n@alice try:\n\n    let x = 1;\n\nthanks\n```");
    }

    #[test]
    fn long_body_is_cut_with_a_link() {
        let body = format!("{}&amp;tail", "x".repeat(MAX_SECTION_CHARS));

        let blocks = format_notification(&pull_request_comment(), Reason::Mentioned, &body);
        let text = blocks[2].text().unwrap();

        assert!(text.chars().count() <= MAX_SECTION_CHARS);
        assert!(text.starts_with("```\nxxx"));
        assert!(text.ends_with("…\n```\n<https://github.com/acme/widgets/pull/7#discussion_r1|See the full comment>"));
        assert!(!text.contains("tail"));
    }

    #[test]
    fn entities_are_not_split_when_cutting() {
        let budget = MAX_SECTION_CHARS - "\n<https://github.com/acme/widgets/pull/7#discussion_r1|See the full comment>".len() - "```\n…\n```".chars().count();
        let body = format!("{}&amp;{}", "x".repeat(budget - 2), "y".repeat(MAX_SECTION_CHARS));

        let blocks = format_notification(&pull_request_comment(), Reason::Mentioned, &body);
        let text = blocks[2].text().unwrap();

        assert!(text.starts_with(&format!("```\n{}…", "x".repeat(budget - 2))));
    }

    #[test]
    fn review_is_named_as_such() {
        let event = event(json!({
            "review": { "body": "lgtm @alice", "html_url": "https://github.com/acme/widgets/pull/7#pullrequestreview-1", "user": { "login": "dave" } },
            "pull_request": { "number": 7, "html_url": "https://github.com/acme/widgets/pull/7", "title": "Fix" },
            "repository": repository(),
        }));

        let blocks = format_notification(&event, Reason::Mentioned, "lgtm");

        assert!(blocks[0].text().unwrap().contains("|review> on *<https://github.com/acme/widgets/pull/7|PR #7: Fix>*"));
    }
}
