//! The notification pipeline: classify, extract, resolve, format, deliver.

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    interaction::{
        event::{Event, ThreadKind},
        format::{Reason, format_notification},
        mention::extract_mentions,
    },
    service::{chat::ChatClient, markup::MarkupConverter, repo::RepoClient},
};

/// Handle one webhook payload.
///
/// Payloads that are not a comment or review are ignored. Recipients are
/// notified one at a time, in mention order; the first failure aborts the
/// rest of the run.
#[instrument(skip_all)]
pub async fn handle_payload(payload: &Value, config: &Config, repo: &RepoClient, chat: &ChatClient, markup: &MarkupConverter) -> Void {
    let Some(event) = Event::classify(payload)? else {
        debug!("Payload is not a comment or review event; nothing to do.");
        return Ok(());
    };

    handle_event(&event, config, repo, chat, markup).await
}

#[instrument(skip_all, fields(sender = event.sender(), thread = event.thread().number))]
async fn handle_event(event: &Event, config: &Config, repo: &RepoClient, chat: &ChatClient, markup: &MarkupConverter) -> Void {
    let author = thread_author(event, repo).await?;

    let recipients = recipients(event, &author, config.notify_thread_author);

    if recipients.is_empty() {
        info!("No one to notify.");
        return Ok(());
    }

    let body = markup.convert(event.body());

    for (handle, reason) in recipients {
        let email = config.user_map.email_for(&handle)?;
        let user_id = chat.lookup_user_by_email(email).await?;

        let blocks = format_notification(event, reason, &body);
        chat.send_direct_message(&user_id, &blocks).await?;

        info!("Notified `{}` ({:?}).", handle, reason);
    }

    Ok(())
}

/// The thread author's login, from the payload when present, else from the API.
async fn thread_author(event: &Event, repo: &RepoClient) -> Res<String> {
    if let Some(user) = &event.thread().user {
        return Ok(user.login.clone());
    }

    let repository = event.repository();
    let number = event.thread().number;

    debug!("Thread author missing from payload; fetching it.");

    match event.thread_kind() {
        ThreadKind::PullRequest => repo.pull_request_author(&repository.owner.login, &repository.name, number).await,
        ThreadKind::Issue => repo.issue_author(&repository.owner.login, &repository.name, number).await,
    }
}

/// Everyone due a message, in order.
///
/// Mentions come first, repeats included. The thread author is appended when
/// requested, unless they wrote the comment or were already mentioned.
fn recipients(event: &Event, author: &str, notify_thread_author: bool) -> Vec<(String, Reason)> {
    let mentions = extract_mentions(event.body()).unwrap_or_default();

    let author_due = notify_thread_author && !author.eq_ignore_ascii_case(event.sender()) && !mentions.iter().any(|m| m.eq_ignore_ascii_case(author));

    let mut recipients: Vec<(String, Reason)> = mentions.into_iter().map(|m| (m, Reason::Mentioned)).collect();

    if author_due {
        recipients.push((author.to_string(), Reason::ThreadAuthor));
    }

    recipients
}
