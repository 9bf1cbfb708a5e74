//! Rendering events as log lines.
//!
//! Every line starts with the same prefix, a tab separating the label from
//! the repository:
//!
//! ```text
//! 2024-05-01 14:00:00+02:00 alice/Push    acme/widgets:main
//! ```
//!
//! followed by ` - ` and a type-specific detail. Pushes render one line per
//! commit; every other kind renders a single line.

use serde::Deserialize;
use serde_json::Value;

use crate::event::{Event, EventError};
use crate::event_type::EventKind;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

#[derive(Deserialize)]
struct PushPayload {
    #[serde(default)]
    commits: Vec<Commit>,
}

#[derive(Deserialize)]
struct Commit {
    message: String,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: Titled,
}

#[derive(Deserialize)]
struct ReviewPayload {
    pull_request: Titled,
}

#[derive(Deserialize)]
struct IssueCommentPayload {
    issue: Titled,
}

#[derive(Deserialize)]
struct Titled {
    title: String,
}

#[derive(Deserialize)]
struct RefPayload {
    ref_type: String,
}

/// Renders an event as one or more log lines.
pub fn format_event(event: &Event) -> Result<Vec<String>, EventError> {
    let prefix = prefix(event);
    let lines = match &event.kind {
        EventKind::Push => {
            let payload = PushPayload::deserialize(&event.payload)?;
            if payload.commits.is_empty() {
                vec![format!("{prefix} - (no commits)")]
            } else {
                payload
                    .commits
                    .iter()
                    .map(|commit| format!("{prefix} - {}", single_line(&commit.message)))
                    .collect()
            }
        }
        EventKind::PullRequest => {
            let payload = PullRequestPayload::deserialize(&event.payload)?;
            vec![format!(
                "{prefix} - {} - {}",
                payload.action, payload.pull_request.title
            )]
        }
        EventKind::Create | EventKind::Delete => {
            let payload = RefPayload::deserialize(&event.payload)?;
            let name = if payload.ref_type == "repository" {
                event.repo.as_str()
            } else {
                branch(&event.payload).unwrap_or_default()
            };
            let detail = format!("{} {name}", payload.ref_type);
            vec![format!("{prefix} - {}", detail.trim_end())]
        }
        EventKind::PullRequestReview | EventKind::PullRequestReviewComment => {
            let payload = ReviewPayload::deserialize(&event.payload)?;
            vec![format!("{prefix} - on PR {}", payload.pull_request.title)]
        }
        EventKind::IssueComment => {
            let payload = IssueCommentPayload::deserialize(&event.payload)?;
            vec![format!("{prefix} - on Issue {}", payload.issue.title)]
        }
        EventKind::Fork | EventKind::Release | EventKind::Unknown(_) => {
            vec![format!("{prefix} - {}", event.payload)]
        }
    };
    Ok(lines)
}

fn prefix(event: &Event) -> String {
    let timestamp = event.created_at.format(TIMESTAMP_FORMAT);
    let head = format!(
        "{timestamp} {}/{}\t{}",
        event.actor,
        event.kind.label(),
        event.repo
    );
    match branch(&event.payload) {
        Some(branch) => format!("{head}:{branch}"),
        None => head,
    }
}

/// Last `/` segment of the payload's `ref`, when there is a non-empty one.
fn branch(payload: &Value) -> Option<&str> {
    payload
        .get("ref")
        .and_then(Value::as_str)
        .and_then(|reference| reference.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
}

fn single_line(message: &str) -> String {
    message.replace('\r', "").replace('\n', ",")
}
