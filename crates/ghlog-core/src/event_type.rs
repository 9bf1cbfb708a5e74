//! Event kind enum as the single source of truth for GitHub event type strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GitHub event types that get a dedicated label or renderer.
///
/// Anything else is carried verbatim in [`EventKind::Unknown`] and rendered by
/// the generic formatter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    PullRequest,
    Create,
    Delete,
    Fork,
    Release,
    PullRequestReview,
    PullRequestReviewComment,
    IssueComment,
    Unknown(String),
}

impl EventKind {
    /// The raw type name as it appears in the feed.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "PushEvent",
            Self::PullRequest => "PullRequestEvent",
            Self::Create => "CreateEvent",
            Self::Delete => "DeleteEvent",
            Self::Fork => "ForkEvent",
            Self::Release => "ReleaseEvent",
            Self::PullRequestReview => "PullRequestReviewEvent",
            Self::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            Self::IssueComment => "IssueCommentEvent",
            Self::Unknown(raw) => raw,
        }
    }

    /// Short display label used in log lines.
    pub fn label(&self) -> &str {
        match self {
            Self::Push => "Push",
            Self::PullRequest => "PR",
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Fork => "Fork",
            Self::Release => "Release",
            Self::PullRequestReview => "PR Review",
            Self::PullRequestReviewComment => "PR Comment",
            Self::IssueComment => "Issue Comment",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "PushEvent" => Self::Push,
            "PullRequestEvent" => Self::PullRequest,
            "CreateEvent" => Self::Create,
            "DeleteEvent" => Self::Delete,
            "ForkEvent" => Self::Fork,
            "ReleaseEvent" => Self::Release,
            "PullRequestReviewEvent" => Self::PullRequestReview,
            "PullRequestReviewCommentEvent" => Self::PullRequestReviewComment,
            "IssueCommentEvent" => Self::IssueComment,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}
