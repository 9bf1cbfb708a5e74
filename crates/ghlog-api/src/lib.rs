//! GitHub REST API client for the activity log.
//!
//! Provides the two network operations the log needs:
//! - Resolving the authenticated identity (login plus registered emails)
//! - Fetching single pages of a user or organization event feed

use std::fmt;
use std::time::Duration;

use ghlog_core::{Feed, Identity, RawEvent};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Largest page size GitHub accepts for event feeds.
pub const DEFAULT_PER_PAGE: u8 = 100;
const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("ghlog/", env!("CARGO_PKG_VERSION"));

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The provided token was unusable.
    #[error("invalid token: {reason}")]
    InvalidToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// GitHub API client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    token: String,
    base_url: String,
    per_page: u8,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct User {
    login: String,
}

#[derive(Deserialize)]
struct Email {
    email: String,
}

impl Client {
    /// Creates a new client for `api.github.com` with the given bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if the
    /// HTTP client fails to build.
    pub fn new(token: impl Into<String>) -> Result<Self, GithubError> {
        let token = token.into();

        if token.is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            http,
            token,
            base_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
        })
    }

    /// Points the client at another API root, e.g. a GitHub Enterprise host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the number of events requested per page.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page.clamp(1, DEFAULT_PER_PAGE);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves the authenticated user's login and every email address
    /// registered to the account, verified or not.
    pub async fn resolve_identity(&self) -> Result<Identity, GithubError> {
        let user: User = self.get("/user", &[]).await?;
        let emails: Vec<Email> = self.get("/user/emails", &[]).await?;
        tracing::debug!(login = %user.login, emails = emails.len(), "resolved identity");
        Ok(Identity::new(
            user.login,
            emails.into_iter().map(|email| email.email),
        ))
    }

    /// Fetches one page of a feed. Pages are 1-indexed.
    pub async fn events_page(&self, feed: &Feed, page: u32) -> Result<Vec<RawEvent>, GithubError> {
        let query = [
            ("page", page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        self.get(&feed_path(feed), &query).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GithubError> {
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(GithubError::Api {
                status: status.as_u16(),
                message: parse_api_error(&body).unwrap_or(body),
            });
        }

        serde_json::from_str(&body).map_err(|err| GithubError::InvalidResponse(err.to_string()))
    }
}

/// REST path for a feed.
pub fn feed_path(feed: &Feed) -> String {
    match feed {
        Feed::Personal { user } => format!("/users/{user}/events"),
        Feed::Organization { org, user } => format!("/users/{user}/events/orgs/{org}"),
    }
}

fn parse_api_error(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| payload.message)
}
