//! Blocking bridge from the async GitHub client to the feed pipeline.

use anyhow::{Context, Result};
use ghlog_api::{Client, GithubError};
use ghlog_core::{EventSource, Feed, Identity, RawEvent};
use tokio::runtime::{Builder, Runtime};

/// Runs each GitHub request to completion on a single-threaded runtime.
pub struct GithubSource {
    client: Client,
    runtime: Runtime,
}

impl GithubSource {
    pub fn new(client: Client) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to initialize tokio runtime")?;
        Ok(Self { client, runtime })
    }

    pub fn resolve_identity(&self) -> Result<Identity, GithubError> {
        self.runtime.block_on(self.client.resolve_identity())
    }
}

impl EventSource for GithubSource {
    type Error = GithubError;

    fn fetch_page(&self, feed: &Feed, page: u32) -> Result<Vec<RawEvent>, Self::Error> {
        self.runtime.block_on(self.client.events_page(feed, page))
    }
}
