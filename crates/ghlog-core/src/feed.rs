//! Paging through event feeds and collecting one day of activity.
//!
//! Feeds are newest first. Each feed is paged until a page holds an event
//! older than the window start, the feed runs dry, or a fetch fails. The rest
//! of the page that crossed the boundary is still examined, because GitHub
//! does not strictly order events within a page.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, TimeZone};

use crate::event::{Event, EventError, RawEvent};
use crate::filter::EventFilter;
use crate::format::format_event;
use crate::identity::Identity;
use crate::window::{DayWindow, Placement};

/// Default cap on pages fetched per feed. GitHub serves at most 300 events
/// per feed, which is ten pages at its default page size.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// A paginated, newest-first source of events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Events performed by `user`.
    Personal { user: String },
    /// `user`'s view of an organization's events.
    Organization { org: String, user: String },
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal { user } => write!(f, "user {user}"),
            Self::Organization { org, user } => write!(f, "org {org} (as {user})"),
        }
    }
}

/// Fetches single pages of a feed.
///
/// Pages are 1-indexed. An empty page means the feed has no more events.
pub trait EventSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_page(&self, feed: &Feed, page: u32) -> Result<Vec<RawEvent>, Self::Error>;
}

/// One day of activity for one identity.
///
/// The day window is built from the same zone that timestamps are converted
/// into, so the two cannot disagree.
#[derive(Debug, Clone)]
pub struct ActivityQuery<Tz: TimeZone> {
    /// Who the events must be attributable to.
    pub identity: Identity,
    /// Owner of the personal feed, and the user whose org feeds are read.
    pub user: String,
    /// Organizations whose feeds follow the personal feed, in order.
    pub orgs: Vec<String>,
    pub filter: EventFilter,
    pub max_pages: u32,
    window: DayWindow,
    tz: Tz,
}

impl<Tz: TimeZone> ActivityQuery<Tz> {
    /// A query for `day` in `tz` over the personal feed only, with no type
    /// filter and the default page cap.
    pub fn new(identity: Identity, user: impl Into<String>, day: NaiveDate, tz: Tz) -> Self {
        Self {
            identity,
            user: user.into(),
            orgs: Vec::new(),
            filter: EventFilter::default(),
            max_pages: DEFAULT_MAX_PAGES,
            window: DayWindow::new(day, &tz),
            tz,
        }
    }

    pub const fn window(&self) -> &DayWindow {
        &self.window
    }

    /// The personal feed followed by one feed per organization.
    pub fn feeds(&self) -> Vec<Feed> {
        let personal = Feed::Personal {
            user: self.user.clone(),
        };
        std::iter::once(personal)
            .chain(self.orgs.iter().map(|org| Feed::Organization {
                org: org.clone(),
                user: self.user.clone(),
            }))
            .collect()
    }

    /// Pages through one feed and returns its accepted events, oldest first.
    ///
    /// A fetch failure ends the feed: it is logged and whatever was accepted
    /// so far is returned.
    pub fn collect_feed<S: EventSource>(
        &self,
        source: &S,
        feed: &Feed,
    ) -> Result<Vec<Event>, EventError> {
        let mut accepted = Vec::new();
        let mut finished = false;

        for page in 1..=self.max_pages {
            let events = match source.fetch_page(feed, page) {
                Ok(events) => events,
                Err(err) => {
                    tracing::warn!(%feed, page, error = %err, "failed to fetch events, skipping rest of feed");
                    finished = true;
                    break;
                }
            };
            tracing::debug!(%feed, page, count = events.len(), "fetched events");
            if events.is_empty() {
                finished = true;
                break;
            }

            let mut reached_start = false;
            for raw in events {
                let created_at = raw.created_at()?.with_timezone(&self.tz).fixed_offset();
                let placement = self.window.place(&created_at);
                if placement == Placement::Before {
                    reached_start = true;
                }

                if !self.filter.accepts(raw.kind().unwrap_or_default())
                    || !self.identity.is_attributed(&raw)
                    || placement != Placement::Within
                {
                    continue;
                }
                accepted.push(Event::normalize(raw, created_at)?);
            }

            if reached_start {
                finished = true;
                break;
            }
        }

        if !finished {
            tracing::debug!(%feed, max_pages = self.max_pages, "page limit reached");
        }

        // Feeds are newest first; a stable sort after reversing also fixes
        // events a page returned out of order.
        accepted.reverse();
        accepted.sort_by_key(|event| event.created_at);
        Ok(accepted)
    }

    /// Collects every feed in order, dropping events already seen in an
    /// earlier feed.
    pub fn collect<S: EventSource>(&self, source: &S) -> Result<Vec<Event>, EventError> {
        let mut seen = HashSet::new();
        let mut events = Vec::new();
        for feed in self.feeds() {
            for event in self.collect_feed(source, &feed)? {
                let fresh = event.id.as_ref().is_none_or(|id| seen.insert(id.clone()));
                if fresh {
                    events.push(event);
                }
            }
        }
        Ok(events)
    }

    /// Collects every feed and renders the accepted events as log lines.
    pub fn render<S: EventSource>(&self, source: &S) -> Result<Vec<String>, EventError> {
        let mut lines = Vec::new();
        for event in self.collect(source)? {
            lines.extend(format_event(&event)?);
        }
        Ok(lines)
    }
}
