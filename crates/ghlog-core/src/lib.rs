//! Core logic for the GitHub activity log.
//!
//! This crate contains:
//! - Events: raw feed records and their normalized form
//! - Attribution: deciding whether an event involves the user
//! - Filtering: event type allow-list and the local day window
//! - Formatting: one or more log lines per event
//! - Feeds: paging through feeds and assembling the day's log

pub mod event;
pub mod event_type;
pub mod feed;
pub mod filter;
pub mod format;
pub mod identity;
pub mod window;

pub use event::{Event, EventError, RawEvent};
pub use event_type::EventKind;
pub use feed::{ActivityQuery, DEFAULT_MAX_PAGES, EventSource, Feed};
pub use filter::EventFilter;
pub use format::format_event;
pub use identity::{Identities, Identity, collect_identities};
pub use window::{DayWindow, Placement};
