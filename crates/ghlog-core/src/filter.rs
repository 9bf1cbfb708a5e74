//! Event type allow-list.

use std::collections::BTreeSet;

/// Suffix shared by every GitHub event type name.
const TYPE_SUFFIX: &str = "event";

/// Case-insensitive allow-list of event types.
///
/// An entry matches either the full type name (`pushevent`) or the name
/// without its `Event` suffix (`push`). An empty filter accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    fragments: BTreeSet<String>,
}

impl EventFilter {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(|fragment| fragment.as_ref().trim().to_lowercase())
                .filter(|fragment| !fragment.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn accepts(&self, kind: &str) -> bool {
        if self.fragments.is_empty() {
            return true;
        }
        let kind = kind.to_lowercase();
        if self.fragments.contains(&kind) {
            return true;
        }
        kind.strip_suffix(TYPE_SUFFIX)
            .is_some_and(|short| self.fragments.contains(short))
    }
}
