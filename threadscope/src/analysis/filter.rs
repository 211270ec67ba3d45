//! Thread list filtering (name search, state, health).

use crate::classification::Health;
use crate::thread_data::ThreadRecord;

/// Criteria for narrowing the thread list. All set criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadFilter {
    /// Case-insensitive substring of the thread name
    pub search: Option<String>,
    /// Exact `Thread.State` token
    pub state: Option<String>,
    pub health: Option<Health>,
}

impl ThreadFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.state.is_none()
            && self.health.is_none()
    }

    #[must_use]
    pub fn matches(&self, thread: &ThreadRecord) -> bool {
        let name_ok = match self.search.as_deref() {
            None | Some("") => true,
            Some(q) => thread.name().to_lowercase().contains(&q.to_lowercase()),
        };
        name_ok
            && self.state.as_deref().map_or(true, |s| thread.state() == s)
            && self.health.map_or(true, |h| thread.health() == h)
    }

    /// Keep only matching threads, preserving order.
    #[must_use]
    pub fn apply<'a>(&self, threads: &'a [ThreadRecord]) -> Vec<&'a ThreadRecord> {
        threads.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Distinct states present in the dump, in first-seen order.
#[must_use]
pub fn distinct_states(threads: &[ThreadRecord]) -> Vec<String> {
    let mut states: Vec<String> = Vec::new();
    for t in threads {
        if !states.iter().any(|s| s == t.state()) {
            states.push(t.state().to_string());
        }
    }
    states
}
