//! Hierarchical back navigation.
//!
//! An app has two notions of "back". The in-app back button follows the
//! hierarchy of pages (a flashcard's parent is its set), while the system back
//! gesture follows browsing history. When the page visited just before the
//! current one *is* the hierarchical parent, the two agree and going back one
//! history step gives the more consistent experience (scroll position and
//! transient page state are restored). Otherwise the app must navigate to the
//! parent explicitly.

use serde::{Deserialize, Serialize};

/// The routing boundary the navigation helper drives.
pub trait History {
    /// Go back one step in history.
    fn go_back(&mut self);

    /// Navigate to `path`, keeping the current entry.
    fn push(&mut self, path: &str);

    /// Navigate to `path`, replacing the current entry.
    fn replace(&mut self, path: &str);
}

/// What to do to reach the hierarchical parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "path", rename_all = "snake_case")]
pub enum NavigationDecision {
    GoBack,
    Push(String),
    Replace(String),
}

impl NavigationDecision {
    /// Carry out the decision on a history implementation.
    pub fn perform<H: History + ?Sized>(&self, history: &mut H) {
        match self {
            Self::GoBack => history.go_back(),
            Self::Push(path) => history.push(path),
            Self::Replace(path) => history.replace(path),
        }
    }
}

/// Decide how to reach `parent_path`.
///
/// `previous_path` is the chronologically previous location, if known.
/// `preserve_current` selects push (true, the usual choice) over replace.
pub fn decide(
    previous_path: Option<&str>,
    parent_path: &str,
    preserve_current: bool,
) -> NavigationDecision {
    if previous_path == Some(parent_path) {
        NavigationDecision::GoBack
    } else if preserve_current {
        NavigationDecision::Push(parent_path.to_string())
    } else {
        NavigationDecision::Replace(parent_path.to_string())
    }
}

/// Navigate to `parent_path`, going back in history when that lands there.
pub fn go_back<H: History + ?Sized>(
    history: &mut H,
    previous_path: Option<&str>,
    parent_path: &str,
    preserve_current: bool,
) -> NavigationDecision {
    let decision = decide(previous_path, parent_path, preserve_current);
    tracing::debug!(?decision, parent = parent_path, "navigating back");
    decision.perform(history);
    decision
}

/// In-memory history, for hosts without a browser and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    /// Start with a single entry.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// The entry before the current one, if any.
    pub fn previous(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .map(|i| self.entries[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl History for MemoryHistory {
    fn go_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index += 1;
    }

    fn replace(&mut self, path: &str) {
        self.entries[self.index] = path.to_string();
    }
}
