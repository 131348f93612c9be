//! Application routes.
//!
//! URLs carry 1-based ids (`/sets/1` is the first set) while the store uses
//! 0-based positions. `Route` holds positions; conversion happens only in
//! [`Route::parse`] and [`Route::path`].

use crate::types::StoreState;
use serde::{Deserialize, Serialize};

/// Path used when a page has no hierarchical parent.
pub const ROOT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Route {
    Home,
    NewSet,
    Set { set: usize },
    NewFlashcard { set: usize },
    PracticeFlashcard { set: usize, flashcard: usize },
    EditFlashcard { set: usize, flashcard: usize },
}

impl Route {
    /// Parse a path. Unknown paths and ids that are zero or not numbers give
    /// `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let parts: Vec<&str> = trimmed.split('/').skip(1).collect();

        match parts.as_slice() {
            [] => Some(Self::Home),
            ["sets", "new"] => Some(Self::NewSet),
            ["sets", set] => Some(Self::Set { set: parse_id(set)? }),
            ["sets", set, "flashcards", "new"] => Some(Self::NewFlashcard { set: parse_id(set)? }),
            ["sets", set, "flashcards", flashcard, "practice"] => Some(Self::PracticeFlashcard {
                set: parse_id(set)?,
                flashcard: parse_id(flashcard)?,
            }),
            ["sets", set, "flashcards", flashcard, "edit"] => Some(Self::EditFlashcard {
                set: parse_id(set)?,
                flashcard: parse_id(flashcard)?,
            }),
            _ => None,
        }
    }

    /// Format as a URL path.
    pub fn path(&self) -> String {
        match self {
            Self::Home => ROOT_PATH.to_string(),
            Self::NewSet => "/sets/new".to_string(),
            Self::Set { set } => format!("/sets/{}", set + 1),
            Self::NewFlashcard { set } => format!("/sets/{}/flashcards/new", set + 1),
            Self::PracticeFlashcard { set, flashcard } => {
                format!("/sets/{}/flashcards/{}/practice", set + 1, flashcard + 1)
            }
            Self::EditFlashcard { set, flashcard } => {
                format!("/sets/{}/flashcards/{}/edit", set + 1, flashcard + 1)
            }
        }
    }

    /// The page this one hangs under in the app hierarchy.
    pub fn parent(&self) -> Option<Route> {
        match *self {
            Self::Home => None,
            Self::NewSet | Self::Set { .. } => Some(Self::Home),
            Self::NewFlashcard { set }
            | Self::PracticeFlashcard { set, .. }
            | Self::EditFlashcard { set, .. } => Some(Self::Set { set }),
        }
    }

    /// Path of the parent page, `/` when there is none.
    pub fn parent_path(&self) -> String {
        self.parent()
            .map_or_else(|| ROOT_PATH.to_string(), |parent| parent.path())
    }

    /// Revalidate the positions in this route against the current state.
    ///
    /// A route captured before a delete may point past the end of a sequence;
    /// such routes resolve to `Home`.
    pub fn resolve(self, state: &StoreState) -> Route {
        let valid = match self {
            Self::Home | Self::NewSet => true,
            Self::Set { set } | Self::NewFlashcard { set } => state.set(set).is_some(),
            Self::PracticeFlashcard { set, flashcard } | Self::EditFlashcard { set, flashcard } => {
                state.flashcard(set, flashcard).is_some()
            }
        };

        if valid {
            self
        } else {
            tracing::debug!(route = %self.path(), "route no longer resolves, redirecting home");
            Self::Home
        }
    }
}

/// 1-based URL id to 0-based position.
fn parse_id(id: &str) -> Option<usize> {
    id.parse::<usize>().ok()?.checked_sub(1)
}
