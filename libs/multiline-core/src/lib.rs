//! Core library for the multiline flashcards app.
//!
//! Provides:
//! - Answer comparison with a human-readable diff of typed answers
//! - The flashcard store (sets of flashcards changed through commands)
//! - Hierarchical back navigation and the route table
//! - Import/export, practice sessions and form rules

pub mod compare;
pub mod config;
pub mod error;
pub mod form;
pub mod interchange;
pub mod navigation;
pub mod practice;
pub mod routes;
pub mod store;
pub mod types;

pub use compare::{
    compare, compare_with, derive_view, CompareOptions, CompareResult, DiffKind, DiffSegment,
    Granularity, ViewMode, ViewSpan,
};
pub use config::Settings;
pub use error::{ConfigError, InterchangeError, Result, StoreError};
pub use navigation::{go_back, History, NavigationDecision};
pub use routes::Route;
pub use store::{Command, Store, SubscriptionId};
pub use types::{Flashcard, FlashcardSet, StoreState};

/// The state a new store starts from.
pub fn initial_state() -> StoreState {
    StoreState::initial()
}
