//! Core types for the flashcard store.
//!
//! Sets and flashcards have no stable identifiers. Both are addressed by
//! their position in the containing sequence, so any index captured before a
//! delete or move must be revalidated before it is used again.

use serde::{Deserialize, Serialize};

/// A title/text pair. `text` is what the learner has to reproduce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub title: String,
    pub text: String,
}

impl Flashcard {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A named, ordered collection of flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub title: String,
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
}

impl FlashcardSet {
    /// Create an empty set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            flashcards: Vec::new(),
        }
    }

    /// Create a set with the given flashcards.
    pub fn with_flashcards(title: impl Into<String>, flashcards: Vec<Flashcard>) -> Self {
        Self {
            title: title.into(),
            flashcards,
        }
    }

    pub fn len(&self) -> usize {
        self.flashcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }
}

/// The whole store tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub sets: Vec<FlashcardSet>,
}

impl StoreState {
    /// The state a fresh store starts from: no sets.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn with_sets(sets: Vec<FlashcardSet>) -> Self {
        Self { sets }
    }

    /// Set at `index`, if it still exists.
    pub fn set(&self, index: usize) -> Option<&FlashcardSet> {
        self.sets.get(index)
    }

    /// Flashcard at `flashcard_index` within set `set_index`, if both exist.
    pub fn flashcard(&self, set_index: usize, flashcard_index: usize) -> Option<&Flashcard> {
        self.set(set_index)
            .and_then(|set| set.flashcards.get(flashcard_index))
    }
}
