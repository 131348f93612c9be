//! Store commands.

use crate::types::{Flashcard, FlashcardSet};
use serde::{Deserialize, Serialize};

/// The closed set of mutations the store accepts.
///
/// Every variant addresses sets and flashcards by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Command {
    CreateSet {
        title: String,
    },
    DeleteSet {
        index: usize,
    },
    UpdateSetTitle {
        index: usize,
        title: String,
    },
    ReplaceAllSets {
        sets: Vec<FlashcardSet>,
    },
    CreateFlashcard {
        flashcard: Flashcard,
        set_index: usize,
    },
    DeleteFlashcard {
        flashcard_index: usize,
        set_index: usize,
    },
    UpdateFlashcard {
        flashcard: Flashcard,
        flashcard_index: usize,
        set_index: usize,
    },
    MoveFlashcard {
        flashcard_index: usize,
        destination_index: usize,
        set_index: usize,
    },
}

impl Command {
    pub fn create_set(title: impl Into<String>) -> Self {
        Self::CreateSet {
            title: title.into(),
        }
    }

    pub fn delete_set(index: usize) -> Self {
        Self::DeleteSet { index }
    }

    pub fn update_set_title(index: usize, title: impl Into<String>) -> Self {
        Self::UpdateSetTitle {
            index,
            title: title.into(),
        }
    }

    pub fn replace_all_sets(sets: Vec<FlashcardSet>) -> Self {
        Self::ReplaceAllSets { sets }
    }

    pub fn create_flashcard(flashcard: Flashcard, set_index: usize) -> Self {
        Self::CreateFlashcard {
            flashcard,
            set_index,
        }
    }

    pub fn delete_flashcard(flashcard_index: usize, set_index: usize) -> Self {
        Self::DeleteFlashcard {
            flashcard_index,
            set_index,
        }
    }

    pub fn update_flashcard(flashcard: Flashcard, flashcard_index: usize, set_index: usize) -> Self {
        Self::UpdateFlashcard {
            flashcard,
            flashcard_index,
            set_index,
        }
    }

    pub fn move_flashcard(flashcard_index: usize, destination_index: usize, set_index: usize) -> Self {
        Self::MoveFlashcard {
            flashcard_index,
            destination_index,
            set_index,
        }
    }

    /// Command identifier, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateSet { .. } => "create_set",
            Self::DeleteSet { .. } => "delete_set",
            Self::UpdateSetTitle { .. } => "update_set_title",
            Self::ReplaceAllSets { .. } => "replace_all_sets",
            Self::CreateFlashcard { .. } => "create_flashcard",
            Self::DeleteFlashcard { .. } => "delete_flashcard",
            Self::UpdateFlashcard { .. } => "update_flashcard",
            Self::MoveFlashcard { .. } => "move_flashcard",
        }
    }

    /// True for commands that cannot change any state, such as moving a
    /// flashcard onto its own position.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            Self::MoveFlashcard { flashcard_index, destination_index, .. }
                if flashcard_index == destination_index
        )
    }
}
