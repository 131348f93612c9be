//! Save rules for the set and flashcard forms.

use crate::store::Command;
use crate::types::Flashcard;

/// Whether a flashcard form creates a new flashcard or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    New {
        set_index: usize,
    },
    Edit {
        original: Flashcard,
        flashcard_index: usize,
        set_index: usize,
    },
}

/// The values currently typed into a flashcard form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashcardDraft {
    pub title: String,
    pub text: String,
}

impl FlashcardDraft {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Start an edit form from the stored flashcard.
    pub fn from_flashcard(flashcard: &Flashcard) -> Self {
        Self::new(flashcard.title.clone(), flashcard.text.clone())
    }

    /// A draft can be saved when both fields have content, it has not been
    /// saved already and, when editing, something actually changed.
    pub fn is_valid(&self, mode: &DraftMode, saved: bool) -> bool {
        let fields_filled = !self.title.trim().is_empty() && !self.text.trim().is_empty();
        if !fields_filled || saved {
            return false;
        }

        match mode {
            DraftMode::New { .. } => true,
            DraftMode::Edit { original, .. } => {
                original.title != self.title || original.text != self.text
            }
        }
    }

    /// The store command that saves this draft, or `None` if it is not valid.
    pub fn into_command(self, mode: &DraftMode, saved: bool) -> Option<Command> {
        if !self.is_valid(mode, saved) {
            return None;
        }

        let flashcard = Flashcard::new(self.title, self.text);
        Some(match *mode {
            DraftMode::New { set_index } => Command::create_flashcard(flashcard, set_index),
            DraftMode::Edit {
                flashcard_index,
                set_index,
                ..
            } => Command::update_flashcard(flashcard, flashcard_index, set_index),
        })
    }
}

/// The title to save when a set title is edited, if any. Titles are saved only
/// when they changed and are not blank.
pub fn set_title_change(old: &str, new: &str) -> Option<String> {
    if new != old && !new.trim().is_empty() {
        Some(new.to_string())
    } else {
        None
    }
}

/// `"1 flashcard"`, `"2 flashcards"`.
pub fn maybe_pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
