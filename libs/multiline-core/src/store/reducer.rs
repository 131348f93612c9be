//! Pure state transitions, one per command.
//!
//! Each transition borrows the old state and returns a new one; the old state
//! is never modified, so a rejected command leaves it exactly as it was.

use super::Command;
use crate::error::{Result, StoreError};
use crate::types::{Flashcard, FlashcardSet, StoreState};

impl StoreState {
    /// Apply a command, returning the next state.
    pub fn apply(&self, command: &Command) -> Result<StoreState> {
        match command {
            Command::CreateSet { title } => Ok(self.create_set(title)),
            Command::DeleteSet { index } => self.delete_set(*index),
            Command::UpdateSetTitle { index, title } => self.update_set_title(*index, title),
            Command::ReplaceAllSets { sets } => Ok(self.replace_all_sets(sets.clone())),
            Command::CreateFlashcard {
                flashcard,
                set_index,
            } => self.create_flashcard(flashcard.clone(), *set_index),
            Command::DeleteFlashcard {
                flashcard_index,
                set_index,
            } => self.delete_flashcard(*flashcard_index, *set_index),
            Command::UpdateFlashcard {
                flashcard,
                flashcard_index,
                set_index,
            } => self.update_flashcard(flashcard.clone(), *flashcard_index, *set_index),
            Command::MoveFlashcard {
                flashcard_index,
                destination_index,
                set_index,
            } => self.move_flashcard(*flashcard_index, *destination_index, *set_index),
        }
    }

    /// Append an empty set.
    pub fn create_set(&self, title: &str) -> StoreState {
        let mut next = self.clone();
        next.sets.push(FlashcardSet::new(title));
        next
    }

    /// Remove the set at `index`. Later sets move down by one.
    pub fn delete_set(&self, index: usize) -> Result<StoreState> {
        self.check_set(index)?;
        let mut next = self.clone();
        next.sets.remove(index);
        Ok(next)
    }

    /// Rename a set, keeping its flashcards.
    pub fn update_set_title(&self, index: usize, title: &str) -> Result<StoreState> {
        self.check_set(index)?;
        let mut next = self.clone();
        next.sets[index].title = title.to_string();
        Ok(next)
    }

    /// Replace every set at once, as an import does.
    pub fn replace_all_sets(&self, sets: Vec<FlashcardSet>) -> StoreState {
        StoreState { sets }
    }

    /// Append a flashcard to a set.
    pub fn create_flashcard(&self, flashcard: Flashcard, set_index: usize) -> Result<StoreState> {
        self.check_set(set_index)?;
        let mut next = self.clone();
        next.sets[set_index].flashcards.push(flashcard);
        Ok(next)
    }

    /// Remove a flashcard. Later flashcards in the set move down by one.
    pub fn delete_flashcard(&self, flashcard_index: usize, set_index: usize) -> Result<StoreState> {
        self.check_flashcard(flashcard_index, set_index)?;
        let mut next = self.clone();
        next.sets[set_index].flashcards.remove(flashcard_index);
        Ok(next)
    }

    /// Replace a flashcard in place.
    pub fn update_flashcard(
        &self,
        flashcard: Flashcard,
        flashcard_index: usize,
        set_index: usize,
    ) -> Result<StoreState> {
        self.check_flashcard(flashcard_index, set_index)?;
        let mut next = self.clone();
        next.sets[set_index].flashcards[flashcard_index] = flashcard;
        Ok(next)
    }

    /// Take the flashcard at `flashcard_index` out and reinsert it at
    /// `destination_index`. Items in between shift by one.
    pub fn move_flashcard(
        &self,
        flashcard_index: usize,
        destination_index: usize,
        set_index: usize,
    ) -> Result<StoreState> {
        self.check_flashcard(flashcard_index, set_index)?;
        self.check_flashcard(destination_index, set_index)?;

        let mut next = self.clone();
        if flashcard_index != destination_index {
            let flashcards = &mut next.sets[set_index].flashcards;
            let moved = flashcards.remove(flashcard_index);
            flashcards.insert(destination_index, moved);
        }
        Ok(next)
    }

    fn check_set(&self, index: usize) -> Result<()> {
        if index < self.sets.len() {
            Ok(())
        } else {
            Err(StoreError::SetOutOfRange {
                index,
                len: self.sets.len(),
            })
        }
    }

    fn check_flashcard(&self, index: usize, set_index: usize) -> Result<()> {
        self.check_set(set_index)?;
        let len = self.sets[set_index].flashcards.len();
        if index < len {
            Ok(())
        } else {
            Err(StoreError::FlashcardOutOfRange {
                set_index,
                index,
                len,
            })
        }
    }
}
