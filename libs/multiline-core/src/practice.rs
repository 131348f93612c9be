//! Practice session state.

use crate::compare::{compare_with, with_original_casing, CompareOptions, CompareResult, ViewSpan};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome shown after checking an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Correct => "You are correct!",
            Self::Incorrect => "Oops, that's not correct",
        }
    }
}

/// One attempt at reproducing a flashcard.
///
/// The session is either typing (no result yet) or checked. Checking twice
/// does nothing; [`PracticeSession::again`] returns to typing with empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSession {
    text: String,
    result: Option<CompareResult>,
    #[serde(default)]
    options: CompareOptions,
}

impl PracticeSession {
    pub fn new(options: CompareOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the typed text. Ignored once checked.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if !self.is_checked() {
            self.text = text.into();
        }
    }

    pub fn is_checked(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&CompareResult> {
        self.result.as_ref()
    }

    /// Check the typed text against `reference`.
    pub fn check(&mut self, reference: &str) -> &CompareResult {
        let text = &mut self.text;
        let options = &self.options;
        self.result.get_or_insert_with(|| {
            *text = text.trim().to_string();
            compare_with(reference, text, options)
        })
    }

    /// Start over with empty text.
    pub fn again(&mut self) {
        self.text.clear();
        self.result = None;
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.result.as_ref().map(|result| {
            if result.correct {
                Feedback::Correct
            } else {
                Feedback::Incorrect
            }
        })
    }

    /// The learner's answer with wrong or extra parts marked, in their own
    /// casing. Empty before checking.
    pub fn answer_view(&self) -> Vec<ViewSpan> {
        self.result
            .as_ref()
            .map(|result| with_original_casing(&result.candidate_view(), &self.text))
            .unwrap_or_default()
    }

    /// The reference with missing parts marked, in the reference's casing.
    pub fn correction_view(&self, reference: &str) -> Vec<ViewSpan> {
        self.result
            .as_ref()
            .map(|result| with_original_casing(&result.reference_view(), reference))
            .unwrap_or_default()
    }
}

/// Pick a random flashcard to practice. Sets with fewer than two flashcards
/// have nothing to choose between.
pub fn pick_random_flashcard<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len <= 1 {
        return None;
    }
    Some(rng.random_range(0..len))
}
