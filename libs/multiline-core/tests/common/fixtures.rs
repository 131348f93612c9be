//! Test fixtures and factory functions for creating test data.

use multiline_core::{Flashcard, FlashcardSet, StoreState};

/// The two-card Spanish set used across scenarios.
pub fn spanish_state() -> StoreState {
    StoreState::with_sets(vec![FlashcardSet::with_flashcards(
        "Spanish",
        vec![Flashcard::new("A", "uno"), Flashcard::new("B", "dos")],
    )])
}

/// A set with `num_cards` flashcards titled "Card 1", "Card 2", ...
pub fn numbered_set(title: &str, num_cards: usize) -> FlashcardSet {
    FlashcardSet::with_flashcards(
        title,
        (0..num_cards)
            .map(|i| Flashcard::new(format!("Card {}", i + 1), format!("Text {}", i + 1)))
            .collect(),
    )
}

/// Titles of the flashcards in a set, in order.
pub fn titles(state: &StoreState, set_index: usize) -> Vec<String> {
    state.sets[set_index]
        .flashcards
        .iter()
        .map(|f| f.title.clone())
        .collect()
}

/// (reference, candidate) pairs covering the comparator's edge cases.
pub fn answer_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("", ""),
        ("", "typed something"),
        ("Some text", ""),
        ("Some text", "   \t "),
        ("The quick brown fox", "The quikc brown fox"),
        ("The quick brown fox", "the QUICK brown fox"),
        ("  padded  ", "padded"),
        ("To be, or not to be", "to be or not to be,"),
        ("one two three four", "four three two one"),
        (
            "Roses are red,\nviolets are blue.\nSugar is sweet\nand so are you.",
            "roses are red\nviolets are green\n\nsugar is sweet",
        ),
        ("naïve café", "naive cafe"),
        ("ΣΊΣΥΦΟΣ", "σίσυφος"),
        ("İstanbul", "istanbul"),
        ("a", "b"),
        ("abc", "abcabc"),
    ]
}
