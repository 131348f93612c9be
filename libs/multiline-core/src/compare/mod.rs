//! Answer comparison for practice sessions.
//!
//! Both strings are normalized (trimmed, lower-cased) and then diffed from
//! the candidate towards the reference. The answer is correct only when the
//! transcript is a single equality.

pub mod diff;
pub mod view;

pub use diff::{DiffKind, DiffSegment};
pub use view::{derive_view, with_original_casing, ViewMode, ViewSpan};

use serde::{Deserialize, Serialize};

/// Token grain used by the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Words, whitespace runs and single punctuation marks.
    Word,
    /// Individual characters.
    Character,
}

impl Default for Granularity {
    fn default() -> Self {
        Self::Word
    }
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Character => "character",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "word" => Some(Self::Word),
            "character" | "char" => Some(Self::Character),
            _ => None,
        }
    }
}

/// Options for [`compare_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareOptions {
    #[serde(default)]
    pub granularity: Granularity,
}

/// Result of checking a typed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    /// Whether the normalized answer matches exactly.
    pub correct: bool,
    /// Edit transcript from the normalized candidate to the normalized reference.
    pub segments: Vec<DiffSegment>,
}

impl CompareResult {
    /// The reference with missing parts marked.
    pub fn reference_view(&self) -> Vec<ViewSpan> {
        derive_view(&self.segments, ViewMode::ReconstructReference)
    }

    /// The candidate with wrong or extra parts marked.
    pub fn candidate_view(&self) -> Vec<ViewSpan> {
        derive_view(&self.segments, ViewMode::ReconstructCandidate)
    }
}

/// Normalize text for comparison: trim surrounding whitespace, lower-case.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Compare a typed `candidate` against the stored `reference` answer.
pub fn compare(reference: &str, candidate: &str) -> CompareResult {
    compare_with(reference, candidate, &CompareOptions::default())
}

/// Compare with explicit options.
pub fn compare_with(reference: &str, candidate: &str, options: &CompareOptions) -> CompareResult {
    let reference = normalize(reference);
    let candidate = normalize(candidate);

    if reference == candidate {
        return CompareResult {
            correct: true,
            segments: vec![DiffSegment::equal(reference)],
        };
    }

    let segments = diff::diff(&candidate, &reference, options.granularity);
    let correct = is_single_equality(&segments);

    tracing::debug!(
        correct,
        segments = segments.len(),
        granularity = options.granularity.as_str(),
        "compared answer"
    );

    CompareResult { correct, segments }
}

fn is_single_equality(segments: &[DiffSegment]) -> bool {
    matches!(segments, [only] if only.kind == DiffKind::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn joined(spans: &[ViewSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_correct_answer() {
        let result = compare("hello world", "hello world");
        assert!(result.correct);
        assert_eq!(result.segments, vec![DiffSegment::equal("hello world")]);
    }

    #[test]
    fn test_case_differences_are_not_errors() {
        let result = compare("Hello World", "hELLO wORLD");
        assert!(result.correct);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let result = compare("hello", "   hello \n");
        assert!(result.correct);
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let result = compare("hello world", "hello  world");
        assert!(!result.correct);
    }

    #[test]
    fn test_empty_strings_are_equal() {
        let result = compare("", "");
        assert!(result.correct);
        assert_eq!(result.segments, vec![DiffSegment::equal("")]);
    }

    #[test]
    fn test_empty_candidate() {
        let result = compare("Some text", "");
        assert!(!result.correct);
        assert_eq!(result.segments, vec![DiffSegment::insert("some text")]);
    }

    #[test]
    fn test_whitespace_only_candidate_is_empty() {
        assert_eq!(compare("Some text", " \t\n "), compare("Some text", ""));
    }

    #[test]
    fn test_misspelled_word() {
        let result = compare("The quick brown fox", "The quikc brown fox");
        assert!(!result.correct);

        let view = result.reference_view();
        assert_eq!(
            view,
            vec![
                ViewSpan::plain("the "),
                ViewSpan::marked("quick"),
                ViewSpan::plain(" brown fox"),
            ]
        );
    }

    #[test]
    fn test_views_rebuild_normalized_inputs() {
        let result = compare("  Line one\nLine two ", "line on\nline two and more");
        assert_eq!(joined(&result.reference_view()), "line one\nline two");
        assert_eq!(joined(&result.candidate_view()), "line on\nline two and more");
    }

    #[test]
    fn test_character_granularity() {
        let options = CompareOptions {
            granularity: Granularity::Character,
        };
        let result = compare_with("color", "colour", &options);
        assert!(!result.correct);
        assert_eq!(
            result.candidate_view(),
            vec![
                ViewSpan::plain("colo"),
                ViewSpan::marked("u"),
                ViewSpan::plain("r"),
            ]
        );
    }

    #[test]
    fn test_granularity_names() {
        assert_eq!(Granularity::from_str("word"), Some(Granularity::Word));
        assert_eq!(Granularity::from_str("character"), Some(Granularity::Character));
        assert_eq!(Granularity::from_str("line"), None);
        assert_eq!(Granularity::Character.as_str(), "character");
    }
}
