//! Rendering helpers over a diff transcript.

use super::diff::{DiffKind, DiffSegment};
use serde::{Deserialize, Serialize};

/// Which side of the comparison a view rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Equal + insert text: what should have been typed.
    ReconstructReference,
    /// Equal + delete text: what was actually typed.
    ReconstructCandidate,
}

/// A run of text in a view, marked when it differs from the other side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpan {
    pub text: String,
    pub is_marked: bool,
}

impl ViewSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_marked: false,
        }
    }

    pub fn marked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_marked: true,
        }
    }
}

/// Build one side of the comparison from the transcript.
pub fn derive_view(segments: &[DiffSegment], mode: ViewMode) -> Vec<ViewSpan> {
    let edit = match mode {
        ViewMode::ReconstructReference => DiffKind::Insert,
        ViewMode::ReconstructCandidate => DiffKind::Delete,
    };

    let mut spans: Vec<ViewSpan> = Vec::new();
    for segment in segments {
        let is_marked = match segment.kind {
            DiffKind::Equal => false,
            kind if kind == edit => true,
            _ => continue,
        };
        if segment.text.is_empty() && !spans.is_empty() {
            continue;
        }
        match spans.last_mut() {
            Some(last) if last.is_marked == is_marked => last.text.push_str(&segment.text),
            _ => spans.push(ViewSpan {
                text: segment.text.clone(),
                is_marked,
            }),
        }
    }

    spans
}

/// Re-slice a view of normalized text out of the `original` it came from, so
/// the learner sees their own casing.
///
/// `original` is trimmed the same way the comparator trims. If the view does
/// not line up with the original (it was derived from some other text), it is
/// returned unchanged.
pub fn with_original_casing(spans: &[ViewSpan], original: &str) -> Vec<ViewSpan> {
    let original = original.trim();

    // (normalized offset, original offset) at the start of each original char.
    let mut offsets: Vec<(usize, usize)> = Vec::with_capacity(original.len());
    let mut normalized_len = 0;
    for (idx, ch) in original.char_indices() {
        offsets.push((normalized_len, idx));
        normalized_len += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
    }

    let total: usize = spans.iter().map(|span| span.text.len()).sum();
    if total != normalized_len {
        return spans.to_vec();
    }

    let to_original = |pos: usize| -> usize {
        if pos >= normalized_len {
            return original.len();
        }
        match offsets.binary_search_by_key(&pos, |&(normalized, _)| normalized) {
            Ok(i) => offsets[i].1,
            // Inside a char that lower-cases to several: snap to its start.
            Err(i) => offsets[i.saturating_sub(1)].1,
        }
    };

    let mut result = Vec::with_capacity(spans.len());
    let mut position = 0;
    for span in spans {
        let start = to_original(position);
        position += span.text.len();
        let end = to_original(position);
        if start < end {
            result.push(ViewSpan {
                text: original[start..end].to_string(),
                is_marked: span.is_marked,
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<DiffSegment> {
        vec![
            DiffSegment::equal("the "),
            DiffSegment::delete("quikc"),
            DiffSegment::insert("quick"),
            DiffSegment::equal(" fox"),
        ]
    }

    #[test]
    fn reference_view_marks_inserts() {
        let view = derive_view(&sample(), ViewMode::ReconstructReference);
        assert_eq!(
            view,
            vec![
                ViewSpan::plain("the "),
                ViewSpan::marked("quick"),
                ViewSpan::plain(" fox"),
            ]
        );
    }

    #[test]
    fn candidate_view_marks_deletes() {
        let view = derive_view(&sample(), ViewMode::ReconstructCandidate);
        assert_eq!(
            view,
            vec![
                ViewSpan::plain("the "),
                ViewSpan::marked("quikc"),
                ViewSpan::plain(" fox"),
            ]
        );
    }

    #[test]
    fn single_equality_renders_one_plain_span() {
        let segments = vec![DiffSegment::equal("")];
        assert_eq!(
            derive_view(&segments, ViewMode::ReconstructCandidate),
            vec![ViewSpan::plain("")]
        );
    }

    #[test]
    fn original_casing_is_restored() {
        let view = derive_view(&sample(), ViewMode::ReconstructCandidate);
        let restored = with_original_casing(&view, "  The QUIKC Fox ");
        assert_eq!(
            restored,
            vec![
                ViewSpan::plain("The "),
                ViewSpan::marked("QUIKC"),
                ViewSpan::plain(" Fox"),
            ]
        );
    }

    #[test]
    fn mismatched_original_leaves_view_alone() {
        let view = derive_view(&sample(), ViewMode::ReconstructCandidate);
        assert_eq!(with_original_casing(&view, "something else"), view);
    }

    #[test]
    fn expanding_lowercase_keeps_text_intact() {
        // 'İ' lower-cases to two chars.
        let original = "İx";
        let normalized = original.to_lowercase();
        let view = vec![
            ViewSpan::plain(&normalized[..1]),
            ViewSpan::marked(&normalized[1..]),
        ];
        let restored = with_original_casing(&view, original);
        let text: String = restored.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, original);
    }
}
