//! Token diff with semantic cleanup.
//!
//! The diff runs the linear-space variant of Myers' O(ND) algorithm over
//! tokens (words or characters), then applies two cleanup passes modelled on the well-known
//! diff-match-patch routines:
//!
//! 1. Semantic elimination: an equality no longer than the edits on both of
//!    its sides is folded into those edits, so the reader sees one larger
//!    change instead of many small alternating fragments.
//! 2. Lossless shifting: a single edit surrounded by equalities is slid
//!    sideways to the position that best lines up with word and line
//!    boundaries.

use super::Granularity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of a diff segment, read as an edit from candidate to reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Text shared by both strings.
    Equal,
    /// Text in the reference that the candidate is missing.
    Insert,
    /// Text in the candidate that the reference does not have.
    Delete,
}

/// One operation in the edit transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffSegment {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(DiffKind::Delete, text)
    }
}

/// Diff `candidate` against `reference` and return the cleaned-up transcript.
///
/// Concatenating the `Equal` and `Delete` texts yields `candidate`;
/// concatenating the `Equal` and `Insert` texts yields `reference`.
/// Two empty inputs produce an empty transcript.
pub fn diff(candidate: &str, reference: &str, granularity: Granularity) -> Vec<DiffSegment> {
    let old = tokenize(candidate, granularity);
    let new = tokenize(reference, granularity);

    let mut segments = diff_tokens(&old, &new);
    cleanup_merge(&mut segments);
    cleanup_semantic(&mut segments);
    segments
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch.is_alphanumeric() {
            Self::Word
        } else if ch.is_whitespace() {
            Self::Space
        } else {
            Self::Other
        }
    }
}

/// Split text into tokens.
///
/// At word grain a token is a run of alphanumerics, a run of whitespace, or a
/// single punctuation character. At character grain every char is a token.
fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, ch) in text.char_indices() {
        let class = CharClass::of(ch);
        let joins = granularity == Granularity::Word
            && current == Some(class)
            && class != CharClass::Other;

        if !joins && idx > start {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        current = Some(class);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal,
    Insert,
    Delete,
}

/// Diff two token sequences into raw (uncleaned) segments.
fn diff_tokens<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<DiffSegment> {
    // Intern tokens so the inner loop compares integers.
    let mut ids: HashMap<&'a str, u32> = HashMap::new();
    let a = intern(old, &mut ids);
    let b = intern(new, &mut ids);

    let mut ops = Vec::with_capacity(a.len() + b.len());
    diff_ops(&a, &b, &mut ops);

    let mut segments: Vec<DiffSegment> = Vec::new();
    let (mut i, mut j) = (0, 0);
    for op in ops {
        let (kind, token) = match op {
            Op::Equal => {
                i += 1;
                j += 1;
                (DiffKind::Equal, old[i - 1])
            }
            Op::Delete => {
                i += 1;
                (DiffKind::Delete, old[i - 1])
            }
            Op::Insert => {
                j += 1;
                (DiffKind::Insert, new[j - 1])
            }
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(token),
            _ => segments.push(DiffSegment::new(kind, token)),
        }
    }

    segments
}

fn intern<'a>(tokens: &[&'a str], ids: &mut HashMap<&'a str, u32>) -> Vec<u32> {
    tokens
        .iter()
        .map(|token| {
            let next = ids.len() as u32;
            *ids.entry(*token).or_insert(next)
        })
        .collect()
}

/// Append the shortest edit script between `a` and `b` to `ops`, one op per
/// token.
///
/// Common ends are peeled off, then the middle is split at the middle snake
/// and each half is diffed on its own, so memory stays linear in the input.
fn diff_ops(a: &[u32], b: &[u32], ops: &mut Vec<Op>) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let middle_a = &a[prefix..a.len() - suffix];
    let middle_b = &b[prefix..b.len() - suffix];

    ops.extend(std::iter::repeat(Op::Equal).take(prefix));
    if middle_a.is_empty() {
        ops.extend(std::iter::repeat(Op::Insert).take(middle_b.len()));
    } else if middle_b.is_empty() {
        ops.extend(std::iter::repeat(Op::Delete).take(middle_a.len()));
    } else {
        match middle_snake(middle_a, middle_b) {
            Some((x, y)) => {
                diff_ops(&middle_a[..x], &middle_b[..y], ops);
                diff_ops(&middle_a[x..], &middle_b[y..], ops);
            }
            None => {
                ops.extend(std::iter::repeat(Op::Delete).take(middle_a.len()));
                ops.extend(std::iter::repeat(Op::Insert).take(middle_b.len()));
            }
        }
    }
    ops.extend(std::iter::repeat(Op::Equal).take(suffix));
}

/// Find the point where a forward and a reverse Myers search meet.
///
/// Returns the split `(x, y)` into `a` and `b`, or `None` when the inputs
/// share nothing worth aligning. A split is always strictly inside the input
/// so the recursion in [`diff_ops`] makes progress.
fn middle_snake(a: &[u32], b: &[u32]) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let width = (2 * max_d + 2) as usize;

    // Furthest x reached on each diagonal, -1 where none yet.
    let mut forward = vec![-1isize; width];
    let mut reverse = vec![-1isize; width];
    forward[(offset + 1) as usize] = 0;
    reverse[(offset + 1) as usize] = 0;

    let delta = n - m;
    // With an odd delta the paths meet on a forward step.
    let front = delta % 2 != 0;
    let in_range = |i: isize| i >= 0 && (i as usize) < width;

    let split = |x: isize, y: isize| {
        let inside = (x > 0 || y > 0) && (x < n || y < m);
        inside.then_some((x as usize, y as usize))
    };

    // Diagonals that ran off the edge are trimmed from later rounds.
    let (mut k1_start, mut k1_end) = (0isize, 0isize);
    let (mut k2_start, mut k2_end) = (0isize, 0isize);

    for d in 0..max_d {
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (offset + k1) as usize;
            let mut x1 = if k1 == -d
                || (k1 != d && forward[k1_offset - 1] < forward[k1_offset + 1])
            {
                forward[k1_offset + 1]
            } else {
                forward[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            forward[k1_offset] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if front {
                let k2_offset = offset + delta - k1;
                if in_range(k2_offset) && reverse[k2_offset as usize] != -1 {
                    let x2 = n - reverse[k2_offset as usize];
                    if x1 >= x2 {
                        return split(x1, y1);
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (offset + k2) as usize;
            let mut x2 = if k2 == -d
                || (k2 != d && reverse[k2_offset - 1] < reverse[k2_offset + 1])
            {
                reverse[k2_offset + 1]
            } else {
                reverse[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            reverse[k2_offset] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let k1_offset = offset + delta - k2;
                if in_range(k1_offset) && forward[k1_offset as usize] != -1 {
                    let x1 = forward[k1_offset as usize];
                    let y1 = offset + x1 - k1_offset;
                    if x1 >= n - x2 {
                        return split(x1, y1);
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}

/// Normalize a transcript: every run of edits between two equalities becomes
/// at most one delete followed by at most one insert, adjacent equalities are
/// joined and empty segments are dropped.
fn cleanup_merge(segments: &mut Vec<DiffSegment>) {
    let mut merged: Vec<DiffSegment> = Vec::with_capacity(segments.len());
    let mut deleted = String::new();
    let mut inserted = String::new();

    let flush = |merged: &mut Vec<DiffSegment>, deleted: &mut String, inserted: &mut String| {
        if !deleted.is_empty() {
            merged.push(DiffSegment::delete(std::mem::take(deleted)));
        }
        if !inserted.is_empty() {
            merged.push(DiffSegment::insert(std::mem::take(inserted)));
        }
    };

    for segment in segments.drain(..) {
        match segment.kind {
            DiffKind::Delete => deleted.push_str(&segment.text),
            DiffKind::Insert => inserted.push_str(&segment.text),
            DiffKind::Equal => {
                flush(&mut merged, &mut deleted, &mut inserted);
                if segment.text.is_empty() {
                    continue;
                }
                match merged.last_mut() {
                    Some(last) if last.kind == DiffKind::Equal => last.text.push_str(&segment.text),
                    _ => merged.push(segment),
                }
            }
        }
    }
    flush(&mut merged, &mut deleted, &mut inserted);

    *segments = merged;
}

/// Fold semantically trivial equalities into the surrounding edits, then
/// shift single edits onto natural boundaries.
fn cleanup_semantic(segments: &mut Vec<DiffSegment>) {
    let mut changes = false;
    // Indices of equalities seen so far, most recent last.
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    // Edit lengths (in chars) before and after the last equality.
    let (mut inserted_before, mut deleted_before) = (0usize, 0usize);
    let (mut inserted_after, mut deleted_after) = (0usize, 0usize);

    let mut pointer: isize = 0;
    while (pointer as usize) < segments.len() {
        let current = pointer as usize;
        let len = segments[current].text.chars().count();

        match segments[current].kind {
            DiffKind::Equal => {
                equalities.push(current);
                inserted_before = inserted_after;
                deleted_before = deleted_after;
                inserted_after = 0;
                deleted_after = 0;
                last_equality = Some(len);
            }
            kind => {
                if kind == DiffKind::Insert {
                    inserted_after += len;
                } else {
                    deleted_after += len;
                }

                let trivial = last_equality.is_some_and(|eq_len| {
                    eq_len <= inserted_before.max(deleted_before)
                        && eq_len <= inserted_after.max(deleted_after)
                });

                let eq_index = match (trivial, equalities.last()) {
                    (true, Some(&index)) => Some(index),
                    _ => None,
                };
                if let Some(eq_index) = eq_index {
                    // Replace the equality with a delete + insert of the same text.
                    let text = segments[eq_index].text.clone();
                    segments.insert(eq_index, DiffSegment::delete(text));
                    segments[eq_index + 1].kind = DiffKind::Insert;

                    equalities.pop();
                    // The previous equality also needs to be re-evaluated.
                    equalities.pop();
                    pointer = equalities.last().map_or(-1, |&i| i as isize);

                    inserted_before = 0;
                    deleted_before = 0;
                    inserted_after = 0;
                    deleted_after = 0;
                    last_equality = None;
                    changes = true;
                }
            }
        }
        pointer += 1;
    }

    if changes {
        cleanup_merge(segments);
    }
    cleanup_semantic_lossless(segments);
}

/// Slide single edits (equality, edit, equality) sideways to the most
/// readable position without changing the transcript's meaning.
fn cleanup_semantic_lossless(segments: &mut Vec<DiffSegment>) {
    let mut changes = false;
    let mut pointer = 1;
    while pointer + 1 < segments.len() {
        if segments[pointer - 1].kind != DiffKind::Equal
            || segments[pointer + 1].kind != DiffKind::Equal
        {
            pointer += 1;
            continue;
        }

        let mut equality1 = segments[pointer - 1].text.clone();
        let mut edit = segments[pointer].text.clone();
        let mut equality2 = segments[pointer + 1].text.clone();

        // Shift the edit as far left as possible.
        let common = common_suffix(&equality1, &edit);
        if common > 0 {
            let shared = edit[edit.len() - common..].to_string();
            equality1.truncate(equality1.len() - common);
            edit = format!("{}{}", shared, &edit[..edit.len() - common]);
            equality2 = format!("{}{}", shared, equality2);
        }

        // Step right one char at a time, keeping the best-scoring split.
        let mut best = (equality1.clone(), edit.clone(), equality2.clone());
        let mut best_score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
        while let (Some(first), Some(next)) = (edit.chars().next(), equality2.chars().next()) {
            if first != next {
                break;
            }
            equality1.push(first);
            edit.replace_range(..first.len_utf8(), "");
            edit.push(next);
            equality2.replace_range(..next.len_utf8(), "");

            let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
            // `>=` prefers edits that end later, as diff-match-patch does.
            if score >= best_score {
                best_score = score;
                best = (equality1.clone(), edit.clone(), equality2.clone());
            }
        }

        let (best_equality1, best_edit, best_equality2) = best;
        if segments[pointer - 1].text != best_equality1 {
            if best_equality1.is_empty() {
                segments.remove(pointer - 1);
                pointer -= 1;
            } else {
                segments[pointer - 1].text = best_equality1;
            }
            segments[pointer].text = best_edit;
            if best_equality2.is_empty() {
                segments.remove(pointer + 1);
            } else {
                segments[pointer + 1].text = best_equality2;
            }
            changes = true;
        }
        pointer += 1;
    }

    // An emptied equality can leave two edits of one kind side by side.
    if changes {
        cleanup_merge(segments);
    }
}

/// Byte length of the longest common suffix of `a` and `b`.
fn common_suffix(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x.len_utf8())
        .sum()
}

/// How natural the boundary between `left` and `right` is, from 6 (edge of
/// the text) down to 0 (inside a word).
fn boundary_score(left: &str, right: &str) -> u8 {
    let (Some(char1), Some(char2)) = (left.chars().last(), right.chars().next()) else {
        return 6;
    };

    let non_alphanumeric1 = !char1.is_alphanumeric();
    let non_alphanumeric2 = !char2.is_alphanumeric();
    let whitespace1 = non_alphanumeric1 && char1.is_whitespace();
    let whitespace2 = non_alphanumeric2 && char2.is_whitespace();
    let line_break1 = whitespace1 && (char1 == '\n' || char1 == '\r');
    let line_break2 = whitespace2 && (char2 == '\n' || char2 == '\r');
    let blank_line1 = line_break1 && (left.ends_with("\n\n") || left.ends_with("\n\r\n"));
    let blank_line2 = line_break2
        && (right.starts_with("\n\n")
            || right.starts_with("\r\n\n")
            || right.starts_with("\n\r\n")
            || right.starts_with("\r\n\r\n"));

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alphanumeric1 && !whitespace1 && whitespace2 {
        // End of a sentence.
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alphanumeric1 || non_alphanumeric2 {
        1
    } else {
        0
    }
}
