//! Isolating the fill-in-the-blank portion of a free-form answer.

use std::collections::BTreeSet;

use super::align::{word_score, EXACT_SCORE};

/// Reference positions occupied by blank words.
///
/// Each blank word claims the first unclaimed reference position holding it,
/// scanning left to right, so repeated words resolve by position order.
/// Blank words absent from the reference claim nothing.
pub fn blank_positions<R, B>(reference: &[R], blanks: &[B]) -> BTreeSet<usize>
where
    R: AsRef<str>,
    B: AsRef<str>,
{
    let mut remaining: Vec<&str> = blanks.iter().map(|b| b.as_ref()).collect();
    let mut positions = BTreeSet::new();

    for (idx, word) in reference.iter().enumerate() {
        let word: &str = word.as_ref();
        if let Some(found) = remaining.iter().position(|b| *b == word) {
            positions.insert(idx);
            remaining.remove(found);
        }
    }

    positions
}

/// Pull out the user words that correspond to the blanked span.
///
/// The non-blank reference words are treated as scaffolding the user is
/// expected to reproduce verbatim. User words are walked in order against
/// the pending scaffold word: an exact match consumes both, anything else is
/// collected and the scaffold word stays pending. Once the scaffold is
/// exhausted every remaining user word is collected.
///
/// This is a single greedy pass, not an optimal alignment: a misspelled
/// scaffold word leaks into the result.
pub fn extract_blank_portion<U, R, B>(
    user: &[U],
    reference: &[R],
    blanks: &[B],
    fuzzy_threshold: f64,
) -> Vec<String>
where
    U: AsRef<str>,
    R: AsRef<str>,
    B: AsRef<str>,
{
    let positions = blank_positions(reference, blanks);
    let scaffold: Vec<&str> = reference
        .iter()
        .enumerate()
        .filter(|(idx, _)| !positions.contains(idx))
        .map(|(_, w)| w.as_ref())
        .collect();

    let mut extracted = Vec::new();
    let mut pending = scaffold.iter().peekable();

    for word in user {
        let word: &str = word.as_ref();
        match pending.peek() {
            Some(expected) if word_score(word, expected, fuzzy_threshold) >= EXACT_SCORE => {
                pending.next();
            }
            _ => extracted.push(word.to_string()),
        }
    }

    extracted
}
