//! Diff segment synthesis from an alignment.

use crate::types::{AlignedPair, DiffSegment, MatchKind, SegmentKind};

/// Build reading-order diff segments for two word sequences.
///
/// Aligned pairs act as anchors. Before each anchor, unmatched reference
/// words are emitted as `Missing` and then unmatched user words as `Extra`.
/// Fuzzy anchors render as `reference(user)`. Leftover reference words come
/// before leftover user words.
///
/// `pairs` must be an alignment of these two sequences: indices in bounds and
/// strictly increasing on both sides, as produced by [`align`](super::align).
/// Debug builds assert this.
pub fn synthesize<U, R>(user: &[U], reference: &[R], pairs: &[AlignedPair]) -> Vec<DiffSegment>
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    debug_assert!(
        is_monotonic_within(pairs, user.len(), reference.len()),
        "aligned pairs out of bounds or out of order"
    );

    let mut segments = Vec::with_capacity(user.len().max(reference.len()));
    let mut ui = 0;
    let mut ci = 0;

    for pair in pairs {
        while ci < pair.reference_index {
            segments.push(DiffSegment::new(reference[ci].as_ref(), SegmentKind::Missing));
            ci += 1;
        }
        while ui < pair.user_index {
            segments.push(DiffSegment::new(user[ui].as_ref(), SegmentKind::Extra));
            ui += 1;
        }

        let expected = reference[ci].as_ref();
        let segment = match pair.kind {
            MatchKind::Exact => DiffSegment::new(expected, SegmentKind::Match),
            MatchKind::Fuzzy => DiffSegment::new(
                format!("{}({})", expected, user[ui].as_ref()),
                SegmentKind::Close,
            ),
        };
        segments.push(segment);
        ci += 1;
        ui += 1;
    }

    segments.extend(
        reference[ci..]
            .iter()
            .map(|w| DiffSegment::new(w.as_ref(), SegmentKind::Missing)),
    );
    segments.extend(
        user[ui..]
            .iter()
            .map(|w| DiffSegment::new(w.as_ref(), SegmentKind::Extra)),
    );

    segments
}

fn is_monotonic_within(pairs: &[AlignedPair], user_len: usize, reference_len: usize) -> bool {
    let in_bounds = pairs
        .iter()
        .all(|p| p.user_index < user_len && p.reference_index < reference_len);
    let increasing = pairs.windows(2).all(|w| {
        w[0].user_index < w[1].user_index && w[0].reference_index < w[1].reference_index
    });
    in_bounds && increasing
}
