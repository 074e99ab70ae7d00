//! Fuzzy weighted LCS alignment between word sequences.

use crate::types::{AlignedPair, Alignment, MatchKind};

/// Score for identical words.
pub const EXACT_SCORE: f64 = 1.0;
/// Score for words within the fuzzy threshold.
pub const CLOSE_SCORE: f64 = 0.5;
/// Words no longer than this are never fuzzy-matched.
const MIN_FUZZY_LEN: usize = 2;

/// Score two words: 1.0 when equal, 0.5 when close, 0.0 otherwise.
///
/// Close means the Levenshtein distance divided by the longer word's length
/// is at most `fuzzy_threshold`. Pairs where both words have at most two
/// characters are never close.
pub fn word_score(a: &str, b: &str, fuzzy_threshold: f64) -> f64 {
    if a == b {
        return EXACT_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len <= MIN_FUZZY_LEN {
        return 0.0;
    }

    let ratio = levenshtein_distance(a, b) as f64 / max_len as f64;
    if ratio <= fuzzy_threshold {
        CLOSE_SCORE
    } else {
        0.0
    }
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Align user words against reference words.
///
/// `dp[i][j]` holds the best score aligning the first `i` user words with the
/// first `j` reference words. A diagonal step is taken only when it strictly
/// beats both skips; among skips the user-skip wins ties. The back-trace uses
/// the same tie-break so results are reproducible.
pub fn align<U, R>(user: &[U], reference: &[R], fuzzy_threshold: f64) -> Alignment
where
    U: AsRef<str>,
    R: AsRef<str>,
{
    let m = user.len();
    let n = reference.len();

    if m == 0 || n == 0 {
        return Alignment::empty();
    }

    let mut dp = vec![vec![0.0_f64; n + 1]; m + 1];
    let mut via: Vec<Vec<Option<MatchKind>>> = vec![vec![None; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            let up = dp[i - 1][j];
            let left = dp[i][j - 1];
            let skip = if up >= left { up } else { left };

            let score = word_score(user[i - 1].as_ref(), reference[j - 1].as_ref(), fuzzy_threshold);
            if score > 0.0 {
                let diag = dp[i - 1][j - 1] + score;
                if diag > up && diag > left {
                    dp[i][j] = diag;
                    via[i][j] = Some(if score >= EXACT_SCORE {
                        MatchKind::Exact
                    } else {
                        MatchKind::Fuzzy
                    });
                    continue;
                }
            }

            dp[i][j] = skip;
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (m, n);
    while i > 0 && j > 0 {
        if let Some(kind) = via[i][j] {
            pairs.push(AlignedPair {
                user_index: i - 1,
                reference_index: j - 1,
                kind,
            });
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();

    Alignment {
        score: dp[m][n],
        pairs,
    }
}
