//! Question text helpers: masking blank words and repairing blank lists.

use crate::matching::normalize::stripped;
use serde::{Deserialize, Serialize};

/// Placeholder shown in place of a blank word.
pub const BLANK_PLACEHOLDER: &str = "______";

/// Punctuation that may trail a word or a placeholder.
const TRAILING_PUNCT: &[char] = &['.', ',', '?', '!', ':', ';'];

/// Blank list and question text rebuilt from an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealignedBlanks {
    pub blanks: Vec<String>,
    pub question_text: String,
}

/// Replace the blank words of `answer_text` with placeholders.
///
/// Blanks are matched in order against answer words, ignoring case and
/// punctuation. Returns `None` if some blank is never found.
pub fn mask_blanks<B: AsRef<str>>(answer_text: &str, blanks: &[B]) -> Option<String> {
    if blanks.is_empty() {
        return Some(answer_text.to_string());
    }

    let mut pending = blanks.iter().map(|b| stripped(b.as_ref())).peekable();
    let mut words = Vec::new();

    for word in answer_text.split_whitespace() {
        match pending.peek() {
            Some(blank) if *blank == stripped(word) => {
                pending.next();
                words.push(BLANK_PLACEHOLDER);
            }
            _ => words.push(word),
        }
    }

    if pending.peek().is_some() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Whether every blank can be located, in order, in `answer_text`.
pub fn blanks_locatable<B: AsRef<str>>(answer_text: &str, blanks: &[B]) -> bool {
    mask_blanks(answer_text, blanks).is_some()
}

/// Put speaker `B:` on its own line.
///
/// The first whitespace run before `B:` (or full-width `B：`) becomes a
/// single newline.
pub fn format_dialogue(text: &str) -> String {
    for marker in ["B:", "B："] {
        for (idx, _) in text.match_indices(marker) {
            let before = text[..idx].trim_end();
            if before.len() < idx {
                return format!("{}\n{}", before, &text[idx..]);
            }
        }
    }
    text.to_string()
}

/// Recompute blanks from a question whose placeholders may be misplaced.
///
/// Visible question words are anchored greedily onto answer words. The
/// answer words between anchors are the blanks of that region. A region whose
/// placeholder count matches keeps its placeholders; otherwise it is rebuilt
/// with one placeholder per answer word.
pub fn realign_blanks(answer_text: &str, question_text: &str) -> RealignedBlanks {
    let answer: Vec<&str> = answer_text.split_whitespace().collect();
    let question: Vec<&str> = question_text.split_whitespace().collect();

    let mut anchors: Vec<(usize, usize)> = Vec::new();
    let mut next_answer = 0;
    for (qi, word) in question.iter().enumerate() {
        if is_placeholder(word) {
            continue;
        }
        let key = stripped(word);
        if let Some(offset) = answer[next_answer..]
            .iter()
            .position(|a| stripped(a) == key)
        {
            anchors.push((qi, next_answer + offset));
            next_answer += offset + 1;
        }
    }

    let mut blanks = Vec::new();
    let mut masked: Vec<String> = Vec::new();
    let (mut q_start, mut a_start) = (0, 0);

    for &(qi, ai) in &anchors {
        let region_q = &question[q_start..qi];
        let region_a = &answer[a_start..ai];

        if region_a.len() == count_placeholders(region_q) {
            let mut fill = region_a.iter();
            for word in region_q {
                if is_placeholder(word) {
                    if let Some(a) = fill.next() {
                        blanks.push(without_punct(a).to_string());
                    }
                    masked.push(placeholder_with(trailing_punct(word)));
                } else {
                    masked.push(word.to_string());
                }
            }
        } else {
            for a in region_a {
                blanks.push(without_punct(a).to_string());
                masked.push(BLANK_PLACEHOLDER.to_string());
            }
            let punct = region_q
                .iter()
                .rev()
                .find(|w| is_placeholder(w))
                .map_or("", |w| trailing_punct(w));
            if !punct.is_empty() {
                if let Some(last) = masked.last_mut() {
                    last.push_str(punct);
                }
            }
        }

        masked.push(question[qi].to_string());
        q_start = qi + 1;
        a_start = ai + 1;
    }

    let region_q = &question[q_start.min(question.len())..];
    let region_a = &answer[a_start.min(answer.len())..];
    let all_placeholders = region_q.iter().all(|w| is_placeholder(w));

    if all_placeholders && region_a.len() == region_q.len() {
        for (word, a) in region_q.iter().zip(region_a) {
            blanks.push(without_punct(a).to_string());
            masked.push(placeholder_with(trailing_punct(word)));
        }
    } else {
        for a in region_a {
            blanks.push(without_punct(a).to_string());
            masked.push(placeholder_with(trailing_punct(a)));
        }
    }

    RealignedBlanks {
        blanks,
        question_text: masked.join(" "),
    }
}

fn is_placeholder(word: &str) -> bool {
    let mut core = word.chars().filter(|c| !TRAILING_PUNCT.contains(c)).peekable();
    core.peek().is_some() && core.all(|c| c == '_')
}

fn count_placeholders(words: &[&str]) -> usize {
    words.iter().filter(|w| is_placeholder(w)).count()
}

fn without_punct(word: &str) -> &str {
    word.trim_end_matches(TRAILING_PUNCT)
}

fn trailing_punct(word: &str) -> &str {
    &word[without_punct(word).len()..]
}

fn placeholder_with(punct: &str) -> String {
    format!("{BLANK_PLACEHOLDER}{punct}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn mask_replaces_blanks_in_order() {
        assert_eq!(
            mask_blanks("I feel tired.", &["I", "feel"]).as_deref(),
            Some("______ ______ tired.")
        );
        assert_eq!(
            mask_blanks("Don\u{2019}t worry, be happy.", &["don't", "happy"]).as_deref(),
            Some("______ worry, be ______")
        );
    }

    #[test]
    fn mask_masks_first_occurrence_of_repeated_word() {
        assert_eq!(
            mask_blanks("the cat and the dog", &["the", "dog"]).as_deref(),
            Some("______ cat and the ______")
        );
    }

    #[test]
    fn mask_fails_when_blank_missing_or_out_of_order() {
        assert_eq!(mask_blanks("I feel tired.", &["sleepy"]), None);
        assert_eq!(mask_blanks("I feel tired.", &["tired", "feel"]), None);
        assert!(!blanks_locatable("I feel tired.", &["tired", "feel"]));
        assert!(blanks_locatable("I feel tired.", &["feel", "tired"]));
    }

    #[test]
    fn mask_without_blanks_is_identity() {
        let none: [&str; 0] = [];
        assert_eq!(mask_blanks("Hello there.", &none).as_deref(), Some("Hello there."));
    }

    #[test]
    fn dialogue_speaker_moves_to_new_line() {
        assert_eq!(
            format_dialogue("A: Are you ready?  B: Yes, I am."),
            "A: Are you ready?\nB: Yes, I am."
        );
        assert_eq!(
            format_dialogue("A: Hungry? B：Very."),
            "A: Hungry?\nB：Very."
        );
    }

    #[test]
    fn dialogue_without_spaced_marker_is_unchanged() {
        assert_eq!(format_dialogue("I feel tired."), "I feel tired.");
        assert_eq!(format_dialogue("B: first line"), "B: first line");
        assert_eq!(format_dialogue("Plan B:"), "Plan\nB:");
    }

    #[test]
    fn realign_keeps_matching_placeholders() {
        let fixed = realign_blanks("I feel tired.", "______ ______ tired.");
        assert_eq!(fixed.blanks, vec!["I", "feel"]);
        assert_eq!(fixed.question_text, "______ ______ tired.");
    }

    #[test]
    fn realign_collapses_extra_placeholders() {
        let fixed = realign_blanks("She did it herself.", "She did it ______ ______ ______.");
        assert_eq!(fixed.blanks, vec!["herself"]);
        assert_eq!(fixed.question_text, "She did it ______.");
    }

    #[test]
    fn realign_splits_short_region() {
        let fixed = realign_blanks("I got very angry today.", "I ______ today.");
        assert_eq!(fixed.blanks, vec!["got", "very", "angry"]);
        assert_eq!(fixed.question_text, "I ______ ______ ______ today.");
    }

    #[test]
    fn realign_trailing_region_keeps_punctuation() {
        let fixed = realign_blanks("I have to go now.", "I ______ to go ______.");
        assert_eq!(fixed.blanks, vec!["have", "now"]);
        assert_eq!(fixed.question_text, "I ______ to go ______.");
    }

    #[test]
    fn realign_trailing_mismatch_uses_answer_punctuation() {
        let fixed = realign_blanks("Wait, here, now!", "Wait, ______");
        assert_eq!(fixed.blanks, vec!["here", "now"]);
        assert_eq!(fixed.question_text, "Wait, ______, ______!");
        assert!(blanks_locatable("Wait, here, now!", &fixed.blanks));
    }

    #[test]
    fn realign_without_anchors_blanks_everything() {
        let fixed = realign_blanks("Good morning.", "______ ______ ______");
        assert_eq!(fixed.blanks, vec!["Good", "morning"]);
        assert_eq!(fixed.question_text, "______ ______.");
    }

    #[test]
    fn placeholder_detection() {
        assert!(is_placeholder("______"));
        assert!(is_placeholder("___?"));
        assert!(!is_placeholder("?"));
        assert!(!is_placeholder("a_b"));
        assert_eq!(trailing_punct("tired.!"), ".!");
        assert_eq!(without_punct("tired.!"), "tired");
    }
}
