//! Answer checking for dictation attempts.
//!
//! A check runs four stages in order: normalization, optional blank
//! extraction, fuzzy alignment, and diff synthesis. Every call is a pure
//! computation over its inputs.

pub mod align;
pub mod blanks;
pub mod diff;
pub mod normalize;

pub use align::{align, levenshtein_distance, word_score};
pub use blanks::{blank_positions, extract_blank_portion};
pub use diff::synthesize;
pub use normalize::normalize;

use crate::error::ConfigError;
use crate::types::{CheckResult, CheckerConfig, DiffSegment, SegmentKind};

/// Stateless answer checker parameterized by its thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnswerChecker {
    config: CheckerConfig,
}

impl AnswerChecker {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Create a checker after validating its thresholds.
    pub fn try_new(config: CheckerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check a user answer against the reference sentence.
    ///
    /// When `blanks` normalizes to at least one word, only the part of the
    /// answer corresponding to the blanks is graded and accuracy is relative
    /// to the blank count. Otherwise the whole sentence is graded.
    pub fn check<B: AsRef<str>>(
        &self,
        user_answer: &str,
        reference_answer: &str,
        blanks: &[B],
    ) -> CheckResult {
        let user_words = normalize(user_answer);
        let reference_words = normalize(reference_answer);

        tracing::debug!(
            user = ?user_words,
            reference = ?reference_words,
            blank_count = blanks.len(),
            "checking answer"
        );

        if reference_words.is_empty() {
            return CheckResult {
                is_correct: true,
                accuracy: 1.0,
                segments: Vec::new(),
            };
        }

        if user_words.is_empty() {
            return CheckResult {
                is_correct: false,
                accuracy: 0.0,
                segments: reference_words
                    .into_iter()
                    .map(|w| DiffSegment::new(w, SegmentKind::Missing))
                    .collect(),
            };
        }

        let blank_words: Vec<String> = blanks
            .iter()
            .flat_map(|b| normalize(b.as_ref()))
            .collect();
        if !blank_words.is_empty() {
            return self.check_blanks(&user_words, &reference_words, &blank_words);
        }

        let result = self.grade(&user_words, &reference_words);
        tracing::debug!(accuracy = result.accuracy, "full sentence check");
        result
    }

    fn check_blanks(
        &self,
        user_words: &[String],
        reference_words: &[String],
        blank_words: &[String],
    ) -> CheckResult {
        let extracted = extract_blank_portion(
            user_words,
            reference_words,
            blank_words,
            self.config.fuzzy_threshold,
        );
        tracing::debug!(extracted = ?extracted, "extracted blank input");

        let result = self.grade(&extracted, blank_words);
        tracing::debug!(accuracy = result.accuracy, "blank check");
        result
    }

    /// Align, synthesize, and score `user` against a non-empty `reference`.
    fn grade(&self, user: &[String], reference: &[String]) -> CheckResult {
        let alignment = align(user, reference, self.config.fuzzy_threshold);
        let segments = synthesize(user, reference, &alignment.pairs);

        let accuracy = if reference.is_empty() {
            1.0
        } else {
            alignment.score / reference.len() as f64
        };

        CheckResult {
            is_correct: accuracy >= self.config.correctness_threshold,
            accuracy,
            segments,
        }
    }
}

/// Check an answer with the default thresholds.
pub fn check<B: AsRef<str>>(
    user_answer: &str,
    reference_answer: &str,
    blanks: &[B],
) -> CheckResult {
    AnswerChecker::default().check(user_answer, reference_answer, blanks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NO_BLANKS: [&str; 0] = [];
    const SENTENCE: &str = "I have to pick up my son and his friend at the center this evening.";
    const BLANKS: [&str; 5] = ["my", "son", "and", "his", "friend"];

    fn kinds(result: &CheckResult) -> Vec<SegmentKind> {
        result.segments.iter().map(|s| s.kind).collect()
    }

    fn texts(result: &CheckResult) -> Vec<&str> {
        result.segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn identical_answer_is_fully_correct() {
        for sentence in ["The cat sat.", "I'm fine, thanks!", SENTENCE, "one"] {
            let result = check(sentence, sentence, &NO_BLANKS);
            assert!(result.is_correct, "{sentence}");
            assert_eq!(result.accuracy, 1.0);
            assert!(result.segments.iter().all(|s| s.kind == SegmentKind::Match));
        }
    }

    #[test]
    fn empty_reference_is_trivially_correct() {
        for user in ["", "anything at all", "?!"] {
            let result = check(user, "", &NO_BLANKS);
            assert!(result.is_correct);
            assert_eq!(result.accuracy, 1.0);
            assert!(result.segments.is_empty());
        }
        assert!(check("x", "...", &NO_BLANKS).segments.is_empty());
    }

    #[test]
    fn empty_answer_lists_missing_words() {
        let result = check("", "the cat sat", &NO_BLANKS);
        assert!(!result.is_correct);
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(texts(&result), vec!["the", "cat", "sat"]);
        assert_eq!(kinds(&result), vec![SegmentKind::Missing; 3]);
    }

    #[test]
    fn empty_answer_ignores_blanks() {
        let result = check("  ", SENTENCE, &BLANKS);
        assert!(!result.is_correct);
        assert_eq!(result.segments.len(), 15);
    }

    #[test]
    fn pure_insertion_is_still_correct() {
        let result = check("the cat sat quickly", "the cat sat", &NO_BLANKS);
        assert!(result.is_correct);
        assert_eq!(result.accuracy, 1.0);
        assert_eq!(
            kinds(&result),
            vec![
                SegmentKind::Match,
                SegmentKind::Match,
                SegmentKind::Match,
                SegmentKind::Extra,
            ]
        );
        assert_eq!(result.segments[3].text, "quickly");
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        let result = check("THE CAT, SAT!", "the cat sat.", &NO_BLANKS);
        assert_eq!(result.accuracy, 1.0);
    }

    #[test]
    fn spelling_mistake_scores_half_a_word() {
        let result = check("the kat sat", "the cat sat", &NO_BLANKS);
        assert!((result.accuracy - 2.5 / 3.0).abs() < 1e-12);
        assert!(!result.is_correct);
        assert_eq!(texts(&result), vec!["the", "cat(kat)", "sat"]);
    }

    #[test]
    fn threshold_is_inclusive() {
        // 9.5 / 10 = 0.95
        let reference = "one two three four five six seven eight nine tenth";
        let user = "one two three four five six seven eight nine tent";
        let checker = AnswerChecker::new(CheckerConfig {
            correctness_threshold: 0.95,
            ..CheckerConfig::default()
        });
        let result = checker.check(user, reference, &NO_BLANKS);
        assert_eq!(result.accuracy, 0.95);
        assert!(result.is_correct);

        let strict = AnswerChecker::new(CheckerConfig {
            correctness_threshold: 0.96,
            ..CheckerConfig::default()
        });
        assert!(!strict.check(user, reference, &NO_BLANKS).is_correct);
    }

    #[test]
    fn fuzzy_threshold_is_configurable() {
        let lenient = AnswerChecker::new(CheckerConfig {
            fuzzy_threshold: 0.5,
            ..CheckerConfig::default()
        });
        let result = lenient.check("the wild", "the word", &NO_BLANKS);
        assert_eq!(kinds(&result), vec![SegmentKind::Match, SegmentKind::Close]);

        let result = check("the wild", "the word", &NO_BLANKS);
        assert_eq!(
            kinds(&result),
            vec![SegmentKind::Match, SegmentKind::Missing, SegmentKind::Extra]
        );
    }

    #[test]
    fn accuracy_stays_in_bounds() {
        let cases = [
            ("the the the the", "the"),
            ("cat", "the cat sat on the mat"),
            ("mat the on sat cat the", "the cat sat on the mat"),
            ("a", "b"),
        ];
        for (user, reference) in cases {
            let result = check(user, reference, &NO_BLANKS);
            assert!((0.0..=1.0).contains(&result.accuracy), "{user:?}");
            assert_eq!(result.is_correct, result.accuracy >= 0.90);
        }
    }

    #[test]
    fn blanks_grade_only_the_blank_portion() {
        let result = check(SENTENCE, SENTENCE, &BLANKS);
        assert!(result.is_correct);
        assert_eq!(result.accuracy, 1.0);
        assert_eq!(texts(&result), BLANKS.to_vec());
    }

    #[test]
    fn blanks_ignore_missing_scaffold() {
        let result = check("My son and his friend", SENTENCE, &BLANKS);
        assert!(result.is_correct);
        assert_eq!(result.accuracy, 1.0);
    }

    #[test]
    fn blanks_with_mistakes() {
        let user = "I have to pick up my sun and her friend at the center this evening";
        let result = check(user, SENTENCE, &BLANKS);
        // my, and, friend exact; sun close; her missing
        assert_eq!(result.accuracy, 3.5 / 5.0);
        assert!(!result.is_correct);
        assert_eq!(
            texts(&result),
            vec!["my", "son(sun)", "and", "his", "her", "friend"]
        );
    }

    #[test]
    fn blank_phrases_are_split_into_words() {
        let result = check("I feel very tired", "I feel very tired.", &["very tired."]);
        assert_eq!(result.accuracy, 1.0);
        assert_eq!(result.segments.len(), 2);
    }

    #[test]
    fn punctuation_only_blanks_fall_back_to_full_sentence() {
        let result = check("the cat", "the cat sat", &["..."]);
        assert_eq!(result.accuracy, 2.0 / 3.0);
        assert_eq!(result.segments.len(), 3);
    }

    #[test]
    fn unlocatable_blanks_degrade_silently() {
        let result = check("the cat sat", "the cat sat", &["dog"]);
        // whole sentence is scaffold, so nothing is extracted
        assert_eq!(result.accuracy, 0.0);
        assert!(!result.is_correct);
        assert_eq!(texts(&result), vec!["dog"]);
        assert_eq!(kinds(&result), vec![SegmentKind::Missing]);
    }

    #[test]
    fn results_are_deterministic() {
        let user = "i have to pik up my sun and her friends at center";
        let first = check(user, SENTENCE, &BLANKS);
        for _ in 0..5 {
            assert_eq!(check(user, SENTENCE, &BLANKS), first);
        }
    }

    #[test]
    fn try_new_rejects_invalid_config() {
        let config = CheckerConfig {
            fuzzy_threshold: -0.1,
            ..CheckerConfig::default()
        };
        assert!(AnswerChecker::try_new(config).is_err());
        assert!(AnswerChecker::try_new(CheckerConfig::default()).is_ok());
    }
}
