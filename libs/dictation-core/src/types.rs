//! Core types for the dictation answer checker.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How an aligned word pair matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The words are identical.
    Exact,
    /// The words differ by a small edit distance relative to their length.
    Fuzzy,
}

/// One edge of a word alignment between user input and the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub user_index: usize,
    pub reference_index: usize,
    pub kind: MatchKind,
}

/// Result of aligning two word sequences.
///
/// Pairs are strictly increasing in both indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub score: f64,
    pub pairs: Vec<AlignedPair>,
}

impl Alignment {
    /// An alignment with no matched words.
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            pairs: Vec::new(),
        }
    }
}

/// Display category of a diff segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Reference word typed correctly.
    Match,
    /// Reference word typed with a minor spelling error.
    Close,
    /// Reference word absent from the user input.
    Missing,
    /// User word with no counterpart in the reference.
    Extra,
}

/// One unit of the rendered comparison, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub text: String,
    pub kind: SegmentKind,
}

impl DiffSegment {
    pub fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether accuracy reached the correctness threshold.
    pub is_correct: bool,
    /// Normalized alignment score between 0.0 and 1.0.
    pub accuracy: f64,
    /// Word-level diff for display.
    pub segments: Vec<DiffSegment>,
}

/// Thresholds used by the answer checker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Minimum accuracy for an answer to count as correct.
    pub correctness_threshold: f64,
    /// Maximum edit distance, relative to the longer word, for a close match.
    pub fuzzy_threshold: f64,
}

impl CheckerConfig {
    pub const DEFAULT_CORRECTNESS_THRESHOLD: f64 = 0.90;
    pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.35;

    /// Check that both thresholds are finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("correctness_threshold", self.correctness_threshold)?;
        check_unit_interval("fuzzy_threshold", self.fuzzy_threshold)
    }

    /// Apply optional per-request overrides on top of a base config.
    pub fn merge(base: &CheckerConfig, overrides: Option<&ThresholdOverrides>) -> Self {
        match overrides {
            Some(o) => Self {
                correctness_threshold: o
                    .correctness_threshold
                    .unwrap_or(base.correctness_threshold),
                fuzzy_threshold: o.fuzzy_threshold.unwrap_or(base.fuzzy_threshold),
            },
            None => *base,
        }
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            correctness_threshold: Self::DEFAULT_CORRECTNESS_THRESHOLD,
            fuzzy_threshold: Self::DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

fn check_unit_interval(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value })
    }
}

/// Per-request threshold overrides (all fields optional).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correctness_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_threshold: Option<f64>,
}

impl ThresholdOverrides {
    pub fn is_empty(&self) -> bool {
        self.correctness_threshold.is_none() && self.fuzzy_threshold.is_none()
    }
}

/// A single dictation question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictationItem {
    /// Catalog-wide ID, `"<level>_<number>"`.
    pub id: String,
    pub level: String,
    /// 1-based question set within the level.
    pub set_index: u32,
    /// Answer text with blank words masked as `______`.
    pub question_text: String,
    /// Full correct sentence.
    pub answer_text: String,
    /// Words graded in fill-in-the-blank mode, in sentence order.
    pub blanks: Vec<String>,
    pub japanese: String,
    pub pattern: String,
    pub explanation: String,
    pub audio_file: String,
}

/// Per-level counts for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: String,
    pub title: String,
    pub item_count: usize,
    pub set_count: usize,
}

/// A named range of sets within a level, shown as its own course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLevel {
    pub id: String,
    pub level: String,
    pub title: String,
    /// First set in the range, inclusive.
    pub first_set: u32,
    /// Last set in the range, inclusive.
    pub last_set: u32,
}

impl SubLevel {
    pub fn new(id: &str, level: &str, title: &str, first_set: u32, last_set: u32) -> Self {
        Self {
            id: id.to_string(),
            level: level.to_string(),
            title: title.to_string(),
            first_set,
            last_set,
        }
    }

    pub fn contains_set(&self, set_index: u32) -> bool {
        (self.first_set..=self.last_set).contains(&set_index)
    }
}

/// Sub-level with counts of the loaded items it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLevelSummary {
    #[serde(flatten)]
    pub sub_level: SubLevel,
    pub item_count: usize,
    pub set_count: usize,
}

/// Score band for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Perfect,
    Good,
    Almost,
    Review,
}

impl Rank {
    /// Lower bounds in percent, highest band first.
    const BANDS: [(u32, Rank); 3] = [(100, Rank::Perfect), (80, Rank::Good), (60, Rank::Almost)];

    pub fn from_percent(percent: u32) -> Self {
        Self::BANDS
            .iter()
            .find(|(min, _)| percent >= *min)
            .map_or(Rank::Review, |(_, rank)| *rank)
    }

    pub fn from_accuracy(accuracy: f64) -> Self {
        Self::from_percent(accuracy_percent(accuracy))
    }

    /// Display label shown to learners.
    pub fn label(self) -> &'static str {
        match self {
            Rank::Perfect => "パーフェクト！",
            Rank::Good => "よくできました",
            Rank::Almost => "あと少し！",
            Rank::Review => "復習しましょう",
        }
    }
}

/// Accuracy as a whole percentage, rounded and clamped to 0..=100.
pub fn accuracy_percent(accuracy: f64) -> u32 {
    if accuracy.is_nan() {
        return 0;
    }
    (accuracy.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Outcome of answering one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictationResult {
    pub item_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub accuracy: f64,
    pub rank: Rank,
    pub segments: Vec<DiffSegment>,
}
