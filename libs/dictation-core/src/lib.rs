//! Core dictation library shared by the checking service and its clients.
//!
//! Provides:
//! - Answer checking (normalization, blank extraction, fuzzy alignment, word diff)
//! - Question text helpers (blank masking and repair, dialogue formatting)
//! - Level file parser and in-memory item catalog (sub-levels, exam sampling)
//! - Shared types (CheckResult, DiffSegment, CheckerConfig, DictationItem, etc.)

pub mod catalog;
pub mod error;
pub mod matching;
pub mod parser;
pub mod question;
pub mod types;

pub use catalog::{default_sub_levels, Catalog, EXAM_QUESTION_COUNT};
pub use error::{ConfigError, ParseError, Result};
pub use matching::{
    align, blank_positions, check, extract_blank_portion, levenshtein_distance, normalize,
    synthesize, word_score, AnswerChecker,
};
pub use parser::{parse_level, LevelSet, QUESTIONS_PER_SET};
pub use question::{blanks_locatable, format_dialogue, mask_blanks, realign_blanks, RealignedBlanks};
pub use types::{
    accuracy_percent, AlignedPair, Alignment, CheckResult, CheckerConfig, DictationItem,
    DictationResult, DiffSegment, LevelSummary, MatchKind, Rank, SegmentKind, SubLevel,
    SubLevelSummary, ThresholdOverrides,
};
