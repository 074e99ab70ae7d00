//! Level file parser for dictation items.
//!
//! # Format
//! ```json
//! {
//!   "level": "level1",
//!   "title": "Beginner",
//!   "total": 1,
//!   "questions": [
//!     {
//!       "id": 1,
//!       "level": "level1",
//!       "question_text": "______ ______ tired.",
//!       "answer_text": "I feel tired.",
//!       "blanks": ["I", "feel"],
//!       "japanese": "疲れた。",
//!       "pattern": "feel + adjective",
//!       "explanation": "..."
//!     }
//!   ]
//! }
//! ```

use crate::error::{ParseError, Result};
use crate::question::{blanks_locatable, format_dialogue, mask_blanks, realign_blanks};
use crate::types::DictationItem;
use serde::Deserialize;
use std::collections::HashSet;

/// Number of questions in one practice set.
pub const QUESTIONS_PER_SET: u32 = 5;

/// A parsed level file.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    pub level: String,
    pub title: String,
    pub items: Vec<DictationItem>,
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    level: String,
    title: String,
    #[serde(default)]
    total: Option<usize>,
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    id: i64,
    level: String,
    question_text: String,
    answer_text: String,
    #[serde(default)]
    blanks: Vec<String>,
    #[serde(default)]
    japanese: String,
    #[serde(default)]
    pattern: String,
    #[serde(default)]
    explanation: String,
    #[serde(default)]
    audio_file: Option<String>,
}

/// Parse a level file into dictation items.
pub fn parse_level(content: &str) -> Result<LevelSet> {
    let file: LevelFile = serde_json::from_str(content)?;

    if let Some(total) = file.total {
        if total != file.questions.len() {
            tracing::warn!(
                level = %file.level,
                total,
                found = file.questions.len(),
                "level total does not match question count"
            );
        }
    }

    let mut seen_ids = HashSet::new();
    let mut items = Vec::with_capacity(file.questions.len());

    for entry in file.questions {
        let number = match u32::try_from(entry.id) {
            Ok(n) if n >= 1 => n,
            _ => {
                return Err(ParseError::InvalidId {
                    level: file.level,
                    id: entry.id,
                })
            }
        };
        if !seen_ids.insert(entry.id) {
            return Err(ParseError::DuplicateId {
                level: file.level,
                id: entry.id,
            });
        }
        if entry.level != file.level {
            return Err(ParseError::LevelMismatch {
                id: entry.id,
                expected: file.level,
                found: entry.level,
            });
        }

        items.push(build_item(entry, number));
    }

    Ok(LevelSet {
        level: file.level,
        title: file.title,
        items,
    })
}

fn build_item(entry: QuestionEntry, number: u32) -> DictationItem {
    let id = format!("{}_{}", entry.level, number);

    let blanks = if blanks_locatable(&entry.answer_text, &entry.blanks) {
        entry.blanks
    } else {
        let repaired = realign_blanks(&entry.answer_text, &entry.question_text);
        tracing::warn!(
            item = %id,
            original = ?entry.blanks,
            repaired = ?repaired.blanks,
            "blanks not found in answer, realigned from question text"
        );
        repaired.blanks
    };

    // The stored question text may have drifted from the blanks; rebuild it.
    let question_text = match mask_blanks(&entry.answer_text, &blanks) {
        Some(masked) => format_dialogue(&masked),
        None => format_dialogue(&entry.question_text),
    };

    let audio_file = entry
        .audio_file
        .unwrap_or_else(|| format!("{}_{:03}.mp3", entry.level, number));

    DictationItem {
        id,
        set_index: set_index_for(number),
        question_text,
        answer_text: format_dialogue(&entry.answer_text),
        blanks,
        japanese: entry.japanese,
        pattern: entry.pattern,
        explanation: entry.explanation,
        audio_file,
        level: entry.level,
    }
}

/// 1-based set index for a 1-based question number.
pub fn set_index_for(number: u32) -> u32 {
    number.saturating_sub(1) / QUESTIONS_PER_SET + 1
}
