//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from dictation-core
pub use dictation_core::types::{
    CheckResult, CheckerConfig, DictationItem, DictationResult, DiffSegment, LevelSummary, Rank,
    SegmentKind, SubLevel, SubLevelSummary, ThresholdOverrides,
};

/// Longest answer or reference accepted by the check endpoints, in characters
pub const MAX_TEXT_CHARS: usize = 2_000;

// === Check API Types ===

/// Request body for POST /api/check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub user_answer: String,
    pub reference_answer: String,
    #[serde(default)]
    pub blanks: Vec<String>,
    #[serde(flatten)]
    pub overrides: ThresholdOverrides,
}

/// Response body for POST /api/check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub result: CheckResult,
    /// Thresholds actually applied
    pub config: CheckerConfig,
    pub checked_at: DateTime<Utc>,
}

// === Item API Types ===

/// Query for GET /api/items
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemsQuery {
    pub level: Option<String>,
    pub set_index: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemListResponse {
    pub items: Vec<DictationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelListResponse {
    pub levels: Vec<LevelSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubLevelListResponse {
    pub sub_levels: Vec<SubLevelSummary>,
}

/// Largest exam accepted by GET /api/levels/{level}/exam
pub const MAX_EXAM_QUESTIONS: usize = 50;

/// Query for GET /api/levels/{level}/exam
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamQuery {
    pub count: Option<usize>,
}

/// Request body for POST /api/items/{id}/check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCheckRequest {
    pub user_answer: String,
}

/// Response body for POST /api/levels/preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPreviewResponse {
    pub summary: LevelSummary,
    pub items: Vec<DictationItem>,
}
