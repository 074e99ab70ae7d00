//! Level and item endpoints

use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use dictation_core::{parse_level, EXAM_QUESTION_COUNT};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::check::ensure_length;
use crate::AppState;

/// GET /api/levels
pub async fn levels(State(state): State<AppState>) -> Json<LevelListResponse> {
    Json(LevelListResponse {
        levels: state.catalog.levels(),
    })
}

/// GET /api/sub-levels
pub async fn sub_levels(State(state): State<AppState>) -> Json<SubLevelListResponse> {
    Json(SubLevelListResponse {
        sub_levels: state.catalog.sub_levels(&state.sub_levels),
    })
}

/// GET /api/levels/{level}/exam
pub async fn exam(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<ExamQuery>,
) -> Result<Json<ItemListResponse>> {
    let count = query.count.unwrap_or(EXAM_QUESTION_COUNT);
    if count == 0 || count > MAX_EXAM_QUESTIONS {
        return Err(ApiError::BadRequest(format!(
            "count must be between 1 and {}",
            MAX_EXAM_QUESTIONS
        )));
    }

    let items: Vec<DictationItem> = state
        .catalog
        .exam_items(&level, count, &mut rand::thread_rng())
        .into_iter()
        .cloned()
        .collect();

    if items.is_empty() {
        return Err(ApiError::NotFound(format!("Level {}", level)));
    }

    tracing::debug!(level = %level, count = items.len(), "drew exam items");
    Ok(Json(ItemListResponse { items }))
}

/// GET /api/items
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<ItemListResponse>> {
    let items = match (query.level.as_deref(), query.set_index) {
        (Some(level), set_index) => state
            .catalog
            .level_items(level, set_index)
            .into_iter()
            .cloned()
            .collect(),
        (None, None) => state.catalog.items().to_vec(),
        (None, Some(_)) => {
            return Err(ApiError::BadRequest(
                "set_index requires a level".to_string(),
            ))
        }
    };

    Ok(Json(ItemListResponse { items }))
}

/// GET /api/items/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DictationItem>> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Item {}", id)))
}

/// POST /api/items/{id}/check
pub async fn check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ItemCheckRequest>,
) -> Result<Json<DictationResult>> {
    ensure_length("user_answer", &request.user_answer)?;

    let result = state
        .catalog
        .check_item(&state.checker, &id, &request.user_answer)
        .ok_or_else(|| ApiError::NotFound(format!("Item {}", id)))?;

    tracing::debug!(item = %id, accuracy = result.accuracy, "checked item answer");
    Ok(Json(result))
}

/// POST /api/levels/preview
///
/// Parses a raw level file without adding it to the catalog.
pub async fn preview(body: String) -> Result<Json<LevelPreviewResponse>> {
    let set = parse_level(&body)?;

    let sets: BTreeSet<u32> = set.items.iter().map(|item| item.set_index).collect();
    let summary = LevelSummary {
        level: set.level,
        title: set.title,
        item_count: set.items.len(),
        set_count: sets.len(),
    };

    Ok(Json(LevelPreviewResponse {
        summary,
        items: set.items,
    }))
}
