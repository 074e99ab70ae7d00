//! Free-form answer checking endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use dictation_core::AnswerChecker;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/check
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckRequest>,
) -> Result<Json<CheckResponse>> {
    ensure_length("user_answer", &request.user_answer)?;
    ensure_length("reference_answer", &request.reference_answer)?;
    ensure_length("blanks", &request.blanks.join(" "))?;

    let config = CheckerConfig::merge(state.checker.config(), Some(&request.overrides));
    if !request.overrides.is_empty() {
        tracing::debug!(?config, "applying per-request thresholds");
    }
    let checker = AnswerChecker::try_new(config)?;

    let result = checker.check(
        &request.user_answer,
        &request.reference_answer,
        &request.blanks,
    );

    tracing::debug!(
        accuracy = result.accuracy,
        is_correct = result.is_correct,
        "checked free-form answer"
    );

    Ok(Json(CheckResponse {
        result,
        config,
        checked_at: Utc::now(),
    }))
}

/// GET /api/config
pub async fn config(State(state): State<AppState>) -> Json<CheckerConfig> {
    Json(*state.checker.config())
}

/// Reject texts longer than [`MAX_TEXT_CHARS`].
pub(crate) fn ensure_length(field: &str, text: &str) -> Result<()> {
    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "{} is {} characters, limit is {}",
            field, len, MAX_TEXT_CHARS
        )));
    }
    Ok(())
}
