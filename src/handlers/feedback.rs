use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;

use crate::{
    error::Result,
    extractors::{AppJson, AppQuery},
    models::{
        feedback::{Feedback, FeedbackEntry, FeedbackFilter, FeedbackStats},
        session::Identity,
    },
    services::{export, feedback as feedback_service},
    state::AppState,
    validation::feedback::FeedbackSubmission,
};

/// Handles a feedback submission.
#[axum::debug_handler]
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppJson(payload): AppJson<FeedbackSubmission>,
) -> Result<impl IntoResponse> {
    let feedback = feedback_service::create_feedback(&state, &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// Lists all feedback. Admin only.
#[axum::debug_handler]
pub async fn list_feedback(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<FeedbackFilter>,
) -> Result<Json<Vec<FeedbackEntry>>> {
    let entries = feedback_service::list_all(&state, &filter).await?;
    tracing::debug!("📋 Listing {} feedback entries", entries.len());
    Ok(Json(entries))
}

/// Lists the caller's own feedback.
#[axum::debug_handler]
pub async fn my_feedback(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Feedback>>> {
    Ok(Json(feedback_service::list_mine(&state, &identity).await?))
}

/// Aggregate statistics. Admin only.
#[axum::debug_handler]
pub async fn feedback_stats(State(state): State<AppState>) -> Result<Json<FeedbackStats>> {
    Ok(Json(feedback_service::stats(&state).await?))
}

/// Downloads the (optionally filtered) listing as CSV. Admin only.
#[axum::debug_handler]
pub async fn export_feedback(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<FeedbackFilter>,
) -> Result<impl IntoResponse> {
    let entries = feedback_service::list_all(&state, &filter).await?;
    let body = export::feedback_csv(&entries);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export::export_filename(&Utc::now())
    );

    tracing::info!("📤 Exported {} feedback entries", entries.len());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
