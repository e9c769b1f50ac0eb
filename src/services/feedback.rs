use uuid::Uuid;
use crate::{
    error::Result,
    models::{
        feedback::{Feedback, FeedbackEntry, FeedbackFilter, FeedbackStats},
        session::Identity,
    },
    repositories::feedback as feedback_repo,
    state::AppState,
    validation::feedback::{FeedbackSubmission, validate_submission},
};

/// Validates a submission and stores it under the caller's account.
///
/// Validation runs before any database access.
pub async fn create_feedback(
    state: &AppState,
    identity: &Identity,
    submission: FeedbackSubmission,
) -> Result<Feedback> {
    let new_feedback = validate_submission(submission)?;

    let feedback = feedback_repo::create_feedback(
        &state.db,
        Uuid::new_v4(),
        identity.user_id,
        &new_feedback,
    )
    .await?;

    tracing::info!(
        "📝 Feedback {} ({}★) created by user {}",
        feedback.id,
        feedback.rating,
        identity.user_id
    );
    Ok(feedback)
}

/// Lists all feedback with author details, newest first.
pub async fn list_all(state: &AppState, filter: &FeedbackFilter) -> Result<Vec<FeedbackEntry>> {
    feedback_repo::list_with_authors(&state.db, filter).await
}

/// Lists the caller's own feedback, newest first.
pub async fn list_mine(state: &AppState, identity: &Identity) -> Result<Vec<Feedback>> {
    feedback_repo::list_by_user(&state.db, &identity.user_id).await
}

/// Computes aggregate statistics over all feedback.
pub async fn stats(state: &AppState) -> Result<FeedbackStats> {
    let tally = feedback_repo::rating_tally(&state.db).await?;
    Ok(FeedbackStats::from(tally))
}
