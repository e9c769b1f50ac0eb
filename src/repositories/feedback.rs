use deadpool_postgres::Pool;
use uuid::Uuid;
use crate::{
    error::Result,
    models::feedback::{Feedback, FeedbackEntry, FeedbackFilter, NewFeedback, RatingTally},
};

/// Inserts a feedback record owned by `user_id`.
pub async fn create_feedback(
    pool: &Pool,
    id: Uuid,
    user_id: Uuid,
    feedback: &NewFeedback,
) -> Result<Feedback> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO feedback (id, user_id, name, email, message, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, email, message, rating, created_at
            "#,
            &[
                &id,
                &user_id,
                &feedback.name,
                &feedback.email,
                &feedback.message,
                &feedback.rating,
            ],
        )
        .await?;
    Feedback::try_from(&row)
}

/// Lists every feedback record with its author, newest first.
pub async fn list_with_authors(pool: &Pool, filter: &FeedbackFilter) -> Result<Vec<FeedbackEntry>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT
                f.id, f.user_id, f.name, f.email, f.message, f.rating, f.created_at,
                u.name AS author_name, u.email AS author_email
            FROM feedback f
            LEFT JOIN users u ON u.id = f.user_id
            WHERE ($1::TEXT IS NULL
                   OR strpos(lower(f.name), lower($1)) > 0
                   OR strpos(lower(f.email), lower($1)) > 0
                   OR strpos(lower(f.message), lower($1)) > 0)
              AND ($2::SMALLINT IS NULL OR f.rating = $2)
            ORDER BY f.created_at DESC
            "#,
            &[&filter.search_term(), &filter.rating],
        )
        .await?;
    rows.iter().map(FeedbackEntry::try_from).collect()
}

/// Lists the feedback owned by one user, newest first.
pub async fn list_by_user(pool: &Pool, user_id: &Uuid) -> Result<Vec<Feedback>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT id, user_id, name, email, message, rating, created_at
            FROM feedback
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
            &[user_id],
        )
        .await?;
    rows.iter().map(Feedback::try_from).collect()
}

/// Gathers rating counters over the whole table in a single scan.
pub async fn rating_tally(pool: &Pool) -> Result<RatingTally> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(rating), 0)::BIGINT AS rating_sum,
                COUNT(*) FILTER (WHERE rating >= 4) AS positive,
                COUNT(*) FILTER (WHERE rating <= 2) AS negative
            FROM feedback
            "#,
            &[],
        )
        .await?;

    Ok(RatingTally {
        total: row.try_get("total")?,
        rating_sum: row.try_get("rating_sum")?,
        positive: row.try_get("positive")?,
        negative: row.try_get("negative")?,
    })
}
