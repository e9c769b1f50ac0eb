use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

use crate::error::AppError;

/// Represents a feedback submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// The unique identifier for the feedback.
    pub id: Uuid,
    /// The name given by the submitter.
    pub name: String,
    /// The contact email given by the submitter; empty when omitted.
    pub email: String,
    /// The feedback text.
    pub message: String,
    /// Star rating, 1 to 5.
    pub rating: i16,
    /// The ID of the user who submitted it.
    pub user_id: Uuid,
    /// The timestamp when the feedback was created.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for Feedback {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            message: row.try_get("message")?,
            rating: row.try_get("rating")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Validated input for a new feedback record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i16,
}

/// Minimal projection of a feedback author.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A feedback record as listed to admins, with its author resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i16,
    /// The author, in place of the bare user ID. `None` if the account is gone.
    #[serde(rename = "userId")]
    pub author: Option<AuthorSummary>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<&Row> for FeedbackEntry {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let author_name: Option<String> = row.try_get("author_name")?;
        let author_email: Option<String> = row.try_get("author_email")?;
        let author = match (author_name, author_email) {
            (Some(name), Some(email)) => Some(AuthorSummary {
                id: row.try_get("user_id")?,
                name,
                email,
            }),
            _ => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            message: row.try_get("message")?,
            rating: row.try_get("rating")?,
            author,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Optional narrowing of the admin listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackFilter {
    /// Case-insensitive substring matched against name, email and message.
    pub search: Option<String>,
    /// Exact rating match.
    pub rating: Option<i16>,
}

impl FeedbackFilter {
    /// The search term, if it has any non-whitespace content.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Raw counters gathered over all ratings in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    pub total: i64,
    pub rating_sum: i64,
    /// Ratings of 4 or 5.
    pub positive: i64,
    /// Ratings of 1 or 2.
    pub negative: i64,
}

/// Aggregate statistics over every feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total: i64,
    /// Mean rating rounded to two decimals; 0 when there is no feedback.
    pub average_rating: f64,
    pub positive: i64,
    pub negative: i64,
}

impl From<RatingTally> for FeedbackStats {
    fn from(tally: RatingTally) -> Self {
        if tally.total == 0 {
            return Self {
                total: 0,
                average_rating: 0.0,
                positive: 0,
                negative: 0,
            };
        }

        let mean = tally.rating_sum as f64 / tally.total as f64;
        Self {
            total: tally.total,
            average_rating: (mean * 100.0).round() / 100.0,
            positive: tally.positive,
            negative: tally.negative,
        }
    }
}
