use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::{AppError, Result};
use crate::models::feedback::NewFeedback;

/// The request payload for submitting feedback.
///
/// Fields are optional so that missing or `null` values surface as
/// validation errors rather than body rejections.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub rating: Option<RatingInput>,
}

/// A rating as it arrived on the wire, before range checks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Integer(i64),
    Float(f64),
    Other(IgnoredAny),
}

const RATING_ERROR: &str = "Rating must be between 1 and 5";

/// Checks a submission and produces the record to persist.
pub fn validate_submission(submission: FeedbackSubmission) -> Result<NewFeedback> {
    let name = required_text(submission.name.as_deref(), "Name is required")?;
    let message = required_text(submission.message.as_deref(), "Message is required")?;
    let rating = parse_rating(submission.rating.as_ref())?;
    let email = submission
        .email
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    Ok(NewFeedback {
        name,
        email,
        message,
        rating,
    })
}

fn required_text(value: Option<&str>, error: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(AppError::Validation(error.to_string())),
    }
}

/// Accepts whole numbers from 1 to 5, including integral floats such as `4.0`.
fn parse_rating(value: Option<&RatingInput>) -> Result<i16> {
    let rating = match value {
        Some(RatingInput::Integer(n)) => Some(*n),
        Some(RatingInput::Float(f)) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
        _ => None,
    };

    match rating {
        Some(n @ 1..=5) => Ok(n as i16),
        _ => Err(AppError::Validation(RATING_ERROR.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(json: &str) -> FeedbackSubmission {
        serde_json::from_str(json).unwrap()
    }

    fn rating_error(json: &str) -> bool {
        matches!(
            validate_submission(submission(json)),
            Err(AppError::Validation(ref msg)) if msg == RATING_ERROR
        )
    }

    #[test]
    fn accepts_every_rating_in_range() {
        for rating in 1..=5 {
            let json = format!(r#"{{"name":"Ada","message":"Great","rating":{rating}}}"#);
            let new = validate_submission(submission(&json)).unwrap();
            assert_eq!(new.rating, rating as i16);
        }
    }

    #[test]
    fn rejects_out_of_range_and_non_integer_ratings() {
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":0}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":6}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":-3}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":2.5}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":"abc"}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":"4"}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":true}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi","rating":null}"#));
        assert!(rating_error(r#"{"name":"Ada","message":"Hi"}"#));
    }

    #[test]
    fn integral_float_is_accepted() {
        let new = validate_submission(submission(r#"{"name":"Ada","message":"Hi","rating":4.0}"#)).unwrap();
        assert_eq!(new.rating, 4);
    }

    #[test]
    fn trims_text_and_defaults_email() {
        let new = validate_submission(submission(
            r#"{"name":"  Ada ","message":"\n Works well \t","rating":5}"#,
        ))
        .unwrap();
        assert_eq!(new.name, "Ada");
        assert_eq!(new.message, "Works well");
        assert_eq!(new.email, "");

        let new = validate_submission(submission(
            r#"{"name":"Ada","email":" ada@example.com ","message":"ok","rating":3}"#,
        ))
        .unwrap();
        assert_eq!(new.email, "ada@example.com");
    }

    #[test]
    fn blank_name_or_message_is_rejected_first() {
        let err = validate_submission(submission(r#"{"name":"   ","message":"","rating":9}"#)).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Name is required"));

        let err = validate_submission(submission(r#"{"name":"Ada","message":"  ","rating":9}"#)).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Message is required"));
    }
}
