use chrono::{DateTime, Utc};

use crate::models::feedback::FeedbackEntry;

/// Prepended so spreadsheet tools detect UTF-8.
const BOM: char = '\u{FEFF}';
const HEADER: &str = "Name,Email,Rating,Message,Created At";

/// Renders feedback as CSV for spreadsheet download.
pub fn feedback_csv(entries: &[FeedbackEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADER.to_string());

    for entry in entries {
        let email = if entry.email.is_empty() { "N/A" } else { entry.email.as_str() };
        lines.push(format!(
            "{},{},{},{},{}",
            field(&entry.name),
            field(email),
            entry.rating,
            quoted(&entry.message),
            quoted(&format_timestamp(&entry.created_at)),
        ));
    }

    let mut csv = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum::<usize>() + 3);
    csv.push(BOM);
    csv.push_str(&lines.join("\n"));
    csv
}

/// File name for an export made at `now`.
pub fn export_filename(now: &DateTime<Utc>) -> String {
    format!("feedbacks_{}.csv", now.format("%Y-%m-%d"))
}

/// `DD-MM-YYYY HH:MM`, in UTC.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d-%m-%Y %H:%M").to_string()
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::AuthorSummary;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn entry(name: &str, email: &str, message: &str, rating: i16) -> FeedbackEntry {
        let user_id = Uuid::new_v4();
        FeedbackEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            rating,
            author: Some(AuthorSummary {
                id: user_id,
                name: "Account Holder".to_string(),
                email: "holder@example.com".to_string(),
            }),
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap(),
        }
    }

    #[test]
    fn empty_export_has_bom_and_header() {
        assert_eq!(feedback_csv(&[]), "\u{FEFF}Name,Email,Rating,Message,Created At");
    }

    #[test]
    fn rows_follow_column_order() {
        let csv = feedback_csv(&[
            entry("Ada", "ada@example.com", "Loved it", 5),
            entry("Bob", "", "Meh", 3),
        ]);
        let lines: Vec<&str> = csv.trim_start_matches(BOM).split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], r#"Ada,ada@example.com,5,"Loved it","07-03-2024 09:05""#);
        assert_eq!(lines[2], r#"Bob,N/A,3,"Meh","07-03-2024 09:05""#);
    }

    #[test]
    fn quotes_are_escaped() {
        let csv = feedback_csv(&[entry("Smith, Jane", "j@example.com", r#"She said "wow""#, 4)]);
        let row = csv.split('\n').nth(1).unwrap();
        assert_eq!(row, r#""Smith, Jane",j@example.com,4,"She said ""wow""","07-03-2024 09:05""#);
    }

    #[test]
    fn filename_carries_date() {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 23, 59, 0).unwrap();
        assert_eq!(export_filename(&now), "feedbacks_2025-12-01.csv");
    }
}
