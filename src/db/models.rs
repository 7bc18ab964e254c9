use crate::error::NotesError;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const TITLE_MAX_CHARS: usize = 200;

/// Timestamp layout stored in `created_at` / `updated_at`: ISO-8601, UTC,
/// microsecond precision, no timezone suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A stored note, exactly as read back from the `notes` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Client-supplied fields for create and update.
/// Update rewrites all of them; an omitted `image_data` clears the column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    /// Data URL or base64 content
    #[serde(default)]
    pub image_data: Option<String>,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_data: None,
        }
    }

    pub fn with_image(mut self, image_data: impl Into<String>) -> Self {
        self.image_data = Some(image_data.into());
        self
    }

    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), NotesError> {
        let title_len = self.title.chars().count();
        if title_len == 0 {
            return Err(NotesError::Validation(
                "title must be at least 1 character".to_string(),
            ));
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(NotesError::Validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if self.content.is_empty() {
            return Err(NotesError::Validation(
                "content must be at least 1 character".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now().naive_utc())
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_bounds() {
        assert!(NoteInput::new("", "body").validate().is_err());
        assert!(NoteInput::new("a", "body").validate().is_ok());
        assert!(NoteInput::new("a".repeat(200), "body").validate().is_ok());
        assert!(matches!(
            NoteInput::new("a".repeat(201), "body").validate(),
            Err(NotesError::Validation(_))
        ));
    }

    #[test]
    fn title_length_counts_characters() {
        // 200 two-byte characters is still within bounds.
        assert!(NoteInput::new("é".repeat(200), "body").validate().is_ok());
        assert!(NoteInput::new("é".repeat(201), "body").validate().is_err());
    }

    #[test]
    fn content_must_not_be_empty() {
        assert!(NoteInput::new("t", "").validate().is_err());
        assert!(NoteInput::new("t", "c").validate().is_ok());
    }

    #[test]
    fn image_data_defaults_to_none() {
        let input: NoteInput = serde_json::from_str(r#"{"title":"t","content":"c"}"#).unwrap();
        assert_eq!(input.image_data, None);
    }

    #[test]
    fn timestamp_has_no_timezone_suffix() {
        let ts = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(7, 5, 1, 42)
            .unwrap();
        assert_eq!(format_timestamp(ts), "2024-03-09T07:05:01.000042");
        let now = now_timestamp();
        assert!(!now.ends_with('Z'));
        assert!(!now.contains('+'));
    }
}
