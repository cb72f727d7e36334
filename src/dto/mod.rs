use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};

use std::num::IntErrorKind;

use crate::models::Note;

pub const DEFAULT_LIMIT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    #[schema(example = "My Note")]
    pub title: String,
    /// Note content
    #[schema(example = "This is my note content")]
    pub content: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Time of the last modification
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title, 1 to 100 characters
    #[schema(example = "My Note", min_length = 1, max_length = 100)]
    pub title: String,
    /// Note content, at least 1 character
    #[schema(example = "This is my note content", min_length = 1)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New title; left unchanged when absent
    #[serde(default)]
    #[schema(example = "Updated Note", min_length = 1, max_length = 100)]
    pub title: Option<String>,
    /// New content; left unchanged when absent
    #[serde(default)]
    #[schema(example = "Updated content", min_length = 1)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// Number of notes to skip
    #[serde(default, deserialize_with = "saturating_u64")]
    #[param(default = 0, minimum = 0)]
    pub skip: u64,
    /// Maximum number of notes to return
    #[serde(default = "default_limit", deserialize_with = "saturating_u64")]
    #[param(default = 100, minimum = 0)]
    pub limit: u64,
}

const fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

/// Query values past `u64::MAX` become `u64::MAX`; anything else that is
/// not a non-negative integer is rejected.
fn saturating_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    match raw.parse::<u64>() {
        Ok(value) => Ok(value),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        Err(e) => Err(de::Error::custom(format!("invalid value '{raw}': {e}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable error message
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Name of the offending field
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub detail: Vec<FieldViolation>,
}
