use chrono::{DateTime, Utc};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Note(id={}, title='{}')>", self.id, self.title)
    }
}

/// Fields of a note that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Partial modification of a stored note. `None` leaves the column as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteChanges {
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}
