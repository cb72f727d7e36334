use std::fmt;

use crate::{
    dto::{CreateNoteRequest, FieldViolation, UpdateNoteRequest},
    models::{NewNote, NoteChanges},
};

pub const TITLE_MAX_CHARS: usize = 100;

/// Every field violation found in a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();

        write!(f, "invalid payload ({})", fields.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    let len = title.chars().count();
    if len == 0 {
        errors.push("title", "must contain at least 1 character");
    } else if len > TITLE_MAX_CHARS {
        errors.push(
            "title",
            format!("must contain at most {TITLE_MAX_CHARS} characters"),
        );
    }
}

fn check_content(content: &str, errors: &mut ValidationErrors) {
    if content.is_empty() {
        errors.push("content", "must contain at least 1 character");
    }
}

pub fn validate_create(request: CreateNoteRequest) -> Result<NewNote, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_title(&request.title, &mut errors);
    check_content(&request.content, &mut errors);

    errors.into_result(NewNote {
        title: request.title,
        content: request.content,
    })
}

pub fn validate_update(request: UpdateNoteRequest) -> Result<NoteChanges, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if let Some(title) = &request.title {
        check_title(title, &mut errors);
    }
    if let Some(content) = &request.content {
        check_content(content, &mut errors);
    }

    errors.into_result(NoteChanges {
        title: request.title,
        content: request.content,
    })
}
