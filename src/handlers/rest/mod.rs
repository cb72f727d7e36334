use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{
        CreateNoteRequest, ErrorResponse, FieldViolation, ListNotesQuery, NoteResponse,
        UpdateNoteRequest, ValidationErrorResponse,
    },
    service::{NoteService, ServiceError},
};

pub const NOT_FOUND_MESSAGE: &str = "Note not found";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        description = "A simple notes taking application",
        version = "1.0.0"
    ),
    paths(create_note, get_all_notes, get_one_note, update_note, delete_note),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        ErrorResponse,
        FieldViolation,
        ValidationErrorResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn detail(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            detail: message.to_string(),
        }),
    )
        .into_response()
}

fn not_found() -> Response {
    detail(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

/// Maps a service failure to a response. Storage details are logged, never returned.
fn failure(error: ServiceError, action: &str, message: &str) -> Response {
    match error {
        ServiceError::Validation(errors) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ValidationErrorResponse {
                detail: errors.into_violations(),
            }),
        )
            .into_response(),
        ServiceError::Storage(e) => {
            tracing::error!("failed to {action}: {e}");
            detail(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }
}

#[utoipa::path(
    post,
    path = "/notes/",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 422, description = "Invalid note", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    summary = "Create a new note",
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    Json(payload): Json<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => failure(
            e,
            "create note entry",
            "An error occurred while creating the note.",
        ),
    }
}

#[utoipa::path(
    get,
    path = "/notes/",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Page of notes in id order", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    summary = "Get all notes",
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(service): State<Arc<NoteService>>,
    Query(query): Query<ListNotesQuery>,
) -> Response {
    match service.get_all_notes(query).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => failure(e, "get note entries", "Failed to get notes"),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    summary = "Get a specific note",
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_one_note(id).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => not_found(),
        Err(e) => failure(e, "get note entry", "Failed to get note"),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 422, description = "Invalid note", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    summary = "Update a note",
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Response {
    match service.update_note(id, payload).await {
        Ok(Some(note)) => (StatusCode::OK, Json(note)).into_response(),
        Ok(None) => not_found(),
        Err(e) => failure(e, "update note entry", "Failed to update note"),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted successfully"),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    summary = "Delete a note",
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    match service.delete_note(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => failure(e, "delete note entry", "Failed to delete note"),
    }
}
