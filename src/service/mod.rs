use crate::{
    dto::{CreateNoteRequest, ListNotesQuery, NoteResponse, UpdateNoteRequest},
    repository::{NoteStore, RepositoryError},
    validation::{self, ValidationErrors},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let new_note = validation::validate_create(request)?;
        let note = self.store.create_note(new_note).await?;

        tracing::debug!("created {note}");

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, ServiceError> {
        let changes = validation::validate_update(request)?;

        // Nothing to write, hand back the note as stored
        if changes.is_empty() {
            return self.get_one_note(id).await;
        }

        let note = self.store.update_note(id, changes).await?;

        Ok(note.map(Into::into))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.store.delete_note(id).await?)
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, ServiceError> {
        let note = self.store.get_one_note(id).await?;

        Ok(note.map(Into::into))
    }

    pub async fn get_all_notes(
        &self,
        query: ListNotesQuery,
    ) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.store.get_all_notes(query.skip, query.limit).await?;

        Ok(notes.into_iter().map(Into::into).collect())
    }
}
