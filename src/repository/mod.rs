mod postgres;

pub use postgres::Repository;

use async_trait::async_trait;

use crate::models::{NewNote, Note, NoteChanges};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Failed to build connection pool: {0}")]
    PoolBuild(#[from] deadpool_postgres::BuildError),

    #[error("Failed to acquire database connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}

/// Persistent storage for notes.
///
/// Every call is atomic: it is either fully applied or leaves the store untouched.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError>;

    /// Notes in ascending id order, skipping `skip` and returning at most `limit`.
    async fn get_all_notes(&self, skip: u64, limit: u64) -> Result<Vec<Note>, RepositoryError>;

    /// Returns `None` when no note has the given id.
    async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError>;

    /// Returns `false` when no note has the given id.
    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError>;
}
