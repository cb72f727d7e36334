use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use tokio_postgres::{NoTls, Row};

use super::{NoteStore, RepositoryError};
use crate::models::{NewNote, Note, NoteChanges};

const CREATE_NOTES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id BIGSERIAL PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub struct Repository {
    pool: Pool,
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Postgres takes signed bigints for OFFSET and LIMIT.
fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl Repository {
    pub fn new(database_dsn: &str, max_size: usize) -> Result<Self, RepositoryError> {
        let pg_config = database_dsn.parse::<tokio_postgres::Config>()?;

        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(max_size)
            .runtime(Runtime::Tokio1)
            .build()?;

        Ok(Self { pool })
    }

    /// Creates the notes table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_NOTES_TABLE).await?;

        tracing::info!("Notes table is ready");

        Ok(())
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        let row = tx
            .query_one(
                "INSERT INTO notes (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, created_at, updated_at",
                &[&note.title, &note.content],
            )
            .await?;

        tx.commit().await?;

        Ok(note_from_row(&row))
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        let client = self.pool.get().await?;

        let row = client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn get_all_notes(&self, skip: u64, limit: u64) -> Result<Vec<Note>, RepositoryError> {
        let client = self.pool.get().await?;

        let rows = client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes \
                 ORDER BY id OFFSET $1 LIMIT $2",
                &[&clamp(skip), &clamp(limit)],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        // updated_at must move strictly forward even if the clock has not
        let row = tx
            .query_opt(
                "UPDATE notes SET \
                     title = COALESCE($1, title), \
                     content = COALESCE($2, content), \
                     updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond') \
                 WHERE id = $3 \
                 RETURNING id, title, content, created_at, updated_at",
                &[&changes.title, &changes.content, &id],
            )
            .await?;

        tx.commit().await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut client = self.pool.get().await?;
        let tx = client.transaction().await?;

        let rows = tx.execute("DELETE FROM notes WHERE id = $1", &[&id]).await?;

        tx.commit().await?;

        Ok(rows == 1)
    }
}
