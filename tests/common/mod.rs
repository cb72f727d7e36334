#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{TimeDelta, Utc};
use deadpool_postgres::PoolError;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use notes_api::{
    app,
    models::{NewNote, Note, NoteChanges},
    repository::{NoteStore, RepositoryError},
    service::NoteService,
};

pub const TRUSTED_ORIGIN: &str = "http://localhost:3000";

/// Applies the present fields to `note`. Returns whether anything was set.
fn apply_changes(changes: NoteChanges, note: &mut Note) -> bool {
    let mut changed = false;

    if let Some(title) = changes.title {
        note.title = title;
        changed = true;
    }
    if let Some(content) = changes.content {
        note.content = content;
        changed = true;
    }

    changed
}

#[derive(Default)]
struct State {
    next_id: i64,
    notes: BTreeMap<i64, Note>,
}

/// In-memory store; can be switched into a failing mode.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.notes.len()
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RepositoryError::Pool(PoolError::Closed))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create_note(&self, note: NewNote) -> Result<Note, RepositoryError> {
        self.check()?;
        let mut state = self.state.lock().await;

        state.next_id += 1;
        let now = Utc::now();
        let note = Note {
            id: state.next_id,
            title: note.title,
            content: note.content,
            created_at: now,
            updated_at: now,
        };
        state.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        self.check()?;
        Ok(self.state.lock().await.notes.get(&id).cloned())
    }

    async fn get_all_notes(&self, skip: u64, limit: u64) -> Result<Vec<Note>, RepositoryError> {
        self.check()?;
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(self
            .state
            .lock()
            .await
            .notes
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_note(
        &self,
        id: i64,
        changes: NoteChanges,
    ) -> Result<Option<Note>, RepositoryError> {
        self.check()?;
        let mut state = self.state.lock().await;

        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(None);
        };
        if apply_changes(changes, note) {
            note.updated_at = Utc::now().max(note.updated_at + TimeDelta::microseconds(1));
        }

        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, RepositoryError> {
        self.check()?;
        Ok(self.state.lock().await.notes.remove(&id).is_some())
    }
}

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(NoteService::new(store.clone()));
    let cors = app::cors_layer(TRUSTED_ORIGIN).unwrap();

    (app::router(service, cors), store)
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn create(router: &Router, title: &str, content: &str) -> Value {
    let (status, body) = send(
        router,
        json_request(
            "POST",
            "/notes/",
            &serde_json::json!({ "title": title, "content": content }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    body
}
