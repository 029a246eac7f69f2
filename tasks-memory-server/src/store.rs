//! In-memory task store
//!
//! Tasks live in a `Vec` behind a `tokio::sync::RwLock`, shared between
//! handlers through cheap clones of [`TaskStore`]. Ids are assigned
//! sequentially from the last stored task.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

/// A task record
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "completada")]
    pub done: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// Shared handle to the task list
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    inner: Arc<RwLock<Vec<Task>>>,
}

impl TaskStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the sample tasks served on first boot
    pub fn seeded() -> Self {
        let now = Utc::now();
        let seed = |id: i64, title: &str, done: bool| Task {
            id,
            title: title.to_string(),
            done,
            created_at: now,
            updated_at: now,
        };
        Self {
            inner: Arc::new(RwLock::new(vec![
                seed(1, "Aprender Node.js", true),
                seed(2, "Hacer ejercicio", false),
                seed(3, "Leer documentación", false),
            ])),
        }
    }

    /// All tasks, optionally filtered by completion state
    pub async fn list(&self, done: Option<bool>) -> Vec<Task> {
        let tasks = self.inner.read().await;
        match done {
            Some(done) => tasks.iter().filter(|t| t.done == done).cloned().collect(),
            None => tasks.clone(),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Task> {
        self.inner.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Case-insensitive substring search over titles
    pub async fn search(&self, query: &str) -> Vec<Task> {
        let query = query.to_lowercase();
        self.inner
            .read()
            .await
            .iter()
            .filter(|t| t.title.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Append a new pending task and return it
    pub async fn create(&self, title: String) -> Task {
        let mut tasks = self.inner.write().await;
        let id = tasks.last().map(|t| t.id + 1).unwrap_or(1);
        let now = Utc::now();
        let task = Task {
            id,
            title,
            done: false,
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        task
    }

    /// Apply the provided fields to a task; `None` keeps the stored value.
    ///
    /// Returns the updated task, or `None` when the id is unknown.
    /// `updated_at` is refreshed on every successful call.
    pub async fn update(
        &self,
        id: i64,
        title: Option<String>,
        done: Option<bool>,
    ) -> Option<Task> {
        let mut tasks = self.inner.write().await;
        let task = tasks.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(done) = done {
            task.done = done;
        }
        task.updated_at = Utc::now();
        Some(task.clone())
    }
}
