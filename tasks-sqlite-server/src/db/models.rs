//! Database models
//!
//! Wire names are the Spanish ones the API has always served; struct
//! fields and table columns stay English.

use serde::{Deserialize, Serialize};

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "completada")]
    pub done: bool,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "fecha_creacion")]
    pub created_at: i64,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: i64,
}

/// Create task payload
#[derive(Debug, Clone, Deserialize)]
pub struct TaskCreate {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
}

/// Update task payload
///
/// A JSON `null` deserializes to `None` just like an absent field, so
/// `{"titulo": null}` counts as "no fields sent" and is rejected with a
/// 400 rather than treated as a provided value.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskUpdate {
    pub titulo: Option<String>,
    pub descripcion: Option<String>,
    pub completada: Option<bool>,
}

impl TaskUpdate {
    /// True when no updatable field was sent
    pub fn is_empty(&self) -> bool {
        self.titulo.is_none() && self.descripcion.is_none() && self.completada.is_none()
    }
}
