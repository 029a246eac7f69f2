//! HTTP API
//!
//! Route map:
//! - `GET /` — plain-text welcome
//! - `GET /api/info` — API metadata
//! - `/api/tareas` — task routes (see [`tasks`])

mod tasks;

use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/api/info", get(info))
        .merge(tasks::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> &'static str {
    "Bienvenido a mi api de informacion aqui podras aprender con nosotros"
}

async fn info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "nombre": "API de Tareas",
        "version": "1.0.0",
        "autor": "Stiven Macea",
    }))
}
