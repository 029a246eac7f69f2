//! HTTP API
//!
//! Route map:
//! - `GET /` — welcome page with endpoint documentation
//! - `/api/tareas` — task routes (see [`tasks`])
//! - anything else — JSON 404

mod tasks;

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    routing::get,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .merge(tasks::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> Json<serde_json::Value> {
    Json(json!({
        "mensaje": "🎉 ¡Bienvenido a mi API de Tareas con SQLite3!",
        "version": "2.0.0",
        "descripcion": "Esta API permite gestionar tareas usando una base de datos SQLite3",
        "endpoints": {
            "GET /api/tareas": "Obtener todas las tareas",
            "GET /api/tareas/:id": "Obtener una tarea específica",
            "POST /api/tareas": "Crear una nueva tarea",
            "PUT /api/tareas/:id": "Actualizar una tarea",
            "DELETE /api/tareas/:id": "Eliminar una tarea",
        },
        "ejemplos": {
            "Crear tarea": {
                "metodo": "POST",
                "url": "/api/tareas",
                "body": { "titulo": "Mi nueva tarea", "descripcion": "Descripción de la tarea" },
            },
            "Actualizar tarea": {
                "metodo": "PUT",
                "url": "/api/tareas/1",
                "body": { "completada": true },
            },
        },
    }))
}

async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "mensaje": "Ruta no encontrada",
            "ruta_solicitada": uri.to_string(),
            "metodo": method.to_string(),
        })),
    )
}
