//! HTTP API
//!
//! Route map:
//! - `GET /` — welcome page with endpoint documentation
//! - `/api/platos` — menu routes (see [`dishes`])
//! - `/api/ordenes` — order routes (see [`orders`])
//! - `/api/categorias` — category routes (see [`categories`])
//! - anything else — JSON 404

mod categories;
mod dishes;
mod orders;
#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    routing::get,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .merge(dishes::router())
        .merge(orders::router())
        .merge(categories::router())
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> Json<serde_json::Value> {
    Json(json!({
        "mensaje": "🎉 ¡Bienvenido a mi API de Restaurante!",
        "version": "2.0.0",
        "descripcion": "Esta API permite gestionar platos usando una base de datos SQLite3",
        "endpoints": {
            "GET /api/platos": "Obtener todos los platos",
            "GET /api/platos/:id": "Obtener un plato expesifico",
            "POST /api/platos": "Crear un plato",
            "PUT /api/platos/:id": "Actualizar un plato",
            "DELETE /api/platos/:id": "Eliminar un plato",
        },
        "ejemplos": {
            "Crear platos(POST)": {
                "metodo": "POST",
                "url": "/api/platos",
                "body": {
                    "nombre": "Bandeja paisa",
                    "precio": 30000,
                    "descripcion": "Plato típico con carne, chorizo y fríjoles",
                },
            },
            "Actualizar platos (PUT)": {
                "metodo": "PUT",
                "url": "/api/platos/1",
                "body": { "nombre": "plato actualizado", "precio": 400000 },
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
