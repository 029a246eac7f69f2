//! Shared helpers for router tests

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::Service;

use crate::state::AppState;

/// Router wrapper with request helpers used across the API tests
pub struct TestApp {
    app: Router,
}

/// App wired to a fresh in-memory database with an empty menu
pub async fn test_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    TestApp {
        app: crate::api::app(AppState::new(pool)),
    }
}

impl TestApp {
    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn send_json(
        &mut self,
        method: Method,
        uri: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&mut self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// POST /api/platos and return the new dish id
    pub async fn create_dish(&mut self, nombre: &str, precio: i64) -> i64 {
        let (status, body) = self
            .send_json(
                Method::POST,
                "/api/platos",
                json!({ "nombre": nombre, "precio": precio }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["datos"]["id"].as_i64().unwrap()
    }

    /// POST /api/categorias and return the new category id
    pub async fn create_category(&mut self, nombre: &str) -> i64 {
        let (status, body) = self
            .send_json(Method::POST, "/api/categorias", json!({ "nombre": nombre }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["datos"]["id"].as_i64().unwrap()
    }
}
