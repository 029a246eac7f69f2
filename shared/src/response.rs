//! API response envelope
//!
//! Every JSON response from the SQLite-backed services uses the same
//! envelope:
//!
//! ```json
//! {
//!   "success": true,
//!   "mensaje": "Tarea creada exitosamente",
//!   "cantidad": 3,
//!   "datos": { ... }
//! }
//! ```
//!
//! `mensaje`, `cantidad` and `datos` are omitted when not set; list
//! endpoints carry `cantidad`, detail endpoints usually carry `mensaje`.

use serde::{Deserialize, Serialize};

/// Response envelope with the Spanish wire field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datos: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying only `datos`.
    pub fn ok(datos: T) -> Self {
        Self {
            success: true,
            mensaje: None,
            cantidad: None,
            datos: Some(datos),
        }
    }

    /// Successful response with a human-readable `mensaje`.
    pub fn ok_with_message(datos: T, mensaje: impl Into<String>) -> Self {
        Self {
            success: true,
            mensaje: Some(mensaje.into()),
            cantidad: None,
            datos: Some(datos),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List response: `cantidad` mirrors the number of rows in `datos`.
    pub fn list(datos: Vec<T>) -> Self {
        Self {
            success: true,
            mensaje: None,
            cantidad: Some(datos.len()),
            datos: Some(datos),
        }
    }
}

impl ApiResponse<()> {
    /// Failure envelope: `{ "success": false, "mensaje": ... }`.
    pub fn error(mensaje: impl Into<String>) -> Self {
        Self {
            success: false,
            mensaje: Some(mensaje.into()),
            cantidad: None,
            datos: None,
        }
    }
}
