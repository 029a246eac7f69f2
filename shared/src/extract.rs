//! Request extractors
//!
//! [`Path`] wraps `axum::extract::Path` so that a malformed path id is
//! rejected with the standard envelope body instead of axum's plain-text
//! response.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Typed path extractor whose rejection carries the error envelope.
///
/// A non-numeric id such as `GET /api/platos/abc` becomes a 400 with
/// `mensaje: "ID inválido"`.
#[derive(Debug)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(_) => Err(AppError::validation("ID inválido")),
        }
    }
}
