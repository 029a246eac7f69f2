//! Task API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::db::models::{Task, TaskCreate, TaskUpdate};
use crate::db::repository::task as task_repo;
use crate::state::AppState;
use shared::extract::Path;
use shared::response::ApiResponse;
use shared::validation::title_length_ok;
use shared::{AppError, AppResult};

/// GET /api/tareas - all tasks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Task>>>> {
    let tasks = task_repo::find_all(&state.pool).await?;
    Ok(Json(ApiResponse::list(tasks)))
}

/// GET /api/tareas/:id - single task
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Task>>> {
    let task = task_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No se encontró ninguna tarea con el ID {id}")))?;
    Ok(Json(ApiResponse::ok(task)))
}

/// POST /api/tareas - create a pending task
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TaskCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let titulo = payload
        .titulo
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("El título es obligatorio"))?;
    if !title_length_ok(&titulo) {
        return Err(AppError::validation(
            "El título debe tener entre 3 y 100 caracteres",
        ));
    }
    let descripcion = payload.descripcion.unwrap_or_default();

    let task = task_repo::create(&state.pool, &titulo, &descripcion).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(task, "Tarea creada exitosamente")),
    ))
}

/// PUT /api/tareas/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskUpdate>,
) -> AppResult<Json<ApiResponse<Task>>> {
    // Unknown id wins over an empty payload
    task_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No se encontró ninguna tarea con el ID {id}")))?;

    if payload.is_empty() {
        return Err(AppError::validation("No se enviaron campos para actualizar"));
    }
    if let Some(titulo) = &payload.titulo {
        if !title_length_ok(titulo) {
            return Err(AppError::validation(
                "El título debe tener entre 3 y 100 caracteres",
            ));
        }
    }

    let task = task_repo::update(&state.pool, id, payload).await?;
    Ok(Json(ApiResponse::ok_with_message(
        task,
        "Tarea actualizada exitosamente",
    )))
}

/// DELETE /api/tareas/:id - delete and return the removed task
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Task>>> {
    let task = task_repo::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        task,
        "Tarea eliminada exitosamente",
    )))
}
