use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::Appointment;
use crate::state::AppState;

// GET /api/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let book = state
        .appointments
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(book.clone()))
}

// GET /api/appointments/:id
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    let book = state
        .appointments
        .lock()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    book.iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("appointment {id}")))
}
