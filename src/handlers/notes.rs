use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};

use crate::db::models::Note;
use crate::middleware::{AdminPassword, NoteBody, NoteId};
use crate::{NotesError, router::NotesState};

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET / -> service name and version.
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "Notes API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_notes(State(state): State<NotesState>) -> Result<Json<Vec<Note>>, NotesError> {
    Ok(Json(state.notes.list().await?))
}

pub async fn get_note(
    State(state): State<NotesState>,
    NoteId(id): NoteId,
) -> Result<Json<Note>, NotesError> {
    Ok(Json(state.notes.get(id).await?))
}

/// POST /notes -> 201 with the stored note.
pub async fn create_note(
    State(state): State<NotesState>,
    NoteBody(input): NoteBody,
) -> Result<impl IntoResponse, NotesError> {
    let note = state.notes.create(input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<NotesState>,
    NoteId(id): NoteId,
    NoteBody(input): NoteBody,
) -> Result<Json<Note>, NotesError> {
    Ok(Json(state.notes.update(id, input).await?))
}

/// DELETE /notes/{id} -> 204; requires `X-Admin-Password`.
pub async fn delete_note(
    State(state): State<NotesState>,
    NoteId(id): NoteId,
    password: AdminPassword,
) -> Result<StatusCode, NotesError> {
    state.notes.delete(id, password.as_deref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unmatched paths get the same error body as every other failure.
pub async fn route_not_found() -> NotesError {
    NotesError::RouteNotFound
}

pub async fn method_not_allowed() -> NotesError {
    NotesError::MethodNotAllowed
}
