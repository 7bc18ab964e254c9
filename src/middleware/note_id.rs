use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::NotesError;

/// `{id}` path segment; anything that is not an integer is a validation failure.
#[derive(Debug, Clone, Copy)]
pub struct NoteId(pub i64);

impl<S> FromRequestParts<S> for NoteId
where
    S: Send + Sync,
{
    type Rejection = NotesError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(NoteId(id)),
            Err(rejection) => Err(NotesError::Validation(rejection.body_text())),
        }
    }
}
