use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
};

use crate::NotesError;
use crate::db::models::NoteInput;

/// JSON note body. A missing `Content-Type` is read as JSON; any other
/// non-JSON media type is refused. Well-formed JSON with missing or
/// mistyped fields is a validation failure.
pub struct NoteBody(pub NoteInput);

impl<S> FromRequest<S> for NoteBody
where
    S: Send + Sync,
{
    type Rejection = NotesError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !accepts_json(req.headers()) {
            return Err(NotesError::UnsupportedMediaType);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => NotesError::PayloadTooLarge,
                _ => NotesError::BadRequest(rejection.body_text()),
            })?;

        match Json::<NoteInput>::from_bytes(&bytes) {
            Ok(Json(input)) => Ok(NoteBody(input)),
            Err(JsonRejection::JsonDataError(e)) => Err(NotesError::Validation(e.body_text())),
            Err(rejection) => Err(NotesError::BadRequest(rejection.body_text())),
        }
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}
