use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue, routing::get};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::sqlite::NotesStorage;
use crate::handlers::notes::{
    api_info, create_note, delete_note, get_note, health, list_notes, method_not_allowed,
    route_not_found, update_note,
};
use crate::service::{NoteService, StaticSecretAuthorizer};

#[derive(Clone)]
pub struct NotesState {
    pub notes: NoteService,
}

impl NotesState {
    pub fn new(notes: NoteService) -> Self {
        Self { notes }
    }

    /// State guarded by the configured static admin secret.
    pub fn from_config(storage: NotesStorage, cfg: &Config) -> Self {
        let authorizer = Arc::new(StaticSecretAuthorizer::new(cfg.admin_password.clone()));
        Self::new(NoteService::new(storage, authorizer))
    }
}

pub fn notes_router(state: NotesState, cfg: &Config) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health))
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(cfg.max_body_bytes))
        .layer(cors_layer(&cfg.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Fixed origin allow-list; any method and header from those origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    info!(count = allowed.len(), "CORS origins configured");

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
