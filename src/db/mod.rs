//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: the `Note` row and client input, plus validation
//! - `schema.rs`: the desired table layout as data (SQLite-first)
//! - `sqlite.rs`: pooled storage and schema reconciliation

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Note, NoteInput};
pub use schema::NOTES_TABLE;
pub use sqlite::{NotesStorage, SqlitePool};

use crate::error::NotesError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

/// Prepare the store location, connect, and reconcile the schema.
pub async fn open(path: &Path) -> Result<NotesStorage, NotesError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let connect_opts = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

    let storage = NotesStorage::new(pool);
    storage.ensure_schema().await?;
    info!(path = %path.display(), "notes store ready");
    Ok(storage)
}
