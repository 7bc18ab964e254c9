use crate::db::models::{Note, NoteInput, now_timestamp};
use crate::db::sqlite::NotesStorage;
use crate::error::NotesError;
use crate::service::auth::DeleteAuthorizer;
use std::sync::Arc;
use tracing::{info, warn};

/// The five note operations. Every write returns the row as stored.
#[derive(Clone)]
pub struct NoteService {
    storage: NotesStorage,
    authorizer: Arc<dyn DeleteAuthorizer>,
}

impl NoteService {
    pub fn new(storage: NotesStorage, authorizer: Arc<dyn DeleteAuthorizer>) -> Self {
        Self {
            storage,
            authorizer,
        }
    }

    pub async fn list(&self) -> Result<Vec<Note>, NotesError> {
        self.storage.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Note, NotesError> {
        self.storage.get_by_id(id).await
    }

    pub async fn create(&self, input: NoteInput) -> Result<Note, NotesError> {
        input.validate()?;
        let now = now_timestamp();
        let note = self.storage.insert(input, &now).await?;
        info!(id = note.id, "note created");
        Ok(note)
    }

    pub async fn update(&self, id: i64, input: NoteInput) -> Result<Note, NotesError> {
        input.validate()?;
        let now = now_timestamp();
        let note = self.storage.update_by_id(id, input, &now).await?;
        info!(id = note.id, "note updated");
        Ok(note)
    }

    /// The secret is checked before storage is touched.
    pub async fn delete(&self, id: i64, admin_password: Option<&str>) -> Result<(), NotesError> {
        if !self.authorizer.authorize(admin_password) {
            warn!(id, "rejected delete with invalid admin password");
            return Err(NotesError::Unauthorized);
        }
        self.storage.delete_by_id(id).await?;
        info!(id, "note deleted");
        Ok(())
    }
}
