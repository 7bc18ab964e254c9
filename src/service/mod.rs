pub mod auth;
pub mod notes;

pub use auth::{DeleteAuthorizer, StaticSecretAuthorizer};
pub use notes::NoteService;
