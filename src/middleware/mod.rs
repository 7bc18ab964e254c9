pub mod admin;
pub mod note_body;
pub mod note_id;

pub use admin::AdminPassword;
pub use note_body::NoteBody;
pub use note_id::NoteId;
