use crate::error::NotesError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;

/// Fallback admin secret used when `NOTES_ADMIN_PASSWORD` is not set.
/// Refused at startup when `NOTES_PRODUCTION=true`.
pub const DEFAULT_ADMIN_PASSWORD: &str = "Nexus457*";

pub const DEFAULT_DATABASE_PATH: &str = "/data/notes.db";

/// Request bodies carry base64 images inline, so the cap is generous.
pub const DEFAULT_MAX_BODY_BYTES: usize = 30 * 1024 * 1024;

/// Process-wide configuration, loaded on first access.
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().unwrap_or_else(|e| {
        eprintln!("invalid configuration: {e}");
        std::process::exit(2);
    })
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file. Its parent directory is created on startup.
    pub database_path: PathBuf,
    pub admin_password: String,
    /// Origins allowed to make cross-origin requests (all methods and headers).
    pub cors_origins: Vec<String>,
    pub listen_addr: String,
    pub loglevel: String,
    pub production: bool,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            cors_origins: vec![
                "https://sarooshashraf.com".to_string(),
                "http://localhost".to_string(),
                "http://localhost:3000".to_string(),
            ],
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            production: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Defaults, then `SQLITE_PATH`, then `NOTES_*` variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(
                Env::raw()
                    .only(&["sqlite_path"])
                    .map(|_| "database_path".into()),
            )
            .merge(Env::prefixed("NOTES_"))
    }

    pub fn from_env() -> Result<Self, NotesError> {
        Ok(Self::figment().extract()?)
    }

    /// Whether the admin secret is still the shipped fallback.
    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }

    /// Refuse to run a production deployment guarded by the fallback secret.
    pub fn ensure_secure(&self) -> Result<(), NotesError> {
        if self.production && self.uses_default_admin_password() {
            return Err(NotesError::InsecureConfig(
                "NOTES_ADMIN_PASSWORD must be set when NOTES_PRODUCTION=true".to_string(),
            ));
        }
        if self.admin_password.is_empty() {
            return Err(NotesError::InsecureConfig(
                "NOTES_ADMIN_PASSWORD must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
