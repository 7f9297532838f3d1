//! Store Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence-layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failed
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Registration attempted with an email that already has an account
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    /// Password hashing or verification machinery failed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Generic IO error (CSV export, uploads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// User-facing notice text for failures surfaced in the UI.
    pub fn user_message(&self) -> &str {
        match self {
            StoreError::EmailTaken(_) => "Cet email existe déjà.",
            _ => "Une erreur est survenue. Merci de réessayer.",
        }
    }
}
