//! Server Configuration
//!
//! Everything comes from the environment, with workable defaults for
//! local development.

use std::path::PathBuf;

/// Runtime configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on
    pub bind_addr: String,

    /// SQLite database URL
    pub database_url: String,

    /// Directory where payment-proof uploads are stored
    pub upload_dir: PathBuf,

    /// File the contact form appends to
    pub contact_log: PathBuf,

    /// Bootstrap admin credentials
    pub admin_email: String,
    pub admin_password: String,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set - using the default development password");
            "admin123".into()
        });

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://abonflow.db?mode=rwc".into()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".into())
                .into(),
            contact_log: std::env::var("CONTACT_LOG")
                .unwrap_or_else(|_| "contact_messages.txt".into())
                .into(),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@abonflow.fr".into()),
            admin_password,
        }
    }
}
