use std::env;
use std::fmt;

/// Infrastructure settings loaded from environment variables.
///
/// Every value has a default so a bare `cargo run` comes up with local
/// sqlite files and the standard guest email domain.
#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub audit_database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Domain part of generated guest account ids
    pub guest_email_domain: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

impl Settings {
    /// Load settings from the environment, falling back to defaults
    pub fn from_env() -> Result<Self, SettingsError> {
        let server_port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| SettingsError::InvalidValue {
                name: "PORT".to_string(),
                value: raw,
            })?,
            Err(_) => 3000,
        };

        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://directory.db?mode=rwc"),
            audit_database_url: env_or("AUDIT_DATABASE_URL", "sqlite://audit.db?mode=rwc"),
            server_host: env_or("HOST", "0.0.0.0"),
            server_port,
            guest_email_domain: env_or("GUEST_EMAIL_DOMAIN", "ogw3.com"),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("audit_database_url", &self.audit_database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("guest_email_domain", &self.guest_email_domain)
            .finish()
    }
}
