use thiserror::Error;

/// Infrastructure faults. Business rule violations are never errors; they
/// travel as [`Validation`](crate::validator::Validation) and
/// [`Outcome`](crate::service::Outcome) values.
#[derive(Debug, Error)]
pub enum EduError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Unexpected state: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
