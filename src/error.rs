//! Error types for VaporZone

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered 401 to an authenticated request
    #[error("Sesión expirada o no autorizada")]
    Unauthorized,

    /// The token endpoint rejected the username/password pair
    #[error("Usuario o contraseña incorrectos")]
    InvalidCredentials,

    /// A gated screen was requested without a session
    #[error("Debes iniciar sesión para acceder a {0}")]
    NotAuthenticated(String),

    /// Client-side form validation; no request was sent
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Transport failure, timeout or an unexpected status code
    #[error("{0}")]
    RequestFailed(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether re-submitting the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RequestFailed(_))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::RequestFailed("Tiempo de espera agotado".to_string())
        } else if err.is_connect() {
            Error::RequestFailed("Error de conexión con el servidor".to_string())
        } else {
            Error::RequestFailed(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
