use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Local input was rejected before any request was sent.
    #[error("{0}")]
    ValidationError(String),
    /// The API answered with a non-success status.
    #[error("API returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    RemoteError { status: u16, message: Option<String> },
    #[error("Request failed: {0}")]
    TransportError(String),
    #[error("Invalid response: {0}")]
    DecodeError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorefrontError {
    /// Text shown to the user for this failure.
    ///
    /// Validation messages and server-provided messages are shown as-is;
    /// everything else collapses into `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::ValidationError(message) => message.clone(),
            Self::RemoteError {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for StorefrontError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::DecodeError(err.to_string())
        } else {
            Self::TransportError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
