//! Error types for the driver.

/// Errors that can occur while signing or sending requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Consumer key or secret is unusable for signing.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// Driver configuration is incomplete or malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The server could not be reached or the connection failed midway.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The API answered with a non-success status.
    #[error("API error on {path}: {status} - {body}")]
    Api {
        status: u16,
        body: String,
        path: String,
    },

    /// The API answered with a success status but an empty body.
    #[error("no data received from {path}")]
    NoData { path: String },

    /// ID-remap redirects kept coming past the configured limit.
    #[error("too many redirects for {path} after {hops} hops")]
    TooManyRedirects { path: String, hops: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
