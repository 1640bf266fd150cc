use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by hooks and transports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse url {url}: {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The target path already carried a query string. Query parameters are
    /// only accepted through the dedicated argument so they are never
    /// silently dropped.
    #[error("query parameters must not be set on the path, found `{query}` in {url}")]
    QueryConflict { url: String, query: String },

    #[error("failed to create http request: {0}")]
    Construction(#[from] http::Error),

    #[error("invalid header {name}: {source}")]
    InvalidHeader {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to execute pre-request hook #{position}: {source}")]
    Hook {
        position: usize,
        #[source]
        source: BoxError,
    },

    #[error("failed to perform http request: {0}")]
    Transport(#[source] BoxError),

    #[error("failed to build transport: {0}")]
    TransportSetup(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to unmarshal response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("response body has already been consumed")]
    BodyConsumed,

    #[error("transport does not support proxy configuration")]
    IncapableTransport,

    #[error("failed to configure proxy: {0}")]
    Proxy(#[source] BoxError),

    #[error("failed to read settings file {path:?}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    SettingsParse(#[source] serde_json::Error),
}

/// Reasons a [`Context`](crate::Context) stops a request from being sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context cancelled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}
