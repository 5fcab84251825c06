use thiserror::Error;

/// Errors returned by the catalog API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// HTTP 422 from the API, carrying its `message` when one was sent.
    #[error("rejected by the catalog API: {message}")]
    Validation { message: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A file referenced by an upload field could not be read.
    #[error("failed to read upload {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
