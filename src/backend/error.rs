use thiserror::Error;

/// Errors returned by the backend client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{endpoint} responded with {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend returned a well-formed `{"error": ...}` body.
    #[error("backend error: {0}")]
    Api(String),
}

impl BackendError {
    /// Returns `true` for failures worth retrying: transport errors, non-2xx
    /// statuses and unparseable bodies. Application-level errors are final.
    pub fn is_transient(&self) -> bool {
        match self {
            BackendError::Http(_) | BackendError::Status { .. } | BackendError::Decode { .. } => {
                true
            }
            BackendError::Api(_) => false,
        }
    }
}
