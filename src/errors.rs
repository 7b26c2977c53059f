use thiserror::Error;

/// All errors that can occur when using the Dolby.io Media client.
#[derive(Error, Debug)]
pub enum DolbyMediaError {
    /// No API key was available, or the key cannot be sent as a header value.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// A non-2xx response from the service. `body` is the raw response text,
    /// which is where the Media APIs put their diagnostics.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// A transport-level HTTP error from reqwest, including response-decode
    /// failures. Never retried.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error reading an upload source or writing a download destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Polling for job completion exceeded the configured timeout.
    #[error("job still not finished after {0:?}")]
    Timeout(std::time::Duration),

    /// The job reached the terminal `Failed` status.
    #[error("job failed: {0}")]
    JobFailed(String),

    /// A 2xx response was missing a field the operation needs.
    #[error("unexpected response from the service: {0}")]
    UnexpectedResponse(String),
}

/// A convenience alias for `Result<T, DolbyMediaError>`.
pub type Result<T> = std::result::Result<T, DolbyMediaError>;
