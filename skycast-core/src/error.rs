use thiserror::Error;

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the API layer and the snapshot normalizer.
///
/// HTTP failures keep the status code, the request path and a truncated copy of
/// the response body so callers can tell a quota error from a bad request
/// instead of seeing a bare status number.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider answered with a non-2xx status.
    #[error("request to {path} failed with status {status}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// The provider answered 2xx but the body was not the expected JSON.
    #[error("unexpected payload from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// Forecast hour offset points past the end of the hourly series.
    #[error("forecast hour {requested} is out of range (only {available} hourly entries)")]
    HourOutOfRange { requested: usize, available: usize },

    /// Provider-reported timezone offset cannot be represented (|offset| >= 24h).
    #[error("unrepresentable timezone offset: {0} seconds")]
    BadTimezoneOffset(i64),

    #[error("unrepresentable observation timestamp: {0}")]
    BadTimestamp(i64),

    #[error("coordinate out of range: lat {latitude}, lon {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error(
        "no API key configured for the {0} provider.\n\
         Hint: run `skycast configure` and enter your API keys."
    )]
    MissingApiKey(&'static str),
}
