use thiserror::Error;

/// Reasons a work list could not be obtained. Any of them ends the run before
/// a single claim or network test is sent.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("work list request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("work list endpoint answered with status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("work list body is not a valid list of work items: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("work list is empty")]
    Empty,
}

impl FetchError {
    /// Message exposed to the caller; the detailed cause is only logged.
    pub const PUBLIC_MESSAGE: &str = "Failed to fetch JSON data.";
}
