// Error taxonomy for the balance pipeline

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed upstream payload: {0}")]
    Malformed(String),
    #[error("Upstream error {code}: {message}")]
    Upstream { code: i64, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Resolution(String),
    #[error("Failed to fetch balances: {0}")]
    Fetch(#[from] FetchError),
}

impl BalanceError {
    /// Client-side mistakes, detected before anything goes upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, BalanceError::Validation(_) | BalanceError::Resolution(_))
    }
}
