use crate::models::ChatMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Failure of a completion call
///
/// Callers treat every variant the same way; the split only serves logging.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Completion API error: {status} - {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Text-completion oracle
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send the conversation and return the assistant's reply text
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, OracleError>;
}
