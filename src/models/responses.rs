use serde::{Deserialize, Serialize};
use crate::models::domain::Experience;

/// Success envelope for the suggestions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub status: String,
    pub user_id: String,
    pub count: usize,
    pub recommendations: Vec<Experience>,
}

impl SuggestionsResponse {
    pub fn success(user_id: impl Into<String>, recommendations: Vec<Experience>) -> Self {
        Self {
            status: "success".to_string(),
            user_id: user_id.into(),
            count: recommendations.len(),
            recommendations,
        }
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            user_id,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Root endpoint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
    pub endpoints: serde_json::Value,
}
