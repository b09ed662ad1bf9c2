use crate::models::ChatMessage;
use crate::services::oracle::{Oracle, OracleError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// OpenAI-compatible chat completions client (Groq by default)
pub struct ChatCompletionClient {
    api_base: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    client: Client,
}

impl ChatCompletionClient {
    /// Create a new completion client
    pub fn new(
        api_base: String,
        api_key: String,
        model: String,
        temperature: Option<f32>,
        timeout: Option<Duration>,
    ) -> Result<Self, OracleError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            client: builder.build()?,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, conversation: &[ChatMessage]) -> Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": conversation,
        });
        if let (Some(temperature), Some(obj)) = (self.temperature, body.as_object_mut()) {
            obj.insert("temperature".to_string(), serde_json::json!(temperature));
        }
        body
    }
}

#[async_trait]
impl Oracle for ChatCompletionClient {
    async fn complete(&self, conversation: &[ChatMessage]) -> Result<String, OracleError> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(conversation))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(OracleError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response.json().await?;
        let content = reply_content(&json)?;

        tracing::debug!("Completion from {} ({} chars)", self.model, content.len());

        Ok(content)
    }
}

/// Pull `choices[0].message.content` out of a completion response
pub fn reply_content(json: &Value) -> Result<String, OracleError> {
    json.get("choices")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| OracleError::InvalidResponse("Missing choices[0].message.content".into()))
}
