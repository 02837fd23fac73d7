use reqwest::{Client, StatusCode};

use crate::{
    config::CaptionConfig,
    error::{Result, StudioError},
    models::{CaptionRequest, ChatCompletionResponse, ChatMessage},
};

/// Client for the chat-completions caption/tagline service.
#[derive(Clone)]
pub struct CaptionClient {
    client: Client,
    config: CaptionConfig,
}

impl CaptionClient {
    pub fn new(config: CaptionConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Generate one completion for the request. Configuration problems are
    /// reported before any network traffic; the caller decides how to degrade.
    pub async fn generate(&self, request: CaptionRequest) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            StudioError::ConfigError("Caption service API key is not set".into())
        })?;

        let model = request.model.as_deref().unwrap_or(&self.config.model);
        let payload = serde_json::json!({
            "model": model,
            "messages": [
                ChatMessage { role: "system", content: request.system.clone() },
                ChatMessage { role: "user", content: request.prompt.clone() },
            ],
            "temperature": request.temperature.unwrap_or(0.7),
            "max_tokens": request.max_tokens.unwrap_or(150),
        });

        log::info!("Requesting caption completion from model: {}", model);
        log::debug!("Caption request payload: {}", payload);

        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Caption request failed: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(StudioError::InvalidCredential("caption service".into()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StudioError::ResponseError(format!(
                "Caption service returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(format!("Malformed caption response: {}", e)))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| StudioError::ResponseError("Caption response had no choices".into()))?;

        Ok(content.trim().trim_matches('"').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptionConfig;

    #[tokio::test]
    async fn missing_api_key_is_a_config_error() {
        let client = CaptionClient::new(CaptionConfig::new());
        assert!(!client.is_configured());

        let result = client
            .generate(CaptionRequest::new("system", "prompt"))
            .await;
        assert!(matches!(result, Err(StudioError::ConfigError(_))));
    }
}
