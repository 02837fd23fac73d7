use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::DynamicImage;
use reqwest::{Client, StatusCode};

use crate::{
    config::ImageConfig,
    error::{Result, StudioError},
    models::{ArtifactResponse, ImageGenerationRequest, TextPrompt},
};

/// Client for the text-to-image diffusion service.
#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    config: ImageConfig,
}

impl ImageClient {
    pub fn new(config: ImageConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Generate one image and decode the first returned artifact.
    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<DynamicImage> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            StudioError::ConfigError("Image service API key is not set".into())
        })?;

        let mut text_prompts = vec![TextPrompt {
            text: request.prompt.clone(),
            weight: None,
        }];
        if let Some(negative) = &request.negative_prompt {
            text_prompts.push(TextPrompt {
                text: negative.clone(),
                weight: Some(-1.0),
            });
        }

        let payload = serde_json::json!({
            "text_prompts": text_prompts,
            "cfg_scale": request.cfg_scale.unwrap_or(7.0),
            "width": request.width.unwrap_or(1024),
            "height": request.height.unwrap_or(1024),
            "samples": request.samples.unwrap_or(1),
            "steps": request.steps.unwrap_or(30),
        });

        let url = format!(
            "{}/v1/generation/{}/text-to-image",
            self.config.base_url, self.config.engine
        );

        log::info!("Generating image with engine: {}", self.config.engine);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Image request failed: {}", e)))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(StudioError::InvalidCredential("image service".into()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StudioError::ResponseError(format!(
                "Image service returned {}: {}",
                status, body
            )));
        }

        let artifacts: ArtifactResponse = response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(format!("Malformed image response: {}", e)))?;

        let first = artifacts
            .artifacts
            .first()
            .ok_or_else(|| StudioError::ResponseError("No images generated".into()))?;

        let bytes = BASE64
            .decode(&first.base64)
            .map_err(|e| StudioError::ResponseError(format!("Invalid base64 image: {}", e)))?;

        image::load_from_memory(&bytes)
            .map_err(|e| StudioError::ImageError(format!("Failed to decode image: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageConfig;
    use crate::models::ImageGenerationRequest;

    #[tokio::test]
    async fn missing_api_key_is_a_config_error() {
        let client = ImageClient::new(ImageConfig::new());
        assert!(!client.is_configured());

        let result = client
            .generate(ImageGenerationRequest::new("a hotel by the sea"))
            .await;
        assert!(matches!(result, Err(StudioError::ConfigError(_))));
    }
}
