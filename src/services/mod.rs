pub mod caption;
pub mod image;
pub mod publish;

pub use caption::CaptionClient;
pub use image::ImageClient;
pub use publish::{Publisher, SimulatedSink, SocialSink};

use crate::{
    config::Config,
    error::StudioError,
    models::{GeneratedContent, PostRequest},
    prompts,
};

/// Placeholder caption used when the text service degrades.
pub const CAPTION_FALLBACK: &str = "Error generating caption. Please try again.";
/// Placeholder tagline used when the text service degrades.
pub const TAGLINE_FALLBACK: &str = "Error generating tagline. Please try again.";

/// Aggregates the two generative clients and the publishing sinks behind one
/// handle.
pub struct StudioClient {
    caption_client: CaptionClient,
    image_client: ImageClient,
    publisher: Publisher,
}

impl StudioClient {
    pub fn new(config: Config) -> Self {
        Self {
            caption_client: CaptionClient::new(config.caption),
            image_client: ImageClient::new(config.image),
            publisher: Publisher::new(config.social),
        }
    }

    pub fn caption(&self) -> &CaptionClient {
        &self.caption_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Run both generative services for a post request, degrading each piece
    /// of content independently: a failed caption or tagline becomes a
    /// placeholder string, a failed image becomes `None`. Service failures
    /// never abort the session.
    pub async fn generate_content(&self, request: &PostRequest) -> GeneratedContent {
        let caption = match self.caption_client.generate(prompts::caption_request(request)).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error generating caption: {}", e);
                degraded_text(&e, CAPTION_FALLBACK)
            }
        };

        let tagline = match self.caption_client.generate(prompts::tagline_request(request)).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error generating tagline: {}", e);
                degraded_text(&e, TAGLINE_FALLBACK)
            }
        };

        let background = match self.image_client.generate(prompts::image_request(request)).await {
            Ok(image) => Some(image),
            Err(e) => {
                log::error!("Error generating image: {}", e);
                None
            }
        };

        GeneratedContent {
            caption,
            tagline,
            background,
        }
    }
}

/// Missing keys get an actionable message; everything else gets the generic
/// retry placeholder.
pub(crate) fn degraded_text(error: &StudioError, fallback: &str) -> String {
    match error {
        StudioError::ConfigError(_) => {
            "Please set your caption service API key in the app settings.".to_string()
        }
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_get_an_actionable_placeholder() {
        let text = degraded_text(&StudioError::ConfigError("no key".into()), CAPTION_FALLBACK);
        assert!(text.contains("API key"));
    }

    #[test]
    fn service_errors_get_the_retry_placeholder() {
        let text = degraded_text(
            &StudioError::ResponseError("HTTP 500".into()),
            CAPTION_FALLBACK,
        );
        assert_eq!(text, CAPTION_FALLBACK);
    }
}
