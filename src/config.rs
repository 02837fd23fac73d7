use std::env;

/// Settings for the caption/tagline generation service (an OpenAI-compatible
/// chat-completions endpoint).
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Settings for the text-to-image generation service.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub api_key: Option<String>,
    pub engine: String,
    pub base_url: String,
}

/// Per-platform publishing tokens. A missing token means the platform is
/// "not configured", which is a distinct non-fatal outcome at publish time.
#[derive(Debug, Clone, Default)]
pub struct SocialConfig {
    pub instagram_token: Option<String>,
    pub facebook_token: Option<String>,
    pub twitter_token: Option<String>,
    pub linkedin_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub caption: CaptionConfig,
    pub image: ImageConfig,
    pub social: SocialConfig,
    pub font_dir: Option<String>,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        CaptionConfig {
            api_key: None,
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
        }
    }
}

impl CaptionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GROQ_API_KEY").ok();
        let mut config = CaptionConfig::default();
        config.api_key = api_key;
        if let Ok(model) = env::var("CAPTION_MODEL") {
            config.model = model;
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            api_key: None,
            engine: "stable-diffusion-v1-6".to_string(),
            base_url: "https://api.stability.ai".to_string(),
        }
    }
}

impl ImageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("STABILITY_API_KEY").ok();
        let mut config = ImageConfig::default();
        config.api_key = api_key;
        if let Ok(engine) = env::var("IMAGE_ENGINE") {
            config.engine = engine;
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl SocialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        SocialConfig {
            instagram_token: env::var("INSTAGRAM_TOKEN").ok(),
            facebook_token: env::var("FACEBOOK_TOKEN").ok(),
            twitter_token: env::var("TWITTER_TOKEN").ok(),
            linkedin_token: env::var("LINKEDIN_TOKEN").ok(),
        }
    }

    pub fn with_instagram(mut self, token: impl Into<String>) -> Self {
        self.instagram_token = Some(token.into());
        self
    }

    pub fn with_facebook(mut self, token: impl Into<String>) -> Self {
        self.facebook_token = Some(token.into());
        self
    }

    pub fn with_twitter(mut self, token: impl Into<String>) -> Self {
        self.twitter_token = Some(token.into());
        self
    }

    pub fn with_linkedin(mut self, token: impl Into<String>) -> Self {
        self.linkedin_token = Some(token.into());
        self
    }

    /// Number of platforms with a non-empty token.
    pub fn configured_count(&self) -> usize {
        [
            &self.instagram_token,
            &self.facebook_token,
            &self.twitter_token,
            &self.linkedin_token,
        ]
        .iter()
        .filter(|token| token.as_deref().is_some_and(|t| !t.is_empty()))
        .count()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            caption: CaptionConfig::default(),
            image: ImageConfig::default(),
            social: SocialConfig::default(),
            font_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Config {
            caption: CaptionConfig::from_env(),
            image: ImageConfig::from_env(),
            social: SocialConfig::from_env(),
            font_dir: env::var("POSTFORGE_FONT_DIR").ok(),
        }
    }

    pub fn with_caption(mut self, config: CaptionConfig) -> Self {
        self.caption = config;
        self
    }

    pub fn with_image(mut self, config: ImageConfig) -> Self {
        self.image = config;
        self
    }

    pub fn with_social(mut self, config: SocialConfig) -> Self {
        self.social = config;
        self
    }

    pub fn with_font_dir(mut self, dir: impl Into<String>) -> Self {
        self.font_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains_override_defaults() {
        let config = Config::new()
            .with_caption(CaptionConfig::new().with_api_key("k1").with_model("m"))
            .with_image(ImageConfig::new().with_api_key("k2"))
            .with_social(SocialConfig::new().with_twitter("t"));

        assert_eq!(config.caption.api_key.as_deref(), Some("k1"));
        assert_eq!(config.caption.model, "m");
        assert_eq!(config.image.api_key.as_deref(), Some("k2"));
        assert_eq!(config.social.twitter_token.as_deref(), Some("t"));
        assert!(config.social.instagram_token.is_none());
    }

    #[test]
    fn configured_count_ignores_empty_tokens() {
        let social = SocialConfig::new().with_twitter("t").with_facebook("");
        assert_eq!(social.configured_count(), 1);
    }

    #[test]
    fn defaults_point_at_hosted_endpoints() {
        let caption = CaptionConfig::default();
        assert!(caption.base_url.starts_with("https://"));
        assert!(caption.api_key.is_none());

        let image = ImageConfig::default();
        assert!(image.base_url.starts_with("https://"));
        assert_eq!(image.engine, "stable-diffusion-v1-6");
    }
}
