//! One operator's working state, from request to finished post.
//!
//! A [`Session`] holds the request, the generated content, the design spec and
//! the composited image. Any edit to content or design drops the cached
//! composite so the next [`Session::compose`] reflects the change.

use image::DynamicImage;

use crate::{
    error::{Result, StudioError},
    models::{CompositeResult, DesignSpec, GeneratedContent, PostRequest},
    prompts,
    render::{self, FontStore},
    services::{self, StudioClient, CAPTION_FALLBACK, TAGLINE_FALLBACK},
};

pub struct Session {
    request: PostRequest,
    content: GeneratedContent,
    design: DesignSpec,
    composite: Option<CompositeResult>,
}

impl Session {
    pub fn new(request: PostRequest) -> Self {
        Session {
            request,
            content: GeneratedContent::default(),
            design: DesignSpec::default(),
            composite: None,
        }
    }

    pub fn request(&self) -> &PostRequest {
        &self.request
    }

    pub fn content(&self) -> &GeneratedContent {
        &self.content
    }

    pub fn design(&self) -> &DesignSpec {
        &self.design
    }

    pub fn composite(&self) -> Option<&CompositeResult> {
        self.composite.as_ref()
    }

    /// Run both generative services and replace all content. Failures degrade
    /// to placeholders inside the client; the session keeps going either way.
    pub async fn generate(&mut self, client: &StudioClient) {
        self.content = client.generate_content(&self.request).await;
        self.composite = None;
    }

    /// Re-run the caption completion only, leaving tagline and background
    /// untouched.
    pub async fn regenerate_caption(&mut self, client: &StudioClient) {
        let request = prompts::caption_request(&self.request);
        self.content.caption = match client.caption().generate(request).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error regenerating caption: {}", e);
                services::degraded_text(&e, CAPTION_FALLBACK)
            }
        };
        self.composite = None;
    }

    pub async fn regenerate_tagline(&mut self, client: &StudioClient) {
        let request = prompts::tagline_request(&self.request);
        self.content.tagline = match client.caption().generate(request).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Error regenerating tagline: {}", e);
                services::degraded_text(&e, TAGLINE_FALLBACK)
            }
        };
        self.composite = None;
    }

    /// Re-run the image generation only. On failure the previous background
    /// is kept, since a stale image beats none at all.
    pub async fn regenerate_image(&mut self, client: &StudioClient) {
        let request = prompts::image_request(&self.request);
        match client.image().generate(request).await {
            Ok(image) => {
                self.content.background = Some(image);
                self.composite = None;
            }
            Err(e) => log::error!("Error regenerating image: {}", e),
        }
    }

    /// Manual caption edit, exactly as typed.
    pub fn edit_caption(&mut self, caption: impl Into<String>) {
        self.content.caption = caption.into();
        self.composite = None;
    }

    pub fn set_design(&mut self, design: DesignSpec) {
        if design != self.design {
            self.composite = None;
        }
        self.design = design;
    }

    /// Replace the background with an operator-supplied image, e.g. an upload
    /// used when the generation service is down.
    pub fn set_background(&mut self, background: DynamicImage) {
        self.content.background = Some(background);
        self.composite = None;
    }

    /// Composite the current caption and design over the background, caching
    /// the result until the next edit. Requires a background.
    pub fn compose(&mut self, fonts: &FontStore) -> Result<&CompositeResult> {
        if self.composite.is_none() {
            let background = self.content.background.as_ref().ok_or_else(|| {
                StudioError::RenderError("No background image to composite onto".into())
            })?;
            let result = render::render(background, &self.content.caption, &self.design, fonts)?;
            self.composite = Some(result);
        }
        match self.composite.as_ref() {
            Some(composite) => Ok(composite),
            None => Err(StudioError::RenderError(
                "Composite cache unexpectedly empty".into(),
            )),
        }
    }

    /// Encoded JPEG of the cached composite, for download or publishing.
    pub fn download_jpeg(&self) -> Result<Vec<u8>> {
        let composite = self.composite.as_ref().ok_or_else(|| {
            StudioError::RenderError("Nothing composited yet".into())
        })?;
        composite.to_jpeg_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LayoutStyle;
    use image::{Rgb, RgbImage};

    fn session_with_background() -> Session {
        let mut session = Session::new(PostRequest::new("Inn", "Pune", "Diwali", "Families"));
        session.set_background(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            128,
            128,
            Rgb([30, 30, 30]),
        )));
        session.set_design(DesignSpec::default().with_font("No Such Family", 20));
        session
    }

    #[test]
    fn compose_without_background_fails() {
        let mut session = Session::new(PostRequest::new("Inn", "Pune", "Diwali", "Families"));
        let fonts = FontStore::new(None);
        assert!(matches!(
            session.compose(&fonts),
            Err(StudioError::RenderError(_))
        ));
    }

    #[test]
    fn compose_caches_until_invalidated() {
        let mut session = session_with_background();
        let fonts = FontStore::new(None);

        session.compose(&fonts).unwrap();
        assert!(session.composite().is_some());

        session.edit_caption("A new caption");
        assert!(session.composite().is_none());

        session.compose(&fonts).unwrap();
        assert!(session.composite().is_some());
    }

    #[test]
    fn design_change_invalidates_the_composite() {
        let mut session = session_with_background();
        let fonts = FontStore::new(None);
        session.compose(&fonts).unwrap();

        let new_design = DesignSpec::new(LayoutStyle::SacredCircle).with_font("No Such Family", 20);
        session.set_design(new_design);
        assert!(session.composite().is_none());
    }

    #[test]
    fn identical_design_keeps_the_cache() {
        let mut session = session_with_background();
        let fonts = FontStore::new(None);
        session.compose(&fonts).unwrap();

        let same = session.design().clone();
        session.set_design(same);
        assert!(session.composite().is_some());
    }

    #[test]
    fn placeholder_caption_still_composites() {
        let mut session = session_with_background();
        session.edit_caption(CAPTION_FALLBACK);
        let fonts = FontStore::new(None);
        assert!(session.compose(&fonts).is_ok());
    }

    #[test]
    fn download_requires_a_composite() {
        let session = session_with_background();
        assert!(session.download_jpeg().is_err());

        let mut session = session_with_background();
        let fonts = FontStore::new(None);
        session.compose(&fonts).unwrap();
        assert!(!session.download_jpeg().unwrap().is_empty());
    }
}
