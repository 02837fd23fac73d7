use image::{DynamicImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Cursor;

use crate::error::{Result, StudioError};
use crate::render::LayoutStyle;

/// Everything the operator fills in before generation. Immutable once used to
/// build prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub hotel_name: String,
    pub hotel_location: String,
    pub hotel_type: String,
    pub occasion: String,
    pub audience: String,
    pub features: BTreeSet<String>,
    pub special_offer: Option<String>,
    pub image_style_guidance: String,
}

impl PostRequest {
    pub fn new(
        hotel_name: impl Into<String>,
        hotel_location: impl Into<String>,
        occasion: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        PostRequest {
            hotel_name: hotel_name.into(),
            hotel_location: hotel_location.into(),
            hotel_type: "boutique hotel".to_string(),
            occasion: occasion.into(),
            audience: audience.into(),
            features: BTreeSet::new(),
            special_offer: None,
            image_style_guidance:
                "Professional hotel photography, warm lighting, inviting atmosphere, high quality"
                    .to_string(),
        }
    }

    pub fn with_hotel_type(mut self, hotel_type: impl Into<String>) -> Self {
        self.hotel_type = hotel_type.into();
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.insert(feature.into());
        self
    }

    pub fn with_special_offer(mut self, offer: impl Into<String>) -> Self {
        self.special_offer = Some(offer.into());
        self
    }

    pub fn with_image_style(mut self, guidance: impl Into<String>) -> Self {
        self.image_style_guidance = guidance.into();
        self
    }
}

/// Output of the two generative services. Caption, tagline and background are
/// each independently regenerable; compositing requires the background only.
#[derive(Debug, Clone, Default)]
pub struct GeneratedContent {
    pub caption: String,
    pub tagline: String,
    pub background: Option<DynamicImage>,
}

impl GeneratedContent {
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }
}

/// Design parameters for the compositing step. Any change invalidates a
/// previously composited image.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignSpec {
    pub layout_style: LayoutStyle,
    pub font_family: String,
    pub font_size: u32,
    pub text_color: [u8; 3],
    pub logo: Option<DynamicImage>,
}

impl Default for DesignSpec {
    fn default() -> Self {
        DesignSpec {
            layout_style: LayoutStyle::default(),
            font_family: "Roboto".to_string(),
            font_size: 50,
            text_color: [255, 255, 255],
            logo: None,
        }
    }
}

impl DesignSpec {
    pub fn new(layout_style: LayoutStyle) -> Self {
        DesignSpec {
            layout_style,
            ..Default::default()
        }
    }

    pub fn with_font(mut self, family: impl Into<String>, size: u32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    pub fn with_text_color(mut self, color: [u8; 3]) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_logo(mut self, logo: DynamicImage) -> Self {
        self.logo = Some(logo);
        self
    }
}

/// The final flattened post image. Pixels are opaque RGB; encoded bytes are
/// produced on demand for download or publishing.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeResult {
    image: RgbImage,
}

impl CompositeResult {
    pub fn new(image: RgbImage) -> Self {
        CompositeResult { image }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn to_jpeg_bytes(&self) -> Result<Vec<u8>> {
        self.encode(ImageFormat::Jpeg)
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        self.encode(ImageFormat::Png)
    }

    fn encode(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(self.image.clone())
            .write_to(&mut Cursor::new(&mut bytes), format)
            .map_err(|e| StudioError::ImageError(format!("Failed to encode image: {}", e)))?;
        Ok(bytes)
    }

    /// Download filename convention: a date stamp embedded in the name.
    pub fn download_filename(date: chrono::NaiveDate, extension: &str) -> String {
        format!("hotel_post_{}.{}", date.format("%Y%m%d"), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_request_builder_collects_features() {
        let request = PostRequest::new("Sea Breeze", "Goa", "Diwali", "Families")
            .with_feature("Pool")
            .with_feature("Spa")
            .with_feature("Pool")
            .with_special_offer("20% off this week");

        assert_eq!(request.features.len(), 2);
        assert_eq!(request.special_offer.as_deref(), Some("20% off this week"));
    }

    #[test]
    fn download_filename_embeds_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(
            CompositeResult::download_filename(date, "jpg"),
            "hotel_post_20260829.jpg"
        );
        assert_eq!(
            CompositeResult::download_filename(date, "png"),
            "hotel_post_20260829.png"
        );
    }

    #[test]
    fn composite_result_encodes_to_both_formats() {
        let result = CompositeResult::new(RgbImage::from_pixel(8, 8, image::Rgb([10, 20, 30])));
        let png = result.to_png_bytes().unwrap();
        let jpeg = result.to_jpeg_bytes().unwrap();
        assert!(!png.is_empty());
        assert!(!jpeg.is_empty());

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 8);
    }
}
