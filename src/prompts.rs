//! Prompt assembly for the two generative services.
//!
//! Prompts are plain strings built from the structured [`PostRequest`]; the
//! festival occasions get extra cultural framing in both text prompts.

use crate::models::{CaptionRequest, ImageGenerationRequest, PostRequest};

const CAPTION_SYSTEM: &str = "You are a professional social media marketer specializing in \
    Indian hospitality and festivals. Create engaging captions that blend traditional values \
    with modern appeal.";

const TAGLINE_SYSTEM: &str = "You are a branding expert specializing in Indian hospitality \
    and festivals. Create catchy promotional taglines (max 10 words) that blend traditional \
    values with modern appeal.";

const FESTIVALS: [&str; 4] = ["Diwali", "Holi", "Independence Day", "Republic Day"];

fn festival_context(occasion: &str) -> String {
    if FESTIVALS.contains(&occasion) {
        format!(
            "Create a culturally appropriate and festive tagline for {} that resonates with \
             Indian audiences. ",
            occasion
        )
    } else {
        String::new()
    }
}

fn feature_text(request: &PostRequest) -> String {
    if request.features.is_empty() {
        "our wonderful amenities".to_string()
    } else {
        request
            .features
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The long caption request: a short social post highlighting the occasion,
/// audience and features.
pub fn caption_request(request: &PostRequest) -> CaptionRequest {
    let offer_line = match &request.special_offer {
        Some(offer) => format!("Include this special offer: {}.\n", offer),
        None => String::new(),
    };

    let prompt = format!(
        "Create a short, engaging social media post (max 100 words) for {} in {} promoting a \
         {}. Target audience: {}.\nHighlight these features: {}.\n{}The tone should be \
         professional yet warm and inviting.",
        request.hotel_name,
        request.hotel_location,
        request.occasion,
        request.audience,
        feature_text(request),
        offer_line,
    );

    CaptionRequest::new(CAPTION_SYSTEM, prompt)
        .with_temperature(0.8)
        .with_max_tokens(150)
}

/// The short tagline request (max 10 words), with festival framing when the
/// occasion calls for it.
pub fn tagline_request(request: &PostRequest) -> CaptionRequest {
    let prompt = format!(
        "{}Create a short and catchy promotional tagline (max 10 words) for {}. Occasion: {}. \
         Target Audience: {}. Keep it engaging, professional, and culturally appropriate.",
        festival_context(&request.occasion),
        request.hotel_name,
        request.occasion,
        request.audience,
    );

    CaptionRequest::new(TAGLINE_SYSTEM, prompt)
        .with_temperature(0.9)
        .with_max_tokens(20)
}

/// The image prompt pairs style guidance with the occasion and up to three
/// features, and carries a weighted negative prompt to keep text and
/// watermarks out of the picture.
pub fn image_request(request: &PostRequest) -> ImageGenerationRequest {
    let features: Vec<&str> = request.features.iter().map(String::as_str).take(3).collect();
    let featuring = if features.is_empty() {
        String::new()
    } else {
        format!("featuring {}, ", features.join(", "))
    };

    let prompt = format!(
        "{}. A beautiful view of a {} for a {} promotion, {}perfect for {}. No text on the image.",
        request.image_style_guidance,
        request.hotel_type,
        request.occasion,
        featuring,
        request.audience,
    );

    ImageGenerationRequest::new(prompt)
        .with_negative_prompt("blurry, low quality, distorted, text, watermark, signature")
        .with_size(1024, 1024)
}
