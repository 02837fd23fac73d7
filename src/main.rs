use image::{DynamicImage, Rgb, RgbImage};
use postforge::{
    logger, Config, DesignSpec, FontStore, LayoutStyle, Platform, PostRequest, PublishRequest,
    Session, StudioClient,
};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    logger::init_with_config(
        logger::LoggerConfig::development().with_level(logger::LogLevel::Debug),
    )?;

    log::info!("🔍 Checking service environment...");

    // Check credentials (without printing the actual values for security)
    match env::var("GROQ_API_KEY") {
        Ok(key) => {
            log::info!("✅ Caption service API key found in environment");
            log::debug!("Key starts with: {}...", &key[..4.min(key.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  GROQ_API_KEY not set, captions will degrade to placeholders");
        }
    }
    match env::var("STABILITY_API_KEY") {
        Ok(_) => log::info!("✅ Image service API key found in environment"),
        Err(_) => {
            log::warn!("⚠️  STABILITY_API_KEY not set, using a solid-color background instead");
        }
    }

    let config = Config::from_env();
    logger::log_config_info(&config);

    let fonts = FontStore::new(config.font_dir.as_deref());
    let client = StudioClient::new(config);

    log::info!("🏨 Building a sample post request...");
    let request = PostRequest::new("The Grand Lotus", "Jaipur", "Diwali", "Families")
        .with_hotel_type("heritage palace hotel")
        .with_feature("Rooftop Pool")
        .with_feature("Royal Spa")
        .with_feature("Courtyard Dining")
        .with_special_offer("20% off festive bookings");

    let mut session = Session::new(request);

    log::info!("🔄 Generating caption, tagline and background image...");
    session.generate(&client).await;

    log::info!("📝 Caption: {}", session.content().caption);
    log::info!("✨ Tagline: {}", session.content().tagline);

    if !session.content().has_background() {
        log::warn!("🎨 No generated background, falling back to a solid canvas");
        let canvas = RgbImage::from_pixel(1024, 1024, Rgb([30, 20, 60]));
        session.set_background(DynamicImage::ImageRgb8(canvas));
    }

    session.set_design(
        DesignSpec::new(LayoutStyle::GlowMotif)
            .with_font("Roboto", 50)
            .with_text_color([255, 255, 255]),
    );

    log::info!("🖼️  Compositing the post...");
    let timer = logger::timer("composite");
    session.compose(&fonts)?;
    timer.stop();

    let today = chrono::Local::now().date_naive();
    let filename = postforge::CompositeResult::download_filename(today, "jpg");
    fs::write(&filename, session.download_jpeg()?)?;
    log::info!("💾 Post saved to: {}", filename);

    log::info!("📣 Publishing to configured platforms...");
    let publish_request = PublishRequest::new(
        session.download_jpeg()?,
        session.content().caption.clone(),
    );
    let outcomes = client
        .publisher()
        .publish_all(&Platform::ALL, &publish_request)
        .await?;
    for (platform, outcome) in &outcomes {
        if outcome.is_published() {
            log::info!("✅ Published to {}", platform);
        } else {
            log::warn!("⏭️  Skipped {} (not configured)", platform);
        }
    }

    let tonight = today
        .and_hms_opt(19, 0, 0)
        .ok_or("invalid schedule time")?;
    let scheduled = client.publisher().schedule(&[Platform::Instagram], tonight);
    log::info!(
        "🗓️  Scheduled {} platform(s) for {}",
        scheduled.platforms.len(),
        scheduled.when.format("%B %d, %Y at %I:%M %p")
    );

    log::info!("🎉 Demo complete!");
    Ok(())
}
