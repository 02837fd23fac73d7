use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{
    config::SocialConfig,
    error::Result,
    models::{Platform, PublishOutcome, PublishRequest, ScheduledPost},
};

/// A destination a finished post can be pushed to.
#[async_trait]
pub trait SocialSink: Send + Sync {
    fn platform(&self) -> Platform;
    fn is_configured(&self) -> bool;
    async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome>;
}

/// Stand-in sink: it validates credentials are present and logs the post
/// instead of talking to a real platform API.
pub struct SimulatedSink {
    platform: Platform,
    token: Option<String>,
}

impl SimulatedSink {
    pub fn new(platform: Platform, token: Option<String>) -> Self {
        Self { platform, token }
    }
}

#[async_trait]
impl SocialSink for SimulatedSink {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn is_configured(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome> {
        if !self.is_configured() {
            log::warn!(
                "No credentials configured for {}, skipping publish",
                self.platform
            );
            return Ok(PublishOutcome::NotConfigured);
        }

        log::info!(
            "Published {} byte image to {} (simulation): {}",
            request.image_bytes.len(),
            self.platform,
            request.caption.chars().take(60).collect::<String>()
        );
        Ok(PublishOutcome::Published)
    }
}

/// Fans a post out across the configured platform sinks.
pub struct Publisher {
    sinks: Vec<Box<dyn SocialSink>>,
}

impl Publisher {
    pub fn new(config: SocialConfig) -> Self {
        let sinks: Vec<Box<dyn SocialSink>> = vec![
            Box::new(SimulatedSink::new(
                Platform::Instagram,
                config.instagram_token,
            )),
            Box::new(SimulatedSink::new(Platform::Facebook, config.facebook_token)),
            Box::new(SimulatedSink::new(Platform::Twitter, config.twitter_token)),
            Box::new(SimulatedSink::new(Platform::LinkedIn, config.linkedin_token)),
        ];
        Self { sinks }
    }

    pub fn configured_platforms(&self) -> Vec<Platform> {
        self.sinks
            .iter()
            .filter(|sink| sink.is_configured())
            .map(|sink| sink.platform())
            .collect()
    }

    pub async fn publish_to(
        &self,
        platform: Platform,
        request: &PublishRequest,
    ) -> Result<PublishOutcome> {
        match self.sinks.iter().find(|sink| sink.platform() == platform) {
            Some(sink) => sink.publish(request).await,
            None => Ok(PublishOutcome::NotConfigured),
        }
    }

    /// Publish to each requested platform in turn, collecting per-platform
    /// outcomes. One unconfigured platform never blocks the others.
    pub async fn publish_all(
        &self,
        platforms: &[Platform],
        request: &PublishRequest,
    ) -> Result<Vec<(Platform, PublishOutcome)>> {
        let mut outcomes = Vec::with_capacity(platforms.len());
        for &platform in platforms {
            let outcome = self.publish_to(platform, request).await?;
            outcomes.push((platform, outcome));
        }
        Ok(outcomes)
    }

    /// Record a "schedule for later" action. Pure simulation: nothing is
    /// stored and nothing fires at the scheduled time.
    pub fn schedule(&self, platforms: &[Platform], when: NaiveDateTime) -> ScheduledPost {
        log::info!(
            "Post scheduled for {} on {} platform(s) (simulation)",
            when.format("%B %d, %Y at %I:%M %p"),
            platforms.len()
        );
        ScheduledPost {
            platforms: platforms.to_vec(),
            when,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PublishRequest {
        PublishRequest::new(vec![1, 2, 3], "caption")
    }

    #[tokio::test]
    async fn unconfigured_platform_is_a_distinct_outcome() {
        let publisher = Publisher::new(SocialConfig::new());
        let outcome = publisher
            .publish_to(Platform::Instagram, &request())
            .await
            .unwrap();
        assert_eq!(outcome, PublishOutcome::NotConfigured);
    }

    #[tokio::test]
    async fn configured_platform_publishes() {
        let publisher = Publisher::new(SocialConfig::new().with_twitter("token"));
        let outcome = publisher
            .publish_to(Platform::Twitter, &request())
            .await
            .unwrap();
        assert_eq!(outcome, PublishOutcome::Published);
        assert_eq!(publisher.configured_platforms(), vec![Platform::Twitter]);
    }

    #[tokio::test]
    async fn publish_all_mixes_outcomes() {
        let publisher = Publisher::new(SocialConfig::new().with_facebook("token"));
        let outcomes = publisher
            .publish_all(&[Platform::Facebook, Platform::LinkedIn], &request())
            .await
            .unwrap();
        assert_eq!(
            outcomes,
            vec![
                (Platform::Facebook, PublishOutcome::Published),
                (Platform::LinkedIn, PublishOutcome::NotConfigured),
            ]
        );
    }

    #[test]
    fn schedule_echoes_the_request() {
        let publisher = Publisher::new(SocialConfig::new());
        let when = chrono::NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let scheduled = publisher.schedule(&[Platform::Twitter], when);
        assert_eq!(scheduled.platforms, vec![Platform::Twitter]);
        assert_eq!(scheduled.when, when);
    }
}
