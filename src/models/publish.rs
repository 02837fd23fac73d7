use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Twitter,
    LinkedIn,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
        Platform::LinkedIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What gets handed to a publishing sink: the encoded composite plus its
/// caption text.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub image_bytes: Vec<u8>,
    pub caption: String,
}

impl PublishRequest {
    pub fn new(image_bytes: Vec<u8>, caption: impl Into<String>) -> Self {
        PublishRequest {
            image_bytes,
            caption: caption.into(),
        }
    }
}

/// Per-platform publish result. Missing credentials are not an error, they
/// are a distinct outcome the caller can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    NotConfigured,
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published)
    }
}

/// Record of a simulated "schedule for later" action. Nothing is persisted;
/// the record only exists so the caller can echo it back to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledPost {
    pub platforms: Vec<Platform>,
    pub when: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_names_round_trip() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str(), platform.as_str().to_lowercase());
            assert_eq!(
                platform.display_name().to_lowercase(),
                platform.as_str().to_lowercase()
            );
        }
    }

    #[test]
    fn outcome_flags_published() {
        assert!(PublishOutcome::Published.is_published());
        assert!(!PublishOutcome::NotConfigured.is_published());
    }
}
