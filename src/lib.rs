//! PostForge: generative social media post studio for hospitality marketing.
//!
//! The crate wires three layers together:
//! - `services`: REST clients for caption/tagline completion and text-to-image
//!   generation, plus simulated social publishing sinks
//! - `render`: the deterministic compositing engine (word wrap, procedural
//!   pattern overlays, shadowed text, logo paste)
//! - `session`: per-operator state tying a request, its generated content and
//!   the composited image together

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod prompts;
pub mod render;
pub mod services;
pub mod session;

pub use config::{CaptionConfig, Config, ImageConfig, SocialConfig};
pub use error::{Result, StudioError};
pub use models::{
    CompositeResult, DesignSpec, GeneratedContent, Platform, PostRequest, PublishOutcome,
    PublishRequest, ScheduledPost,
};
pub use render::{render, FontStore, LayoutStyle};
pub use services::{CaptionClient, ImageClient, Publisher, SocialSink, StudioClient};
pub use session::Session;
