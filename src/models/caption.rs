use serde::{Deserialize, Serialize};

/// A request against the chat-completions caption service.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    pub model: Option<String>,
}

impl CaptionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        CaptionRequest {
            system: system.into(),
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
            model: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}
