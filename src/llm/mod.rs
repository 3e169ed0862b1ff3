//! LLM (Large Language Model) integration module
//!
//! Chat-completion style providers behind one trait, so pipeline stages can
//! run against OpenAI, Gemini, or a stub without caring which.

pub mod providers;

pub use providers::{GeminiProvider, OpenAiProvider};

use crate::error::Result;
use crate::types::{LlmConfig, ProviderKind};
use async_trait::async_trait;

/// A single completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub prompt: String,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// Ask the provider for strict JSON output
    pub json: bool,
}

impl ChatRequest {
    /// Free-form text completion with provider-default sampling
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            top_p: None,
            json: false,
        }
    }

    /// Completion constrained to a strict JSON object
    pub fn structured(prompt: impl Into<String>) -> Self {
        Self {
            json: true,
            ..Self::new(prompt)
        }
    }

    /// Override sampling parameters
    pub fn with_sampling(mut self, temperature: f32, top_p: f32) -> Self {
        self.temperature = Some(temperature);
        self.top_p = Some(top_p);
        self
    }
}

/// Core trait for all LLM providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion and return the raw text of the reply
    async fn complete(&self, request: &ChatRequest) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;

    /// Check if provider is configured and ready
    fn is_ready(&self) -> bool;
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn ChatProvider>> {
    match config.provider {
        ProviderKind::OpenAi => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        ProviderKind::Gemini => Ok(Box::new(providers::GeminiProvider::new(config)?)),
    }
}
