//! Classifier configuration

use crate::llm::prompts::FALLBACK_REPLY;
use std::time::Duration;

/// Configuration for the classifier collaborator
#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    /// Model identifier (HuggingFace model ID or local path)
    pub model_id: String,

    /// Temperature for sampling
    pub temperature: f32,

    /// Maximum tokens to generate per reply
    pub max_tokens: usize,

    /// Number of most recent transcript turns sent as context
    pub history_turns: usize,

    /// Upper bound on a single classifier call
    pub request_timeout: Duration,

    /// Reply used when the classifier fails or times out
    pub fallback_reply: String,

    /// Enable logging of inference details
    pub enable_logging: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_id: "microsoft/Phi-3.5-mini-instruct".to_string(),
            temperature: 0.7,
            max_tokens: 100,
            history_turns: 3,
            request_timeout: Duration::from_secs(30),
            fallback_reply: FALLBACK_REPLY.to_string(),
            enable_logging: false,
        }
    }
}

impl ClassifierConfig {
    /// Create a new configuration with the specified model
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set maximum tokens
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Enable inference logging
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("Classifier model id is required".to_string());
        }
        if self.history_turns == 0 {
            return Err("Classifier history must include at least one turn".to_string());
        }
        if self.request_timeout.is_zero() {
            return Err("Classifier timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert_eq!(config.history_turns, 3);
        assert_eq!(config.max_tokens, 100);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClassifierConfig::new("local/model")
            .with_temperature(0.2)
            .with_max_tokens(64)
            .with_timeout(Duration::from_millis(500))
            .with_logging(true);

        assert_eq!(config.model_id, "local/model");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 64);
        assert_eq!(config.request_timeout, Duration::from_millis(500));
        assert!(config.enable_logging);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ClassifierConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
