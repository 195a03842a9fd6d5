//! Configuration for the integration layer
//!
//! Provides centralized configuration for all components.

use crate::interview::InterviewMode;
use crate::llm::ClassifierConfig;
use crate::{Result, TinnieaseError};
use std::time::Duration;

/// Tone output settings
#[derive(Clone, Debug)]
pub struct AudioConfig {
    /// Level of each voice's gain stage (0.0 to 1.0)
    pub gain: f32,

    /// Whether to open the default output device
    pub enable_output: bool,

    /// Mixer rate used when no device is opened
    pub fallback_sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            gain: 0.5,
            enable_output: true,
            fallback_sample_rate: 48_000,
        }
    }
}

/// Configuration for the complete application
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    /// Interview track chosen at session start
    pub mode: InterviewMode,

    /// Classifier configuration (assisted mode)
    pub classifier: ClassifierConfig,

    /// Audio configuration
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Build from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(mode) = lookup("TINNIEASE_MODE") {
            config.mode = mode.parse().map_err(TinnieaseError::ConfigError)?;
        }
        if let Some(model) = lookup("TINNIEASE_MODEL") {
            config.classifier.model_id = model;
        }
        if let Some(secs) = lookup("TINNIEASE_CLASSIFIER_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                TinnieaseError::ConfigError(format!("Invalid classifier timeout: {}", secs))
            })?;
            config.classifier.request_timeout = Duration::from_secs(secs);
        }
        if let Some(gain) = lookup("TINNIEASE_GAIN") {
            config.audio.gain = gain
                .trim()
                .parse()
                .map_err(|_| TinnieaseError::ConfigError(format!("Invalid gain: {}", gain)))?;
        }

        Ok(config)
    }

    /// Set the interview mode
    pub fn with_mode(mut self, mode: InterviewMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the classifier configuration
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the voice gain
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.audio.gain = gain;
        self
    }

    /// Do not open an output device (tests, headless machines)
    pub fn without_audio_output(mut self) -> Self {
        self.audio.enable_output = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.audio.gain) {
            return Err(format!("Gain must be between 0 and 1, got {}", self.audio.gain));
        }

        if self.audio.fallback_sample_rate == 0 {
            return Err("Fallback sample rate must be positive".to_string());
        }

        if self.mode == InterviewMode::Assisted {
            if cfg!(not(feature = "local-llm")) {
                return Err(
                    "Assisted interviews need the local-llm feature".to_string(),
                );
            }
            self.classifier.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode, InterviewMode::Scripted);
        assert!(config.audio.enable_output);
        assert_eq!(config.audio.gain, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default().with_gain(0.2).without_audio_output();
        assert!(!config.audio.enable_output);
        assert_eq!(config.audio.gain, 0.2);
    }

    #[test]
    fn test_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TINNIEASE_MODE", "assisted"),
            ("TINNIEASE_MODEL", "local/tiny"),
            ("TINNIEASE_CLASSIFIER_TIMEOUT_SECS", "5"),
            ("TINNIEASE_GAIN", "0.3"),
        ]))
        .unwrap();

        assert_eq!(config.mode, InterviewMode::Assisted);
        assert_eq!(config.classifier.model_id, "local/tiny");
        assert_eq!(config.classifier.request_timeout, Duration::from_secs(5));
        assert_eq!(config.audio.gain, 0.3);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup(&[("TINNIEASE_MODE", "loud")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("TINNIEASE_GAIN", "very")])).is_err());
    }

    #[test]
    fn test_validate_gain_range() {
        assert!(AppConfig::default().with_gain(1.5).validate().is_err());
    }

    #[cfg(not(feature = "local-llm"))]
    #[test]
    fn test_assisted_needs_backend() {
        let config = AppConfig::default().with_mode(InterviewMode::Assisted);
        assert!(config.validate().is_err());
    }
}
