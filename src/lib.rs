pub mod audio;
pub mod integration;
pub mod interview;
pub mod llm;
pub mod messages;
pub mod presentation;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TinnieaseError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Model load error: {0}")]
    ModelLoadError(String),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Layout load failure: {0}")]
    LayoutLoadFailure(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl TinnieaseError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            TinnieaseError::AudioDeviceError(_) => false,
            // Model errors require restarting
            TinnieaseError::ModelLoadError(_) => false,
            // The conversation carries on with a fallback reply
            TinnieaseError::ClassifierUnavailable(_) => true,
            // Classification is kept, the layout can be reloaded
            TinnieaseError::LayoutLoadFailure(_) => true,
            TinnieaseError::AudioProcessingError(_) => true,
            TinnieaseError::ConfigError(_) => false,
            TinnieaseError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            TinnieaseError::AudioDeviceError(_) => {
                "Audio device error. Please check your speakers or headphones.".to_string()
            }
            TinnieaseError::ModelLoadError(_) => {
                "Failed to load AI model. Please verify model files are present.".to_string()
            }
            TinnieaseError::ClassifierUnavailable(_) => {
                "The assistant is not responding right now. Please try again.".to_string()
            }
            TinnieaseError::LayoutLoadFailure(_) => {
                "Sorry, there was an error loading the interface. Please try again.".to_string()
            }
            TinnieaseError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            TinnieaseError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            TinnieaseError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TinnieaseError>;
