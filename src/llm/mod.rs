//! Classifier collaborator for free-text interview turns
//!
//! The interview engine only depends on the [`Classifier`] trait. A local
//! model backend built on mistral.rs is available behind the `local-llm`
//! feature.

pub mod classifier;
pub mod config;
pub mod context;
#[cfg(feature = "local-llm")]
pub mod inference;
pub mod prompts;

pub use classifier::{generate_with_timeout, Classifier};
pub use config::ClassifierConfig;
pub use context::{ConversationMessage, MessageRole};
#[cfg(feature = "local-llm")]
pub use inference::LocalLlmClassifier;
pub use prompts::{build_prompt, FALLBACK_REPLY};
