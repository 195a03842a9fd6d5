//! The classifier seam used by the assisted interview

use crate::llm::context::ConversationMessage;
use crate::{Result, TinnieaseError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// External text-generation collaborator consulted on free-text turns
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Produce a reply for `prompt`, given the most recent turns as context
    async fn generate(&self, prompt: &str, history: &[ConversationMessage]) -> Result<String>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Run one classifier call bounded by `timeout`
///
/// Expiry is reported as [`TinnieaseError::ClassifierUnavailable`].
pub async fn generate_with_timeout(
    classifier: &dyn Classifier,
    prompt: &str,
    history: &[ConversationMessage],
    timeout: Duration,
) -> Result<String> {
    match tokio::time::timeout(timeout, classifier.generate(prompt, history)).await {
        Ok(result) => result,
        Err(_) => {
            warn!("{} did not answer within {:?}", classifier.name(), timeout);
            Err(TinnieaseError::ClassifierUnavailable(format!(
                "no reply within {:?}",
                timeout
            )))
        }
    }
}
