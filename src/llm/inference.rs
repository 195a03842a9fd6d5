//! Local classifier backend using mistral.rs

use crate::llm::classifier::Classifier;
use crate::llm::config::ClassifierConfig;
use crate::llm::context::{ConversationMessage, MessageRole};
use crate::{Result, TinnieaseError};
use async_trait::async_trait;
use mistralrs::{IsqType, RequestBuilder, TextMessageRole, TextModelBuilder};
use std::sync::Arc;
use tracing::{debug, info};

/// Classifier backed by a quantized local chat model
pub struct LocalLlmClassifier {
    config: ClassifierConfig,
    model: Arc<mistralrs::Model>,
}

impl LocalLlmClassifier {
    /// Load the model named in `config`
    pub async fn new(config: ClassifierConfig) -> Result<Self> {
        info!("Loading classifier model: {}", config.model_id);

        let mut builder = TextModelBuilder::new(&config.model_id).with_isq(IsqType::Q4K);

        if config.enable_logging {
            builder = builder.with_logging();
        }

        let model = builder
            .build()
            .await
            .map_err(|e| TinnieaseError::ModelLoadError(format!("Failed to load model: {}", e)))?;

        info!("Classifier model ready");

        Ok(Self {
            config,
            model: Arc::new(model),
        })
    }

    fn build_request(&self, prompt: &str, history: &[ConversationMessage]) -> RequestBuilder {
        let mut request = RequestBuilder::new()
            .set_sampler_temperature(self.config.temperature as f64)
            .set_sampler_max_len(self.config.max_tokens);

        // The prompt already embeds the recent turns; earlier turns give the
        // chat template the right speaker structure.
        for msg in history.iter().take(history.len().saturating_sub(1)) {
            let role = match msg.role {
                MessageRole::User => TextMessageRole::User,
                MessageRole::Assistant => TextMessageRole::Assistant,
            };
            request = request.add_message(role, &msg.content);
        }

        request.add_message(TextMessageRole::User, prompt)
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }
}

#[async_trait]
impl Classifier for LocalLlmClassifier {
    async fn generate(&self, prompt: &str, history: &[ConversationMessage]) -> Result<String> {
        let request = self.build_request(prompt, history);

        let response = self
            .model
            .send_chat_request(request)
            .await
            .map_err(|e| TinnieaseError::ClassifierUnavailable(format!("Chat request failed: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(
            "Generated reply: {} tokens @ {:.1} tok/s",
            response.usage.completion_tokens, response.usage.avg_compl_tok_per_sec
        );

        if content.trim().is_empty() {
            return Err(TinnieaseError::ClassifierUnavailable(
                "model returned an empty reply".to_string(),
            ));
        }

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        "local-llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires downloading model weights
    #[tokio::test]
    #[ignore]
    async fn test_local_generation() {
        let classifier = LocalLlmClassifier::new(ClassifierConfig::default())
            .await
            .unwrap();

        let reply = classifier
            .generate("Say hello in one word.", &[ConversationMessage::user("hello")])
            .await;
        assert!(reply.is_ok());
    }
}
