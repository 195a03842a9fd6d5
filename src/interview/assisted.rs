//! Free-text interview track backed by the classifier

use crate::interview::inference::infer_type;
use crate::interview::profile::{Ear, TinnitusType, UserProfile};
use crate::interview::state::{self, InterviewState};
use crate::interview::strategy::{InterviewStrategy, Step};
use crate::llm::{build_prompt, generate_with_timeout, Classifier, ClassifierConfig, ConversationMessage};
use crate::messages::MessageStorage;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Converses through the classifier and infers the type from user wording
pub struct AssistedStrategy {
    classifier: Arc<dyn Classifier>,
    config: ClassifierConfig,
}

impl AssistedStrategy {
    pub fn new(classifier: Arc<dyn Classifier>, config: ClassifierConfig) -> Self {
        Self { classifier, config }
    }

    /// One classifier turn; any failure becomes the fallback reply
    async fn ask(&self, transcript: &MessageStorage) -> String {
        let history = ConversationMessage::from_transcript(&transcript.recent(self.config.history_turns));
        let prompt = build_prompt(&history);

        match generate_with_timeout(
            self.classifier.as_ref(),
            &prompt,
            &history,
            self.config.request_timeout,
        )
        .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Classifier turn failed: {}", e);
                self.config.fallback_reply.clone()
            }
        }
    }

    async fn converse(&self, profile: &mut UserProfile, transcript: &MessageStorage) -> Step {
        let reply = self.ask(transcript).await;

        // Once a type is resolved it is never re-evaluated
        if profile.tinnitus_type.is_none() {
            if let Some(kind) = infer_type(&transcript.user_corpus()) {
                info!("Inferred tinnitus type: {:?}", kind);
                profile.tinnitus_type = Some(kind);
            }
        }

        match profile.tinnitus_type {
            Some(TinnitusType::Unilateral) => Step {
                next: InterviewState::AwaitingEar,
                replies: vec![reply, state::EAR_QUESTION.to_string()],
            },
            Some(_) => Step::to(InterviewState::Classified, reply),
            None => Step::to(InterviewState::AwaitingType, reply),
        }
    }

    async fn ear(
        &self,
        profile: &mut UserProfile,
        transcript: &MessageStorage,
        utterance: &str,
    ) -> Step {
        let reply = self.ask(transcript).await;

        match Ear::parse(utterance) {
            Some(ear) => {
                profile.affected_ear = Some(ear);
                Step::to(InterviewState::Classified, reply)
            }
            None => {
                debug!("Ear answer not recognised: {:?}", utterance);
                Step {
                    next: InterviewState::AwaitingEar,
                    replies: vec![reply, state::EAR_QUESTION.to_string()],
                }
            }
        }
    }
}

#[async_trait]
impl InterviewStrategy for AssistedStrategy {
    fn initial_state(&self) -> InterviewState {
        InterviewState::AwaitingType
    }

    fn greeting(&self) -> &str {
        state::ASSISTED_GREETING
    }

    async fn step(
        &mut self,
        current: InterviewState,
        profile: &mut UserProfile,
        transcript: &MessageStorage,
        utterance: &str,
    ) -> Step {
        match current {
            InterviewState::AwaitingEar => self.ear(profile, transcript, utterance).await,
            InterviewState::Classified => Step::silent(InterviewState::Classified),
            _ => self.converse(profile, transcript).await,
        }
    }

    fn name(&self) -> &'static str {
        "assisted"
    }
}
