//! Interview session: one profile, one transcript, one strategy

use crate::interview::profile::{TinnitusProfile, UserProfile};
use crate::interview::state::InterviewState;
use crate::interview::strategy::InterviewStrategy;
use crate::messages::{MessageStorage, Sender};
use tracing::{debug, info};

/// Outcome of a submitted utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Assistant turns appended for this utterance
    pub replies: Vec<String>,
    /// State after the utterance
    pub state: InterviewState,
    /// Set on the single turn that completes classification
    pub classification: Option<TinnitusProfile>,
}

/// Owns the conversation state for the lifetime of a session
pub struct InterviewSession {
    strategy: Box<dyn InterviewStrategy>,
    state: InterviewState,
    profile: UserProfile,
    transcript: MessageStorage,
}

impl InterviewSession {
    /// Start a session and post the strategy's greeting
    pub fn begin(strategy: Box<dyn InterviewStrategy>, transcript: MessageStorage) -> Self {
        let state = strategy.initial_state();
        info!("Starting {} interview", strategy.name());
        transcript.append(Sender::Assistant, strategy.greeting());

        Self {
            strategy,
            state,
            profile: UserProfile::new(),
            transcript,
        }
    }

    /// Handle one user utterance
    ///
    /// Returns `None` when the utterance is ignored: blank input, or any
    /// input after classification has completed.
    pub async fn submit(&mut self, utterance: &str) -> Option<Turn> {
        let text = utterance.trim();
        if text.is_empty() {
            return None;
        }
        if self.state.is_classified() {
            debug!("Interview already classified, ignoring input");
            return None;
        }

        self.transcript.append(Sender::User, text);

        let step = self
            .strategy
            .step(self.state, &mut self.profile, &self.transcript, text)
            .await;

        for reply in &step.replies {
            self.transcript.append(Sender::Assistant, reply.clone());
        }

        if step.next != self.state {
            debug!("Interview {:?} -> {:?}", self.state, step.next);
        }
        self.state = step.next;

        let classification = if self.state.is_classified() {
            let result = self.profile.classification();
            info!("Interview classified: {:?}", result);
            result
        } else {
            None
        };

        Some(Turn {
            replies: step.replies,
            state: self.state,
            classification,
        })
    }

    pub fn state(&self) -> InterviewState {
        self.state
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn transcript(&self) -> &MessageStorage {
        &self.transcript
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}
