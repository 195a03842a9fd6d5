use crate::interview::profile::UserProfile;
use crate::interview::state::InterviewState;
use crate::messages::MessageStorage;
use async_trait::async_trait;
use std::str::FromStr;

/// Which interview track a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterviewMode {
    /// Fixed-choice slot filling
    #[default]
    Scripted,
    /// Free text, classified through the classifier collaborator
    Assisted,
}

impl FromStr for InterviewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scripted" => Ok(InterviewMode::Scripted),
            "assisted" => Ok(InterviewMode::Assisted),
            other => Err(format!("Unknown interview mode: {}", other)),
        }
    }
}

/// Result of handling one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// State to move to
    pub next: InterviewState,
    /// Assistant turns to append, in order
    pub replies: Vec<String>,
}

impl Step {
    pub fn to(next: InterviewState, reply: impl Into<String>) -> Self {
        Self {
            next,
            replies: vec![reply.into()],
        }
    }

    /// Stay in `state` and repeat a prompt
    pub fn reprompt(state: InterviewState, reply: impl Into<String>) -> Self {
        Self::to(state, reply)
    }

    pub fn silent(next: InterviewState) -> Self {
        Self {
            next,
            replies: Vec::new(),
        }
    }
}

/// One way of classifying the user; chosen once at session start
#[async_trait]
pub trait InterviewStrategy: Send {
    /// State the session starts in
    fn initial_state(&self) -> InterviewState;

    /// First assistant turn of the session
    fn greeting(&self) -> &str;

    /// Handle a trimmed, non-empty utterance that is already in the transcript
    async fn step(
        &mut self,
        state: InterviewState,
        profile: &mut UserProfile,
        transcript: &MessageStorage,
        utterance: &str,
    ) -> Step;

    fn name(&self) -> &'static str;
}
