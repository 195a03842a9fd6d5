//! Fixed-choice interview track

use crate::interview::profile::{Ear, TinnitusType, UserProfile};
use crate::interview::state::{self, InterviewState};
use crate::interview::strategy::{InterviewStrategy, Step};
use crate::messages::MessageStorage;
use async_trait::async_trait;
use tracing::debug;

/// Deterministic slot filling: user kind, details, type menu, ear
#[derive(Debug, Default)]
pub struct ScriptedStrategy;

impl ScriptedStrategy {
    pub fn new() -> Self {
        Self
    }

    fn user_kind(profile: &mut UserProfile, utterance: &str) -> Step {
        match utterance.to_lowercase().as_str() {
            "new" => {
                profile.is_new_user = Some(true);
                Step::to(InterviewState::AwaitingName, state::NEW_USER_NAME_PROMPT)
            }
            "existing" => {
                profile.is_new_user = Some(false);
                Step::to(InterviewState::AwaitingPhone, state::EXISTING_USER_PHONE_PROMPT)
            }
            _ => Step::reprompt(InterviewState::AwaitingUserKind, state::USER_KIND_REPROMPT),
        }
    }

    fn tinnitus_type(profile: &mut UserProfile, utterance: &str) -> Step {
        let choice = utterance.parse::<i64>().ok().and_then(TinnitusType::from_choice);

        match choice {
            Some(TinnitusType::Unilateral) => {
                profile.tinnitus_type = Some(TinnitusType::Unilateral);
                Step::to(InterviewState::AwaitingEar, state::EAR_QUESTION)
            }
            Some(kind) => {
                profile.tinnitus_type = Some(kind);
                Step::silent(InterviewState::Classified)
            }
            None => {
                debug!("Rejected type choice: {:?}", utterance);
                Step::reprompt(InterviewState::AwaitingType, state::TYPE_REPROMPT)
            }
        }
    }

    fn ear(profile: &mut UserProfile, utterance: &str) -> Step {
        match Ear::parse(utterance) {
            Some(ear) => {
                profile.affected_ear = Some(ear);
                Step::silent(InterviewState::Classified)
            }
            None => Step::reprompt(InterviewState::AwaitingEar, state::EAR_REPROMPT),
        }
    }
}

#[async_trait]
impl InterviewStrategy for ScriptedStrategy {
    fn initial_state(&self) -> InterviewState {
        InterviewState::AwaitingUserKind
    }

    fn greeting(&self) -> &str {
        state::SCRIPTED_GREETING
    }

    async fn step(
        &mut self,
        current: InterviewState,
        profile: &mut UserProfile,
        _transcript: &MessageStorage,
        utterance: &str,
    ) -> Step {
        match current {
            InterviewState::AwaitingUserKind => Self::user_kind(profile, utterance),
            InterviewState::AwaitingName => {
                profile.name = utterance.to_string();
                Step::to(InterviewState::AwaitingDob, state::dob_prompt(utterance))
            }
            InterviewState::AwaitingDob => {
                profile.date_of_birth = utterance.to_string();
                Step::to(InterviewState::AwaitingPhone, state::PHONE_PROMPT)
            }
            InterviewState::AwaitingPhone => {
                profile.phone_number = utterance.to_string();
                let question = if profile.is_new_user == Some(false) {
                    state::returning_type_question()
                } else {
                    state::TYPE_QUESTION.to_string()
                };
                Step::to(InterviewState::AwaitingType, question)
            }
            InterviewState::AwaitingType => Self::tinnitus_type(profile, utterance),
            InterviewState::AwaitingEar => Self::ear(profile, utterance),
            InterviewState::Classified => Step::silent(InterviewState::Classified),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
