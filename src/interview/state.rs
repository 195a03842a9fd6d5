use serde::{Deserialize, Serialize};

/// Position of the session in the interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewState {
    AwaitingUserKind,
    AwaitingName,
    AwaitingDob,
    AwaitingPhone,
    AwaitingType,
    AwaitingEar,
    Classified,
}

impl InterviewState {
    pub fn is_classified(&self) -> bool {
        matches!(self, InterviewState::Classified)
    }
}

pub const SCRIPTED_GREETING: &str =
    "Welcome to Tinniease! Are you a new or existing user? (Type 'new' or 'existing')";
pub const ASSISTED_GREETING: &str =
    "Welcome to Tinniease! Tell me about the ringing or buzzing you hear: is it in one ear or both ears?";
pub const USER_KIND_REPROMPT: &str = "Please type 'new' or 'existing' to continue.";
pub const NEW_USER_NAME_PROMPT: &str = "Great! Let's get you set up. What's your name?";
pub const EXISTING_USER_PHONE_PROMPT: &str = "Welcome back! Please enter your phone number:";
pub const PHONE_PROMPT: &str = "What's your phone number?";
pub const TYPE_QUESTION: &str =
    "What type of tinnitus do you have?\n1. Bilateral Symmetric\n2. Bilateral Asymmetric\n3. Unilateral";
pub const TYPE_REPROMPT: &str = "Please enter a number between 1 and 3.";
pub const EAR_QUESTION: &str = "Which ear is affected? (Left/Right)";
pub const EAR_REPROMPT: &str = "Please enter 'Left' or 'Right'.";

pub fn dob_prompt(name: &str) -> String {
    format!("Nice to meet you, {}! What's your date of birth? (DD/MM/YYYY)", name)
}

pub fn returning_type_question() -> String {
    format!("Welcome back! {}", TYPE_QUESTION)
}
