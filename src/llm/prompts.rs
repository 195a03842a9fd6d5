//! Prompt text for the free-text interview

use crate::llm::context::ConversationMessage;

/// Persona line that opens every classifier prompt
pub const PERSONA: &str =
    "You are a helpful AI assistant specializing in tinnitus diagnosis and treatment. ";

/// Closing instructions appended after the conversation context
pub const INSTRUCTIONS: &str = "Please provide a natural, conversational response that helps diagnose the user's tinnitus condition. \
Ask relevant follow-up questions if needed, or provide appropriate recommendations based on the information provided.";

/// Reply used whenever the classifier cannot answer
pub const FALLBACK_REPLY: &str =
    "I apologize, but I'm having trouble processing your request right now. Could you please try again?";

/// Build the classifier prompt from the most recent turns
pub fn build_prompt(history: &[ConversationMessage]) -> String {
    let mut prompt = String::from(PERSONA);

    if !history.is_empty() {
        prompt.push_str("Based on our conversation so far: ");
        for msg in history {
            let speaker = match msg.role {
                crate::llm::MessageRole::User => "User",
                crate::llm::MessageRole::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {} ", speaker, msg.content));
        }
    }

    prompt.push_str(INSTRUCTIONS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_history() {
        let prompt = build_prompt(&[]);
        assert!(prompt.starts_with(PERSONA));
        assert!(!prompt.contains("Based on our conversation"));
        assert!(prompt.ends_with(INSTRUCTIONS));
    }

    #[test]
    fn test_prompt_renders_turns_in_order() {
        let history = vec![
            ConversationMessage::user("It rings in both ears"),
            ConversationMessage::assistant("Is it the same in each?"),
        ];
        let prompt = build_prompt(&history);

        let user_at = prompt.find("User: It rings in both ears ").unwrap();
        let assistant_at = prompt.find("Assistant: Is it the same in each? ").unwrap();
        assert!(user_at < assistant_at);
    }
}
