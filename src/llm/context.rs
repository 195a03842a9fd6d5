//! Conversation history handed to the classifier

use crate::messages::{Message, Sender};
use serde::{Deserialize, Serialize};

/// Role of a message in the conversation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl From<Sender> for MessageRole {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => MessageRole::User,
            Sender::Assistant => MessageRole::Assistant,
        }
    }
}

/// A single message in the classifier context
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Convert transcript turns into classifier context, keeping order
    pub fn from_transcript(turns: &[Message]) -> Vec<Self> {
        turns
            .iter()
            .map(|m| Self::new(m.sender.into(), m.text.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transcript_maps_roles() {
        let turns = vec![Message::assistant("Hi"), Message::user("Both ears")];
        let context = ConversationMessage::from_transcript(&turns);

        assert_eq!(
            context,
            vec![
                ConversationMessage::assistant("Hi"),
                ConversationMessage::user("Both ears"),
            ]
        );
        assert_eq!(context[1].role.as_str(), "user");
    }
}
