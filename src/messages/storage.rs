use super::types::{Message, Sender};
use std::sync::Arc;
use parking_lot::RwLock;

/// Append-only session transcript, shared between the interview worker and the UI
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    /// Append a turn, preserving call order
    pub fn append(&self, sender: Sender, text: impl Into<String>) {
        self.add(Message::new(sender, text));
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// The last `count` turns, oldest first
    pub fn recent(&self, count: usize) -> Vec<Message> {
        let messages = self.messages.read();
        let start = messages.len().saturating_sub(count);
        messages[start..].to_vec()
    }

    /// Lower-cased text of every user-authored turn
    pub fn user_corpus(&self) -> Vec<String> {
        self.messages
            .read()
            .iter()
            .filter(|m| m.is_user())
            .map(|m| m.text.to_lowercase())
            .collect()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let storage = MessageStorage::new();
        storage.append(Sender::Assistant, "first");
        storage.append(Sender::User, "second");
        storage.append(Sender::Assistant, "third");

        let texts: Vec<_> = storage.get_all().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_recent_window() {
        let storage = MessageStorage::new();
        for i in 0..5 {
            storage.append(Sender::User, format!("turn {}", i));
        }

        let recent = storage.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].text, "turn 2");
        assert_eq!(recent[2].text, "turn 4");

        assert_eq!(storage.recent(10).len(), 5);
    }

    #[test]
    fn test_user_corpus_skips_assistant_turns() {
        let storage = MessageStorage::new();
        storage.append(Sender::Assistant, "Is it in Both Ears?");
        storage.append(Sender::User, "Only my LEFT ear");

        assert_eq!(storage.user_corpus(), vec!["only my left ear".to_string()]);
    }

    #[test]
    fn test_clones_share_transcript() {
        let storage = MessageStorage::new();
        let view = storage.clone();
        storage.append(Sender::User, "hello");
        assert_eq!(view.len(), 1);
        assert!(!view.is_empty());
    }
}
