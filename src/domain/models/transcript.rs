use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ChatMessage;

/// Ordered messages of one conversation, oldest first.
///
/// The only mutation is [`Transcript::push`]. Alternating roles are not
/// enforced; two user messages in a row are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    id: String,
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// First user message, shortened to `max_chars`, for listing archived chats.
    pub fn title(&self, max_chars: usize) -> Option<String> {
        let first = self.messages.iter().find(|m| m.is_user())?;
        let content = first.content().trim();
        if content.chars().count() <= max_chars {
            return Some(content.to_string());
        }
        let shortened: String = content.chars().take(max_chars).collect();
        Some(format!("{}...", shortened.trim_end()))
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("a"));
        transcript.push(ChatMessage::user("b"));
        transcript.push(ChatMessage::assistant("c"));

        let contents: Vec<_> = transcript.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_new_transcripts_have_distinct_ids() {
        assert_ne!(Transcript::new().id(), Transcript::new().id());
    }

    #[test]
    fn test_title_uses_first_user_message() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.title(10), None);

        transcript.push(ChatMessage::assistant("ignored"));
        transcript.push(ChatMessage::user("What is the average price?"));

        assert_eq!(transcript.title(100).as_deref(), Some("What is the average price?"));
        assert_eq!(transcript.title(7).as_deref(), Some("What is..."));
    }
}
