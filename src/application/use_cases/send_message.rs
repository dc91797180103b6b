use std::sync::Arc;

use tracing::debug;

use crate::application::{AskQuestionUseCase, ChatClient};
use crate::domain::{AppState, ChatMessage, DomainError};

/// One chat turn: record the question, ask the model, record the reply.
pub struct SendMessageUseCase {
    ask: AskQuestionUseCase,
}

impl SendMessageUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            ask: AskQuestionUseCase::new(chat_client),
        }
    }

    /// Returns the assistant message that was appended. Only blank input is
    /// an error; model failures come back as diagnostic reply text.
    pub async fn execute(
        &self,
        state: &mut AppState,
        text: &str,
    ) -> Result<ChatMessage, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::invalid_input("message is empty"));
        }

        state.append(ChatMessage::user(text));

        let reply = self.ask.execute(text, state.context_sample()).await;
        let message = ChatMessage::assistant(reply);
        state.append(message.clone());

        debug!(
            "Transcript {} now has {} messages",
            state.active().id(),
            state.active().len()
        );

        Ok(message)
    }
}
