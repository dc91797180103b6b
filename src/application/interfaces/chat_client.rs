use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending a prompt to a text-generation server.
///
/// Implementors encapsulate transport, serialization and stream decoding.
/// They return whatever text the server produced, which may be empty;
/// turning an empty or failed generation into displayable text is the job
/// of [`crate::application::AskQuestionUseCase`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
