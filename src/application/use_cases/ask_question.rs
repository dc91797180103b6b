use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::ChatClient;

/// Prefix of every diagnostic shown in place of a model reply.
pub const WARNING_MARKER: &str = "⚠️";

/// Shown when the stream finished without a single text delta.
pub const NO_RESPONSE_TEXT: &str = "⚠️ No response from Ollama";

const SYSTEM_PREAMBLE: &str = "You are a helpful assistant. Here is some dataset context:";

/// Asks the model one question about the dataset.
///
/// Never fails: transport errors and empty generations are turned into
/// text that can go straight into the transcript.
pub struct AskQuestionUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl AskQuestionUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn build_prompt(user_message: &str, context_sample: &str) -> String {
        format!("{SYSTEM_PREAMBLE}\n{context_sample}\n\nUser: {user_message}\nAssistant:")
    }

    pub async fn execute(&self, user_message: &str, context_sample: &str) -> String {
        let prompt = Self::build_prompt(user_message, context_sample);
        debug!("Prompt is {} bytes", prompt.len());

        let start_time = Instant::now();
        match self.chat_client.generate(&prompt).await {
            Ok(text) if text.is_empty() => {
                warn!("Generation finished without any text");
                NO_RESPONSE_TEXT.to_string()
            }
            Ok(text) => {
                info!(
                    "Received {} chars in {:.2?}",
                    text.chars().count(),
                    start_time.elapsed()
                );
                text
            }
            Err(e) => {
                warn!("Generation failed after {:.2?}: {}", start_time.elapsed(), e);
                format!("{WARNING_MARKER} {e}")
            }
        }
    }
}
