use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::DomainError;

/// A [`ChatClient`] that never touches the network.
///
/// Replies are served from a script in order; once the script is used up
/// each prompt gets a canned reply naming the question. A failing mock
/// returns [`DomainError::RequestFailed`] for every prompt. All prompts are
/// recorded for inspection.
pub struct MockChatClient {
    replies: Mutex<VecDeque<String>>,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            failure: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn canned_reply(prompt: &str) -> String {
        let question = prompt
            .rsplit_once("User: ")
            .map(|(_, rest)| rest.trim_end_matches("Assistant:").trim())
            .unwrap_or(prompt);
        format!("(mock) You asked: {}", question)
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts
            .lock()
            .map_err(|_| DomainError::internal("mock prompt log poisoned"))?
            .push(prompt.to_string());

        if let Some(message) = &self.failure {
            return Err(DomainError::request_failed(message.clone()));
        }

        let scripted = self
            .replies
            .lock()
            .map_err(|_| DomainError::internal("mock reply script poisoned"))?
            .pop_front();

        let reply = scripted.unwrap_or_else(|| Self::canned_reply(prompt));
        debug!("Mock reply of {} chars", reply.len());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_script_then_canned_reply() {
        let client = MockChatClient::with_replies(vec!["first".to_string()]);

        assert_eq!(client.generate("x").await.unwrap(), "first");
        assert_eq!(
            client.generate("ctx\n\nUser: how many?\nAssistant:").await.unwrap(),
            "(mock) You asked: how many?"
        );
        assert_eq!(client.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let client = MockChatClient::failing("boom");
        let err = client.generate("x").await.unwrap_err();
        assert!(err.is_request_failed());
        assert_eq!(client.prompts(), vec!["x".to_string()]);
    }
}
