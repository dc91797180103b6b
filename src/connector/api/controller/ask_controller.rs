use anyhow::{bail, Result};

use crate::AppState;

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// One-shot question. The reply, or the diagnostic that replaced it, is
    /// the output; nothing is kept after the process exits.
    pub async fn ask(&self, question: String, state: &AppState) -> Result<String> {
        if question.trim().is_empty() {
            bail!("question must not be empty");
        }

        let use_case = self.container.ask_use_case();
        Ok(use_case.execute(&question, state.context_sample()).await)
    }
}
