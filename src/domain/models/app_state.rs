use tracing::debug;

use super::{ChatMessage, Dataset, Transcript};
use crate::domain::DomainError;

/// Everything a chat session needs, owned in one place and passed by
/// reference to each handler.
///
/// Created once at startup from a loaded [`Dataset`]. The only transitions
/// are [`AppState::append`], [`AppState::new_chat`] and
/// [`AppState::open_chat`]; nothing resets it implicitly.
#[derive(Debug)]
pub struct AppState {
    dataset: Dataset,
    context_sample: String,
    active: Transcript,
    history: Vec<Transcript>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let context_sample = dataset.context_sample();
        Self {
            dataset,
            context_sample,
            active: Transcript::new(),
            history: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn context_sample(&self) -> &str {
        &self.context_sample
    }

    pub fn active(&self) -> &Transcript {
        &self.active
    }

    pub fn history(&self) -> &[Transcript] {
        &self.history
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.active.push(message);
    }

    /// Archive the active transcript (when it has messages) and start an
    /// empty one.
    pub fn new_chat(&mut self) {
        let previous = std::mem::take(&mut self.active);
        self.archive(previous);
    }

    /// Make a copy of archived chat `number` (1-based) the active transcript.
    ///
    /// The current transcript is archived first under the same rule as
    /// [`AppState::new_chat`]. The archived copy itself is never touched.
    pub fn open_chat(&mut self, number: usize) -> Result<&Transcript, DomainError> {
        let index = number
            .checked_sub(1)
            .filter(|i| *i < self.history.len())
            .ok_or_else(|| DomainError::not_found(format!("No chat numbered {}", number)))?;

        let recalled = self.history[index].clone();
        let previous = std::mem::replace(&mut self.active, recalled);
        self.archive(previous);

        Ok(&self.active)
    }

    fn archive(&mut self, transcript: Transcript) {
        if transcript.is_empty() {
            return;
        }
        // A recalled chat that was not extended is already in history.
        if self.history.iter().any(|t| *t == transcript) {
            debug!("Transcript {} unchanged since recall, not archived again", transcript.id());
            return;
        }
        debug!(
            "Archiving transcript {} with {} messages",
            transcript.id(),
            transcript.len()
        );
        self.history.push(transcript);
    }
}
