use std::sync::Arc;

use tracing::info;

use crate::application::DatasetSource;
use crate::domain::{AppState, Dataset, DomainError};

/// Loads the dataset once at startup. A failure here is fatal for the
/// caller; there is no degraded mode without context.
pub struct LoadDatasetUseCase {
    source: Arc<dyn DatasetSource>,
}

impl LoadDatasetUseCase {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    pub fn execute(&self) -> Result<Dataset, DomainError> {
        let dataset = self.source.load()?;
        let (rows, columns) = dataset.shape();
        info!(
            "Loaded dataset {} with shape ({}, {})",
            self.source.describe(),
            rows,
            columns
        );
        Ok(dataset)
    }

    /// Load the dataset and wrap it in a fresh [`AppState`].
    pub fn initial_state(&self) -> Result<AppState, DomainError> {
        Ok(AppState::new(self.execute()?))
    }
}
