use anyhow::Result;

use crate::AppState;

pub struct SampleController;

impl SampleController {
    pub fn new() -> Self {
        Self
    }

    pub fn sample(&self, state: &AppState) -> Result<String> {
        let (rows, columns) = state.dataset().shape();
        Ok(format!(
            "Dataset {} ({} rows, {} columns)\n\n{}",
            state.dataset().source(),
            rows,
            columns,
            state.context_sample()
        ))
    }
}

impl Default for SampleController {
    fn default() -> Self {
        Self::new()
    }
}
