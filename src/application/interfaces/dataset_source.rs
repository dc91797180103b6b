use crate::domain::{Dataset, DomainError};

/// Loads the tabular dataset whose head is used as prompt context.
pub trait DatasetSource: Send + Sync {
    /// Any failure is reported as [`DomainError::DatasetLoad`].
    fn load(&self) -> Result<Dataset, DomainError>;

    /// Human readable location, for log lines.
    fn describe(&self) -> String;
}
