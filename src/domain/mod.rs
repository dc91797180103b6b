//! # Domain Layer
//!
//! Chat messages, transcripts, the loaded dataset and the application state.
//! This layer is independent of HTTP, CSV parsing and the terminal.

mod error;
pub mod models;

pub use error::*;
pub use models::*;
