//! # Application Layer
//!
//! Use cases and the interfaces they depend on, coordinating the domain
//! with the connector layer.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
