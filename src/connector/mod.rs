//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Text generation (Ollama over HTTP, plus a mock)
//! - Dataset loading (CSV)
//! - The command surface (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
