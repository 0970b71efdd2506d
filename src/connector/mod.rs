//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion API client (Groq, OpenAI-compatible) and an offline stand-in
//! - PDF text extraction
//! - In-memory session and analysis stores
//! - CLI controllers and the HTTP API

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
pub use api::{Container, ContainerConfig, Router};
