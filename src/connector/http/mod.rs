//! HTTP API exposing the analysis use cases as JSON endpoints.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::{api_router, serve};
