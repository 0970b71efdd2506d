//! Pure domain services: prompt assembly and model-output normalization.

mod prompt_builder;
mod response_normalizer;

pub use prompt_builder::*;
pub use response_normalizer::*;
