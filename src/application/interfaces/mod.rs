mod analysis_repository;
mod completion_service;
mod document_text_extractor;
mod session_store;

pub use analysis_repository::*;
pub use completion_service::*;
pub use document_text_extractor::*;
pub use session_store::*;
