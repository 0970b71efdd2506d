mod groq_client;
mod in_memory_analysis_repository;
mod in_memory_session_store;
mod offline_completion;
mod pdf_text_extractor;

pub use groq_client::*;
pub use in_memory_analysis_repository::*;
pub use in_memory_session_store::*;
pub use offline_completion::*;
pub use pdf_text_extractor::*;
