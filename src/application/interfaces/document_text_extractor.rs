use crate::domain::DomainError;

/// Pulls plain text out of an uploaded document.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, DomainError>;
}
