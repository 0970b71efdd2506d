use async_trait::async_trait;

use crate::domain::{AnalysisResult, DomainError};

/// Keeps completed symptom analyses so they can be listed and fetched again.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn save(&self, analysis: &AnalysisResult) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AnalysisResult>, DomainError>;

    /// All stored analyses, oldest first.
    async fn list(&self) -> Result<Vec<AnalysisResult>, DomainError>;
}
