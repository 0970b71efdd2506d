use std::sync::Arc;

use crate::application::AnalysisRepository;
use crate::domain::{AnalysisResult, DomainError};

pub struct ListAnalysesUseCase {
    analysis_repo: Arc<dyn AnalysisRepository>,
}

impl ListAnalysesUseCase {
    pub fn new(analysis_repo: Arc<dyn AnalysisRepository>) -> Self {
        Self { analysis_repo }
    }

    pub async fn execute(&self) -> Result<Vec<AnalysisResult>, DomainError> {
        self.analysis_repo.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AnalysisResult, DomainError> {
        self.analysis_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Analysis not found: {}", id)))
    }
}
