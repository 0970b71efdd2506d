use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::AnalysisRepository;
use crate::domain::{AnalysisResult, DomainError};

/// Keeps analyses in insertion order for the lifetime of the process.
pub struct InMemoryAnalysisRepository {
    analyses: Arc<Mutex<Vec<AnalysisResult>>>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self {
            analyses: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for InMemoryAnalysisRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn save(&self, analysis: &AnalysisResult) -> Result<(), DomainError> {
        let mut analyses = self.analyses.lock().await;
        analyses.push(analysis.clone());
        debug!("Stored analysis {} ({} total)", analysis.analysis_id(), analyses.len());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AnalysisResult>, DomainError> {
        let analyses = self.analyses.lock().await;
        Ok(analyses.iter().find(|a| a.analysis_id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<AnalysisResult>, DomainError> {
        Ok(self.analyses.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisPayload, Gender, SymptomQuery};

    fn sample(symptom: &str) -> AnalysisResult {
        let query =
            SymptomQuery::new(vec![symptom.to_string()], 50, Gender::Male, "1 day", "mild")
                .unwrap();
        AnalysisResult::new(&query, AnalysisPayload::degraded("rest"))
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryAnalysisRepository::new();
        let first = sample("cough");
        let second = sample("fever");
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let found = repo.find_by_id(second.analysis_id()).await.unwrap();
        assert_eq!(found.as_ref(), Some(&second));

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].analysis_id(), first.analysis_id());
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let repo = InMemoryAnalysisRepository::new();
        assert!(repo.find_by_id("nope").await.unwrap().is_none());
    }
}
