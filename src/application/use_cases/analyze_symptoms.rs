use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::application::use_cases::completion_timeout::{complete_within, DEFAULT_REQUEST_TIMEOUT};
use crate::application::{AnalysisRepository, CompletionService};
use crate::domain::{
    AnalysisResult, DomainError, PromptBuilder, ResponseNormalizer, SymptomInput, SymptomQuery,
};

pub struct AnalyzeSymptomsUseCase {
    completion_service: Arc<dyn CompletionService>,
    analysis_repo: Option<Arc<dyn AnalysisRepository>>,
    timeout: Duration,
}

impl AnalyzeSymptomsUseCase {
    pub fn new(completion_service: Arc<dyn CompletionService>) -> Self {
        Self {
            completion_service,
            analysis_repo: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_repository(mut self, repo: Arc<dyn AnalysisRepository>) -> Self {
        self.analysis_repo = Some(repo);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate a raw submission, then analyze it.
    pub async fn execute(&self, input: SymptomInput) -> Result<AnalysisResult, DomainError> {
        let query = input.into_query()?;
        self.analyze(&query).await
    }

    pub async fn analyze(&self, query: &SymptomQuery) -> Result<AnalysisResult, DomainError> {
        info!(
            "Analyzing {} symptom(s) with {}",
            query.symptoms().len(),
            self.completion_service.model_name()
        );
        let start_time = Instant::now();

        let prompt = PromptBuilder::symptoms(query);
        let raw = complete_within(self.completion_service.as_ref(), &prompt, self.timeout).await?;

        let normalized = ResponseNormalizer::normalize(&raw);
        if normalized.is_degraded() {
            warn!("Symptom analysis fell back to a degraded response");
        }

        let result = AnalysisResult::new(query, normalized.into_payload());

        if let Some(ref repo) = self.analysis_repo {
            repo.save(&result).await?;
        }

        info!(
            "Analysis {} completed in {:.2}s (urgency: {})",
            result.analysis_id(),
            start_time.elapsed().as_secs_f64(),
            result.urgency_level()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::ScriptedCompletion;
    use crate::connector::InMemoryAnalysisRepository;
    use crate::domain::UrgencyLevel;

    fn input(symptoms: &[&str]) -> SymptomInput {
        SymptomInput {
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            age: 35,
            gender: "female".into(),
            duration: "2 days".into(),
            severity: "mild".into(),
            medical_history: None,
        }
    }

    #[tokio::test]
    async fn test_empty_symptoms_rejected_before_completion() {
        let completion = Arc::new(ScriptedCompletion::replying("{}"));
        let use_case = AnalyzeSymptomsUseCase::new(completion.clone());

        let err = use_case.execute(input(&[])).await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_structured_response_becomes_result() {
        let completion = Arc::new(ScriptedCompletion::replying(
            r#"{"preliminary_assessment":"rest and hydrate","urgency_level":"low","recommendations":["drink water"],"possible_conditions":[]}"#,
        ));
        let repo = Arc::new(InMemoryAnalysisRepository::new());
        let use_case =
            AnalyzeSymptomsUseCase::new(completion.clone()).with_repository(repo.clone());

        let result = use_case.execute(input(&["headache", "headache"])).await.unwrap();

        assert_eq!(result.urgency_level(), UrgencyLevel::Low);
        assert_eq!(result.recommendations(), &["drink water"]);
        assert_eq!(result.symptoms(), &["headache"]);
        assert_eq!(completion.calls(), 1);
        assert!(completion.prompts()[0].contains("headache"));

        let stored = repo.find_by_id(result.analysis_id()).await.unwrap();
        assert_eq!(stored.as_ref(), Some(&result));
    }

    #[tokio::test]
    async fn test_unparseable_response_degrades() {
        let completion = Arc::new(ScriptedCompletion::replying("Please see a doctor soon."));
        let use_case = AnalyzeSymptomsUseCase::new(completion);

        let result = use_case.execute(input(&["rash"])).await.unwrap();

        assert_eq!(result.preliminary_assessment(), "Please see a doctor soon.");
        assert_eq!(result.urgency_level(), UrgencyLevel::Moderate);
        assert!(result.recommendations().is_empty());
        assert!(result.possible_conditions().is_empty());
    }

    #[tokio::test]
    async fn test_slow_completion_times_out_as_transport_error() {
        let completion = Arc::new(
            ScriptedCompletion::replying("{}").with_delay(Duration::from_secs(5)),
        );
        let use_case =
            AnalyzeSymptomsUseCase::new(completion).with_timeout(Duration::from_millis(50));

        let err = use_case.execute(input(&["fever"])).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_provider_error_is_surfaced() {
        let completion = Arc::new(ScriptedCompletion::failing(|| {
            DomainError::provider(503, "unavailable")
        }));
        let use_case = AnalyzeSymptomsUseCase::new(completion);

        let err = use_case.execute(input(&["fever"])).await.unwrap_err();
        assert!(err.is_provider());
    }
}
