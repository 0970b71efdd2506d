use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::application::{
    AnalysisRepository, AnalyzeReportUseCase, AnalyzeSymptomsUseCase, CompletionService,
    DocumentTextExtractor, HealthChatUseCase, ListAnalysesUseCase, SessionStore,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_REQUEST_TIMEOUT,
};
use crate::connector::adapter::{
    GroqClient, InMemoryAnalysisRepository, InMemorySessionStore, OfflineCompletion,
    PdfTextExtractor, DEFAULT_HTTP_TIMEOUT,
};

pub struct ContainerConfig {
    /// Use the canned offline completion instead of the remote API.
    pub offline: bool,
    /// Upper bound on a single completion call, network round trip included.
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            offline: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub struct Container {
    completion_service: Arc<dyn CompletionService>,
    extractor: Arc<dyn DocumentTextExtractor>,
    analysis_repo: Arc<dyn AnalysisRepository>,
    session_store: Arc<dyn SessionStore>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let completion_service: Arc<dyn CompletionService> = if config.offline {
            info!("Using offline completion service");
            Arc::new(OfflineCompletion::new())
        } else {
            match GroqClient::from_env(DEFAULT_HTTP_TIMEOUT.min(config.request_timeout))? {
                Some(client) => {
                    info!(
                        "Using completion API at {} (model {})",
                        client.url(),
                        client.model_name()
                    );
                    Arc::new(client)
                }
                None => {
                    warn!("GROQ_API_KEY is not set. Falling back to the offline completion service.");
                    Arc::new(OfflineCompletion::new())
                }
            }
        };

        Ok(Self::with_services(
            config,
            completion_service,
            Arc::new(PdfTextExtractor::new()),
        ))
    }

    /// Build a container around explicit services, with fresh in-memory stores.
    pub fn with_services(
        config: ContainerConfig,
        completion_service: Arc<dyn CompletionService>,
        extractor: Arc<dyn DocumentTextExtractor>,
    ) -> Self {
        Self {
            completion_service,
            extractor,
            analysis_repo: Arc::new(InMemoryAnalysisRepository::new()),
            session_store: Arc::new(InMemorySessionStore::new()),
            config,
        }
    }

    pub fn analyze_symptoms_use_case(&self) -> AnalyzeSymptomsUseCase {
        AnalyzeSymptomsUseCase::new(self.completion_service.clone())
            .with_repository(self.analysis_repo.clone())
            .with_timeout(self.config.request_timeout)
    }

    pub fn analyze_report_use_case(&self) -> AnalyzeReportUseCase {
        AnalyzeReportUseCase::new(self.completion_service.clone(), self.extractor.clone())
            .with_max_upload_bytes(self.config.max_upload_bytes)
            .with_timeout(self.config.request_timeout)
    }

    pub fn chat_use_case(&self) -> HealthChatUseCase {
        HealthChatUseCase::new(self.completion_service.clone())
            .with_session_store(self.session_store.clone())
            .with_timeout(self.config.request_timeout)
    }

    pub fn list_analyses_use_case(&self) -> ListAnalysesUseCase {
        ListAnalysesUseCase::new(self.analysis_repo.clone())
    }

    pub fn model_name(&self) -> &str {
        self.completion_service.model_name()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.config.max_upload_bytes
    }
}
