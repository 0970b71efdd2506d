pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AnalysisRepository, AnalyzeReportUseCase, AnalyzeSymptomsUseCase, CompletionService,
    DocumentTextExtractor, HealthChatUseCase, ListAnalysesUseCase, SessionStore,
};

pub use cli::{Commands, OutputFormat};

pub use connector::{
    Container, ContainerConfig, GroqClient, InMemoryAnalysisRepository, InMemorySessionStore,
    OfflineCompletion, PdfTextExtractor, Router,
};

pub use domain::*;
