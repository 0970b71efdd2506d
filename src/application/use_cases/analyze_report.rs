use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::application::use_cases::completion_timeout::{complete_within, DEFAULT_REQUEST_TIMEOUT};
use crate::application::{CompletionService, DocumentTextExtractor};
use crate::domain::{DocumentKind, DomainError, PromptBuilder, ReportAnalysis};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct AnalyzeReportUseCase {
    completion_service: Arc<dyn CompletionService>,
    extractor: Arc<dyn DocumentTextExtractor>,
    max_upload_bytes: usize,
    timeout: Duration,
}

impl AnalyzeReportUseCase {
    pub fn new(
        completion_service: Arc<dyn CompletionService>,
        extractor: Arc<dyn DocumentTextExtractor>,
    ) -> Self {
        Self {
            completion_service,
            extractor,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<ReportAnalysis, DomainError> {
        self.validate_upload(filename, bytes)?;

        info!("Analyzing report {} ({} bytes)", filename, bytes.len());
        let start_time = Instant::now();

        // PDF parsing is CPU bound; keep it off the async workers.
        let extractor = Arc::clone(&self.extractor);
        let data = bytes.to_vec();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract_text(&data))
            .await
            .map_err(|e| DomainError::internal(format!("Extraction task failed: {e}")))??;

        let extracted = extracted.trim().to_string();
        if extracted.is_empty() {
            return Err(DomainError::invalid_input(
                "Could not extract text from the uploaded document",
            ));
        }
        debug!("Extracted {} characters from {}", extracted.chars().count(), filename);

        let prompt = PromptBuilder::report(&extracted);
        let analysis =
            complete_within(self.completion_service.as_ref(), &prompt, self.timeout).await?;

        info!(
            "Report {} analyzed in {:.2}s",
            filename,
            start_time.elapsed().as_secs_f64()
        );

        Ok(ReportAnalysis::new(filename, extracted, analysis.trim()))
    }

    fn validate_upload(&self, filename: &str, bytes: &[u8]) -> Result<(), DomainError> {
        if !DocumentKind::from_filename(filename).is_supported() {
            return Err(DomainError::invalid_input(format!(
                "Unsupported file type for '{}': only PDF files are supported",
                filename
            )));
        }

        if bytes.is_empty() {
            return Err(DomainError::invalid_input("Uploaded file is empty"));
        }

        if bytes.len() > self.max_upload_bytes {
            return Err(DomainError::invalid_input(format!(
                "File is too large ({} bytes, limit {} bytes)",
                bytes.len(),
                self.max_upload_bytes
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::ScriptedCompletion;

    struct FixedText(&'static str);

    impl DocumentTextExtractor for FixedText {
        fn extract_text(&self, _bytes: &[u8]) -> Result<String, DomainError> {
            Ok(self.0.to_string())
        }
    }

    struct Unreadable;

    impl DocumentTextExtractor for Unreadable {
        fn extract_text(&self, _bytes: &[u8]) -> Result<String, DomainError> {
            Err(DomainError::extraction("not a PDF"))
        }
    }

    #[tokio::test]
    async fn test_report_is_summarized() {
        let completion = Arc::new(ScriptedCompletion::replying("  Your results look normal.\n"));
        let use_case = AnalyzeReportUseCase::new(
            completion.clone(),
            Arc::new(FixedText("Hemoglobin 13.5 g/dL")),
        );

        let report = use_case.execute("labs.pdf", b"%PDF-1.4").await.unwrap();

        assert_eq!(report.filename(), "labs.pdf");
        assert_eq!(report.analysis(), "Your results look normal.");
        assert_eq!(report.extracted_text(), "Hemoglobin 13.5 g/dL");
        assert!(completion.prompts()[0].contains("Hemoglobin 13.5 g/dL"));
    }

    #[tokio::test]
    async fn test_unsupported_file_type_rejected() {
        let completion = Arc::new(ScriptedCompletion::replying("ok"));
        let use_case = AnalyzeReportUseCase::new(completion.clone(), Arc::new(FixedText("x")));

        let err = use_case.execute("labs.docx", b"data").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_file_rejected() {
        let completion = Arc::new(ScriptedCompletion::replying("ok"));
        let use_case = AnalyzeReportUseCase::new(completion.clone(), Arc::new(FixedText("x")))
            .with_max_upload_bytes(4);

        let err = use_case.execute("labs.pdf", b"%PDF-1.4").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_extraction_rejected() {
        let completion = Arc::new(ScriptedCompletion::replying("ok"));
        let use_case = AnalyzeReportUseCase::new(completion.clone(), Arc::new(FixedText("  \n ")));

        let err = use_case.execute("scan.pdf", b"%PDF-1.4").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_extraction_failure_propagates() {
        let completion = Arc::new(ScriptedCompletion::replying("ok"));
        let use_case = AnalyzeReportUseCase::new(completion, Arc::new(Unreadable));

        let err = use_case.execute("broken.pdf", b"garbage").await.unwrap_err();
        assert!(matches!(err, DomainError::Extraction(_)));
    }
}
