use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const REPORT_DISCLAIMER: &str = "This analysis is for informational purposes only. Please discuss \
these results with your healthcare provider.";

/// Summary of an uploaded medical report.
///
/// The extracted text lives only as long as the value itself and is never
/// serialized back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    analysis_id: String,
    timestamp: DateTime<Utc>,
    filename: String,
    #[serde(skip)]
    extracted_text: String,
    analysis: String,
    disclaimer: String,
}

impl ReportAnalysis {
    pub fn new(
        filename: impl Into<String>,
        extracted_text: impl Into<String>,
        analysis: impl Into<String>,
    ) -> Self {
        Self {
            analysis_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            filename: filename.into(),
            extracted_text: extracted_text.into(),
            analysis: analysis.into(),
            disclaimer: REPORT_DISCLAIMER.to_string(),
        }
    }

    pub fn analysis_id(&self) -> &str {
        &self.analysis_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    pub fn analysis(&self) -> &str {
        &self.analysis
    }

    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }
}

/// Document formats accepted for report analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Unsupported,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        match Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DocumentKind::Unsupported)
    }
}
