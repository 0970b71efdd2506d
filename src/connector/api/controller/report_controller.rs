use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::ReportAnalysis;

use super::super::Container;

pub struct ReportController<'a> {
    container: &'a Container,
}

impl<'a> ReportController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn report(&self, path: String, format: OutputFormat) -> Result<String> {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path))?;
        let filename = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or(path);

        let use_case = self.container.analyze_report_use_case();
        let report = use_case.execute(&filename, &bytes).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            OutputFormat::Text => self.format_report(&report),
        })
    }

    fn format_report(&self, report: &ReportAnalysis) -> String {
        format!(
            "Report analysis for {}\n\
             ─────────────────────────────────────────\n\
             {}\n\n\
             {}",
            report.filename(),
            report.analysis(),
            report.disclaimer()
        )
    }
}
