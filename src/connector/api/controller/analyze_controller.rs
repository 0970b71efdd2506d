use anyhow::Result;

use crate::cli::OutputFormat;
use crate::{AnalysisResult, SymptomInput};

use super::super::Container;

pub struct AnalyzeController<'a> {
    container: &'a Container,
}

impl<'a> AnalyzeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn analyze(&self, input: SymptomInput, format: OutputFormat) -> Result<String> {
        let use_case = self.container.analyze_symptoms_use_case();
        let result = use_case.execute(input).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            OutputFormat::Text => self.format_analysis(&result),
        })
    }

    fn format_analysis(&self, result: &AnalysisResult) -> String {
        let mut output = format!(
            "Symptom analysis {}\n\
             ─────────────────────────────────────────\n\
             Symptoms : {}\n\
             Urgency  : {}\n\n\
             {}\n",
            result.analysis_id(),
            result.symptoms().join(", "),
            result.urgency_level().as_str().to_uppercase(),
            result.preliminary_assessment()
        );

        if result.is_urgent() {
            output.push_str("\n!! This may need prompt medical attention. Do not wait for symptoms to worsen.\n");
        }

        if !result.possible_conditions().is_empty() {
            output.push_str("\nPossible conditions:\n");
            for condition in result.possible_conditions() {
                output.push_str(&format!(
                    "  - {} (likelihood: {})\n",
                    condition.name, condition.likelihood
                ));
                if !condition.description.is_empty() {
                    output.push_str(&format!("      {}\n", condition.description));
                }
            }
        }

        if !result.recommendations().is_empty() {
            output.push_str("\nRecommendations:\n");
            for (i, recommendation) in result.recommendations().iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
            }
        }

        if let Some(signs) = result.when_to_seek_help() {
            output.push_str(&format!("\nWhen to seek help: {}\n", signs));
        }

        output.push_str(&format!("\n{}", result.disclaimer()));
        output
    }
}
