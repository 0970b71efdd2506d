use async_trait::async_trait;
use serde_json::json;

use crate::application::CompletionService;
use crate::domain::{DomainError, GenerationParams, Prompt};

const OFFLINE_TEXT: &str = "The AI service is not configured, so only general guidance is available. \
Keep track of your symptoms, stay hydrated and rest, avoid self-medication without professional \
guidance, and schedule an appointment with your primary care physician. Seek immediate medical \
attention for difficulty breathing, chest pain, a sudden severe headache, high fever, or any \
rapidly worsening symptoms.";

/// Deterministic stand-in for the completion service, used when no API key is
/// configured or `--offline` is passed.
///
/// Prompts that ask for the JSON analysis shape receive a generic structured
/// answer; everything else receives general plain-text guidance.
pub struct OfflineCompletion;

impl OfflineCompletion {
    pub fn new() -> Self {
        Self
    }

    fn structured_reply() -> String {
        json!({
            "preliminary_assessment": "Based on the symptoms provided, only general health information can be offered. For an accurate diagnosis, please consult a healthcare professional.",
            "possible_conditions": [
                {
                    "name": "General Health Consultation Needed",
                    "likelihood": "N/A",
                    "description": "Your symptoms require professional medical evaluation for accurate diagnosis."
                }
            ],
            "recommendations": [
                "Schedule an appointment with your primary care physician",
                "Keep track of your symptoms, noting any changes in severity or new symptoms",
                "Stay hydrated and get adequate rest",
                "Avoid self-medication without professional guidance"
            ],
            "urgency_level": "moderate",
            "when_to_seek_help": "Seek immediate medical attention if you experience difficulty breathing, chest pain, sudden severe headache, high fever, or any symptoms that are rapidly worsening."
        })
        .to_string()
    }
}

impl Default for OfflineCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for OfflineCompletion {
    async fn complete(
        &self,
        prompt: &Prompt,
        _params: GenerationParams,
    ) -> Result<String, DomainError> {
        if prompt.body().contains("\"preliminary_assessment\"") {
            Ok(Self::structured_reply())
        } else {
            Ok(OFFLINE_TEXT.to_string())
        }
    }

    fn model_name(&self) -> &str {
        "offline"
    }
}
