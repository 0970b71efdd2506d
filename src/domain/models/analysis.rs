use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::SymptomQuery;

pub const ANALYSIS_DISCLAIMER: &str = "This analysis is for informational purposes only and does not \
constitute medical advice. Always consult a qualified healthcare provider for proper diagnosis and \
treatment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Moderate,
    High,
    Emergency,
}

impl UrgencyLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(UrgencyLevel::Low),
            "moderate" | "medium" => Some(UrgencyLevel::Moderate),
            "high" => Some(UrgencyLevel::High),
            "emergency" => Some(UrgencyLevel::Emergency),
            _ => None,
        }
    }

    /// Map model output onto the fixed urgency scale.
    ///
    /// Unrecognised or missing values become `Moderate`. This is a placeholder
    /// policy pending product sign-off, so every coercion is logged.
    pub fn coerce(value: Option<&str>) -> Self {
        match value {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                warn!(
                    "Unknown urgency level '{}' in model output, coercing to moderate",
                    raw
                );
                UrgencyLevel::Moderate
            }),
            None => {
                warn!("Model output has no urgency level, defaulting to moderate");
                UrgencyLevel::Moderate
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Moderate => "moderate",
            UrgencyLevel::High => "high",
            UrgencyLevel::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PossibleCondition {
    pub name: String,
    pub likelihood: String,
    pub description: String,
}

/// The model-derived part of an analysis, after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPayload {
    pub preliminary_assessment: String,
    pub urgency_level: UrgencyLevel,
    pub recommendations: Vec<String>,
    pub possible_conditions: Vec<PossibleCondition>,
    pub when_to_seek_help: Option<String>,
}

impl AnalysisPayload {
    /// Degraded shape: the whole raw text becomes the assessment.
    pub fn degraded(raw: &str) -> Self {
        Self {
            preliminary_assessment: raw.trim().to_string(),
            urgency_level: UrgencyLevel::Moderate,
            recommendations: Vec::new(),
            possible_conditions: Vec::new(),
            when_to_seek_help: None,
        }
    }
}

/// Outcome of normalizing raw model text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedResponse {
    Structured(AnalysisPayload),
    Degraded(String),
}

impl NormalizedResponse {
    pub fn is_degraded(&self) -> bool {
        matches!(self, NormalizedResponse::Degraded(_))
    }

    pub fn into_payload(self) -> AnalysisPayload {
        match self {
            NormalizedResponse::Structured(payload) => payload,
            NormalizedResponse::Degraded(raw) => AnalysisPayload::degraded(&raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    analysis_id: String,
    timestamp: DateTime<Utc>,
    symptoms: Vec<String>,
    preliminary_assessment: String,
    possible_conditions: Vec<PossibleCondition>,
    recommendations: Vec<String>,
    urgency_level: UrgencyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    when_to_seek_help: Option<String>,
    disclaimer: String,
}

impl AnalysisResult {
    pub fn new(query: &SymptomQuery, payload: AnalysisPayload) -> Self {
        Self {
            analysis_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            symptoms: query.symptoms().to_vec(),
            preliminary_assessment: payload.preliminary_assessment,
            possible_conditions: payload.possible_conditions,
            recommendations: payload.recommendations,
            urgency_level: payload.urgency_level,
            when_to_seek_help: payload.when_to_seek_help,
            disclaimer: ANALYSIS_DISCLAIMER.to_string(),
        }
    }

    pub fn analysis_id(&self) -> &str {
        &self.analysis_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn preliminary_assessment(&self) -> &str {
        &self.preliminary_assessment
    }

    pub fn possible_conditions(&self) -> &[PossibleCondition] {
        &self.possible_conditions
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn urgency_level(&self) -> UrgencyLevel {
        self.urgency_level
    }

    pub fn when_to_seek_help(&self) -> Option<&str> {
        self.when_to_seek_help.as_deref()
    }

    pub fn disclaimer(&self) -> &str {
        &self.disclaimer
    }

    pub fn is_urgent(&self) -> bool {
        matches!(
            self.urgency_level,
            UrgencyLevel::High | UrgencyLevel::Emergency
        )
    }
}
