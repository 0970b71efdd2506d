use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{AnalysisPayload, NormalizedResponse, PossibleCondition, UrgencyLevel};

pub const DEFAULT_ASSESSMENT: &str = "Analysis complete";

/// Turns raw completion text into the fixed analysis schema.
///
/// A strict JSON-object parse is tried first. Anything that does not parse is
/// returned as [`NormalizedResponse::Degraded`] carrying the raw text; this is
/// a quality downgrade, not an error, and it never triggers another call.
pub struct ResponseNormalizer;

/// Wire shape of the model's JSON answer. Fields are untyped so that a missing
/// or wrongly typed value is defaulted per field instead of failing the parse.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    preliminary_assessment: Option<Value>,
    urgency_level: Option<Value>,
    recommendations: Option<Value>,
    possible_conditions: Option<Value>,
    when_to_seek_help: Option<Value>,
}

impl ResponseNormalizer {
    pub fn normalize(raw: &str) -> NormalizedResponse {
        let candidate = Self::extract_json_object(raw);

        let parsed = candidate.and_then(|json| match serde_json::from_str::<RawAnalysis>(json) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!("Model output is not a valid analysis object: {e}");
                None
            }
        });

        match parsed {
            Some(parsed) => NormalizedResponse::Structured(Self::validate(parsed)),
            None => {
                warn!(
                    "Could not parse structured analysis from model output ({} chars), using degraded response",
                    raw.len()
                );
                NormalizedResponse::Degraded(raw.trim().to_string())
            }
        }
    }

    /// Locate the JSON object inside the model output.
    ///
    /// Handles fenced blocks (```json ... ``` or bare ```), then falls back to
    /// the span between the first `{` and the last `}` to tolerate stray prose.
    /// A fence that holds no object (a prose note, say) is ignored and the
    /// whole text is searched instead.
    fn extract_json_object(text: &str) -> Option<&str> {
        let fenced = if let Some(start) = text.find("```json") {
            let rest = &text[start + "```json".len()..];
            Some(rest.find("```").map_or(rest, |end| &rest[..end]))
        } else if let Some(start) = text.find("```") {
            let rest = &text[start + 3..];
            Some(rest.find("```").map_or(rest, |end| &rest[..end]))
        } else {
            None
        };

        fenced
            .and_then(Self::object_span)
            .or_else(|| Self::object_span(text))
    }

    /// Span from the first `{` to the last `}`.
    fn object_span(body: &str) -> Option<&str> {
        let start = body.find('{')?;
        let end = body.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&body[start..=end])
    }

    fn validate(raw: RawAnalysis) -> AnalysisPayload {
        let preliminary_assessment = match raw.preliminary_assessment {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::String(_)) | None => DEFAULT_ASSESSMENT.to_string(),
            Some(other) => {
                warn!("Ignoring non-text preliminary_assessment: {other}");
                DEFAULT_ASSESSMENT.to_string()
            }
        };

        let urgency_level = match &raw.urgency_level {
            None | Some(Value::Null) => UrgencyLevel::coerce(None),
            Some(Value::String(s)) => UrgencyLevel::coerce(Some(s.as_str())),
            Some(other) => UrgencyLevel::coerce(Some(other.to_string().as_str())),
        };

        let recommendations = Self::list(raw.recommendations)
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .collect();

        let possible_conditions = Self::list(raw.possible_conditions)
            .iter()
            .filter_map(Self::parse_condition)
            .collect();

        let when_to_seek_help = match raw.when_to_seek_help {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Array(items)) => {
                let signs: Vec<String> = items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect();
                (!signs.is_empty()).then(|| signs.join("; "))
            }
            _ => None,
        };

        AnalysisPayload {
            preliminary_assessment,
            urgency_level,
            recommendations,
            possible_conditions,
            when_to_seek_help,
        }
    }

    /// Array items of a list field; any other shape counts as an empty list.
    fn list(value: Option<Value>) -> Vec<Value> {
        match value {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                debug!("Expected a list, got {other}");
                Vec::new()
            }
        }
    }

    /// Parse one condition record leniently; records without a name are skipped.
    fn parse_condition(value: &Value) -> Option<PossibleCondition> {
        let object = value.as_object()?;
        let name = object.get("name").and_then(Value::as_str)?.trim();
        if name.is_empty() {
            return None;
        }

        let likelihood = match object.get("likelihood") {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "unknown".to_string(),
        };

        let description = object
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        Some(PossibleCondition {
            name: name.to_string(),
            likelihood,
            description,
        })
    }
}
