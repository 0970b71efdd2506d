use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const MAX_AGE: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "non-binary" | "nonbinary" | "prefer not to say" => Ok(Gender::Other),
            unknown => Err(DomainError::invalid_input(format!(
                "Unsupported gender '{}', expected male, female or other",
                unknown
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated set of symptoms plus the patient metadata sent along with them.
///
/// Symptoms are trimmed, blank entries dropped and exact duplicates removed
/// while keeping first-seen order. Once built the query cannot be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomQuery {
    symptoms: Vec<String>,
    age: u32,
    gender: Gender,
    duration: String,
    severity: String,
    medical_history: Option<String>,
}

impl SymptomQuery {
    pub fn new(
        symptoms: Vec<String>,
        age: u32,
        gender: Gender,
        duration: impl Into<String>,
        severity: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let mut unique: Vec<String> = Vec::with_capacity(symptoms.len());
        for symptom in symptoms {
            let symptom = symptom.trim();
            if symptom.is_empty() || unique.iter().any(|s| s == symptom) {
                continue;
            }
            unique.push(symptom.to_string());
        }

        if unique.is_empty() {
            return Err(DomainError::invalid_input(
                "At least one symptom is required",
            ));
        }

        if age > MAX_AGE {
            return Err(DomainError::invalid_input(format!(
                "Age must be between 0 and {}, got {}",
                MAX_AGE, age
            )));
        }

        Ok(Self {
            symptoms: unique,
            age,
            gender,
            duration: duration.into().trim().to_string(),
            severity: severity.into().trim().to_string(),
            medical_history: None,
        })
    }

    pub fn with_medical_history(mut self, history: impl Into<String>) -> Self {
        let history = history.into();
        let history = history.trim();
        self.medical_history = if history.is_empty() {
            None
        } else {
            Some(history.to_string())
        };
        self
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn severity(&self) -> &str {
        &self.severity
    }

    pub fn medical_history(&self) -> Option<&str> {
        self.medical_history.as_deref()
    }
}

/// Unvalidated symptom submission as it arrives from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomInput {
    #[serde(default)]
    pub symptoms: Vec<String>,
    pub age: i64,
    pub gender: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub medical_history: Option<String>,
}

impl SymptomInput {
    pub fn into_query(self) -> Result<SymptomQuery, DomainError> {
        let age = u32::try_from(self.age).map_err(|_| {
            DomainError::invalid_input(format!(
                "Age must be between 0 and {}, got {}",
                MAX_AGE, self.age
            ))
        })?;
        let gender = Gender::parse(&self.gender)?;

        let query = SymptomQuery::new(self.symptoms, age, gender, self.duration, self.severity)?;
        Ok(match self.medical_history {
            Some(history) => query.with_medical_history(history),
            None => query,
        })
    }
}
