/// Text sent to the completion service: a system instruction and a prompt body.
///
/// The body always ends with the description of the shape the service is
/// expected to answer in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    system: String,
    body: String,
}

impl Prompt {
    pub fn new(system: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            body: body.into(),
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Fixed generation parameters; callers cannot override them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.3,
        }
    }
}
