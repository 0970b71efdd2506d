use async_trait::async_trait;

use crate::domain::{DomainError, GenerationParams, Prompt};

/// An interface for sending prompts to a text-completion service and receiving
/// the raw response text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Each call makes exactly one attempt; failures surface as
/// [`DomainError::Transport`], [`DomainError::Provider`] or
/// [`DomainError::MalformedResponse`] and are never turned into an empty success.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        prompt: &Prompt,
        params: GenerationParams,
    ) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
