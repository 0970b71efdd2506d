use std::time::Duration;

use tracing::warn;

use crate::application::CompletionService;
use crate::domain::{DomainError, GenerationParams, Prompt};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Run one completion call, giving up after `timeout`.
///
/// Expiry is reported as a transport failure; the in-flight request is dropped.
pub(crate) async fn complete_within(
    service: &dyn CompletionService,
    prompt: &Prompt,
    timeout: Duration,
) -> Result<String, DomainError> {
    match tokio::time::timeout(timeout, service.complete(prompt, GenerationParams::default())).await
    {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "Completion with {} exceeded the {:.1}s request timeout",
                service.model_name(),
                timeout.as_secs_f64()
            );
            Err(DomainError::timeout(timeout))
        }
    }
}
