//! Assistant service - wraps the completion backend in a never-failing reply

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::assistant::system_prompt;
use crate::domain::{Language, TextCompletion};

const NOT_CONFIGURED: &str =
    "The assistant is not configured on this server. Please call the Kisan Call Centre at 1800-180-1551.";
const UNREACHABLE: &str =
    "The assistant cannot be reached right now. Please try again in a few minutes.";
const EMPTY_MESSAGE: &str = "Please type a question for the assistant.";

/// Reply body of the assistant endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantReply {
    pub response: String,
    pub success: bool,
}

impl AssistantReply {
    fn ok(response: String) -> Self {
        Self {
            response,
            success: true,
        }
    }

    fn failed(reason: &str) -> Self {
        Self {
            response: reason.to_string(),
            success: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssistantService {
    backend: Option<Arc<dyn TextCompletion>>,
    timeout: Duration,
}

impl AssistantService {
    pub fn new(backend: Option<Arc<dyn TextCompletion>>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// A service with no backend; every reply explains that
    pub fn disabled() -> Self {
        Self::new(None, Duration::from_secs(1))
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn reply(&self, message: &str, language: Language) -> AssistantReply {
        let message = message.trim();

        if message.is_empty() {
            return AssistantReply::failed(EMPTY_MESSAGE);
        }

        let Some(backend) = &self.backend else {
            return AssistantReply::failed(NOT_CONFIGURED);
        };

        let system = system_prompt(language);

        match tokio::time::timeout(self.timeout, backend.complete(&system, message)).await {
            Ok(Ok(response)) => {
                debug!(provider = backend.provider_name(), %language, "Assistant replied");
                AssistantReply::ok(response)
            }
            Ok(Err(e)) => {
                warn!(provider = backend.provider_name(), error = %e, "Assistant call failed");
                AssistantReply::failed(UNREACHABLE)
            }
            Err(_) => {
                warn!(
                    provider = backend.provider_name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Assistant call timed out"
                );
                AssistantReply::failed(UNREACHABLE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assistant::MockTextCompletion;
    use crate::domain::DomainError;

    fn service(mock: MockTextCompletion) -> AssistantService {
        AssistantService::new(Some(Arc::new(mock)), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_reply_success() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .withf(|system, message| {
                system.ends_with("Respond in Hindi.") && message == "fertiliser dose?"
            })
            .times(1)
            .returning(|_, _| Ok("Use 50 kg urea per acre.".to_string()));
        mock.expect_provider_name().return_const("mock");

        let reply = service(mock).reply("  fertiliser dose?  ", Language::Hindi).await;

        assert!(reply.success);
        assert_eq!(reply.response, "Use 50 kg urea per acre.");
    }

    #[tokio::test]
    async fn test_backend_error_is_structured_failure() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete()
            .returning(|_, _| Err(DomainError::provider("mock", "401 Unauthorized")));
        mock.expect_provider_name().return_const("mock");

        let reply = service(mock).reply("hello", Language::English).await;

        assert!(!reply.success);
        assert_eq!(reply.response, UNREACHABLE);
    }

    #[tokio::test]
    async fn test_unconfigured() {
        let reply = AssistantService::disabled().reply("hello", Language::English).await;

        assert!(!reply.success);
        assert!(reply.response.contains("not configured"));
    }

    #[tokio::test]
    async fn test_blank_message_never_calls_backend() {
        let mut mock = MockTextCompletion::new();
        mock.expect_complete().times(0);

        let reply = service(mock).reply("   ", Language::Telugu).await;

        assert!(!reply.success);
        assert_eq!(reply.response, EMPTY_MESSAGE);
    }
}
