//! Provider used when no API key is configured.
//!
//! Every call fails with [`AIError::NotConfigured`] without touching the
//! network, so quality checks degrade instead of the server refusing to start.

use async_trait::async_trait;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

#[derive(Debug, Clone, Default)]
pub struct UnconfiguredProvider {
    model: String,
}

impl UnconfiguredProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl AIProvider for UnconfiguredProvider {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        Err(AIError::NotConfigured)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("unconfigured", &self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_reports_not_configured() {
        let provider = UnconfiguredProvider::new("gpt-4o");
        let err = provider.complete(CompletionRequest::new()).await.unwrap_err();
        assert!(matches!(err, AIError::NotConfigured));
        assert_eq!(provider.provider_info().name, "unconfigured");
        assert_eq!(provider.provider_info().model, "gpt-4o");
    }
}
