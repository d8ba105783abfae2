// src/suggest/mod.rs
use std::sync::Arc;

use log::{debug, error, warn};
use serde_json::Value;
use thiserror::Error;

use crate::models::{SuggestionRequest, SuggestionResult};

pub mod prompt;
pub mod provider;
pub mod schema;

pub use prompt::PromptRenderer;
pub use provider::{ChatCompletionsProvider, Provider, ProviderError};
pub use schema::{output_schema, validate_request, validate_response, ValidationError};

/// The one message users see for any failed suggestion.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate password. Please try again.";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] handlebars::RenderError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model returned no output")]
    MissingOutput,

    #[error("Model output rejected: {0}")]
    InvalidOutput(#[from] ValidationError),
}

/// Turns validated requests into model-backed password suggestions.
///
/// Every call is a fresh round trip; nothing is cached or retried.
pub struct SuggestionService {
    provider: Arc<dyn Provider>,
    prompt: PromptRenderer,
    schema: Value,
}

impl SuggestionService {
    pub fn new(provider: Arc<dyn Provider>) -> Result<Self, handlebars::TemplateError> {
        Ok(Self {
            provider,
            prompt: PromptRenderer::new()?,
            schema: output_schema(),
        })
    }

    pub fn model(&self) -> String {
        self.provider.model()
    }

    pub async fn suggest(&self, request: &SuggestionRequest) -> Result<SuggestionResult, ServiceError> {
        let prompt = self.prompt.render(request)?;
        debug!(
            "Requesting suggestion: length={}, complexity={}, keywords={}",
            request.length(),
            request.complexity(),
            request.keyword_hint().is_some()
        );

        let output = match self.provider.generate(&prompt, &self.schema).await {
            Ok(Some(output)) => output,
            Ok(None) => {
                error!("Model returned no output");
                return Err(ServiceError::MissingOutput);
            }
            Err(e) => {
                error!("Model call failed: {}", e);
                return Err(e.into());
            }
        };

        let result = validate_response(&output).map_err(|e| {
            error!("Model output failed validation: {}", e);
            ServiceError::InvalidOutput(e)
        })?;

        // Model output is trusted once shaped; a length mismatch is only reported
        let returned_length = result.password.chars().count();
        if returned_length != usize::from(request.length()) {
            warn!(
                "Model returned a {}-character password for a {}-character request",
                returned_length,
                request.length()
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestionInput;
    use crate::suggest::provider::MockProvider;
    use serde_json::json;

    fn request(keywords: Option<&str>) -> SuggestionRequest {
        validate_request(&SuggestionInput {
            length: 11,
            complexity: "high".into(),
            keywords: keywords.map(String::from),
        })
        .unwrap()
    }

    fn service(mock: MockProvider) -> SuggestionService {
        SuggestionService::new(Arc::new(mock)).unwrap()
    }

    #[tokio::test]
    async fn returns_conforming_output_unchanged() {
        let mut mock = MockProvider::new();
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Ok(Some(json!({"password": "Tr0ub4dor&3", "strength": "strong"}))));

        let result = service(mock).suggest(&request(None)).await.unwrap();
        assert_eq!(
            result,
            SuggestionResult {
                password: "Tr0ub4dor&3".into(),
                strength: "strong".into(),
                reason: None,
            }
        );
    }

    #[tokio::test]
    async fn sends_rendered_prompt_and_output_schema() {
        let mut mock = MockProvider::new();
        mock.expect_generate()
            .withf(|prompt, schema| {
                prompt.contains("- Length: 11 characters")
                    && prompt.contains("- Keywords: sunset42")
                    && *schema == output_schema()
            })
            .times(1)
            .returning(|_, _| Ok(Some(json!({"password": "Sunset42!xyz", "strength": "medium"}))));

        let result = service(mock).suggest(&request(Some("sunset42"))).await.unwrap();
        assert_eq!(result.password, "Sunset42!xyz");
    }

    #[tokio::test]
    async fn provider_failure_is_surfaced_without_retry() {
        let mut mock = MockProvider::new();
        mock.expect_generate().times(1).returning(|_, _| {
            Err(ProviderError::Status {
                status: 401,
                body: "invalid api key".into(),
            })
        });

        let err = service(mock).suggest(&request(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Provider(ProviderError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn absent_output_is_an_error() {
        let mut mock = MockProvider::new();
        mock.expect_generate().times(1).returning(|_, _| Ok(None));

        let err = service(mock).suggest(&request(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingOutput));
    }

    #[tokio::test]
    async fn non_conforming_output_is_an_error() {
        let mut mock = MockProvider::new();
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Ok(Some(json!({"suggestion": "abc", "strength": "weak"}))));

        let err = service(mock).suggest(&request(None)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InvalidOutput(ValidationError::MissingField("password"))
        ));
    }

    #[tokio::test]
    async fn length_mismatch_is_not_rejected() {
        let mut mock = MockProvider::new();
        mock.expect_generate()
            .returning(|_, _| Ok(Some(json!({"password": "short", "strength": "weak"}))));

        let result = service(mock).suggest(&request(None)).await.unwrap();
        assert_eq!(result.password, "short");
    }

    #[tokio::test]
    async fn identical_requests_each_call_the_provider() {
        let mut mock = MockProvider::new();
        let mut calls = 0;
        mock.expect_generate().times(2).returning(move |_, _| {
            calls += 1;
            Ok(Some(json!({"password": format!("Pass-{calls}-word"), "strength": "medium"})))
        });

        let service = service(mock);
        let first = service.suggest(&request(None)).await.unwrap();
        let second = service.suggest(&request(None)).await.unwrap();
        assert_ne!(first.password, second.password);
    }
}
