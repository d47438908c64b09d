use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::pipeline;
use crate::providers::{OllamaProvider, Provider};
use crate::retry::{RetryPolicy, with_retries};

/// The whole pipeline behind one call surface: invoke the model, clean the
/// text, locate the structure, run the parse cascade, all wrapped in the
/// retry orchestrator so an isolated hallucination is not a hard failure.
///
/// Holds no mutable state; every call is an independent round trip.
pub struct Extractor {
    provider: Box<dyn Provider>,
    policy: RetryPolicy,
}

impl Extractor {
    pub fn new(provider: Box<dyn Provider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    /// Wire up an [`OllamaProvider`] from config. Rejects degenerate
    /// configs (zero attempts, empty base URL) the same way a file load
    /// does.
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self::new(
            Box::new(OllamaProvider::new(&config.endpoint)),
            RetryPolicy::from(&config.retry),
        ))
    }

    /// Pre-open the connection pool so the first real call skips the
    /// handshake.
    pub async fn warmup(&self) -> Result<(), ExtractError> {
        self.provider.warmup().await
    }

    /// Prompt the model and return the structured value embedded in its
    /// reply (object- or array-rooted). Each retry re-invokes the model.
    pub async fn generate_value(&self, prompt: &str) -> Result<Value, ExtractError> {
        let outcome = with_retries(self.policy, || async move {
            let raw = self.provider.generate(prompt).await?;
            pipeline::extract_outcome(&raw)
        })
        .await?;
        tracing::debug!(strategy = ?outcome.strategy, "structured extraction succeeded");
        Ok(outcome.value)
    }

    /// Prompt the model and deserialize the structured reply into the
    /// caller's shape. A well-formed value of the wrong shape surfaces as
    /// [`ExtractError::Shape`], distinct from syntactic failure.
    pub async fn generate_as<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, ExtractError> {
        let value = self.generate_value(prompt).await?;
        serde_json::from_value(value).map_err(ExtractError::Shape)
    }

    /// Prompt the model and return cleaned plain text (fences stripped, no
    /// JSON requirement).
    pub async fn generate_text(&self, prompt: &str) -> Result<String, ExtractError> {
        with_retries(self.policy, || async move {
            let raw = self.provider.generate(prompt).await?;
            pipeline::extract_text(&raw)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Serves a fixed sequence of responses, then repeats the last one.
    struct ScriptedProvider {
        responses: Vec<String>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: responses.iter().map(ToString::to_string).collect(),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn generate(&self, _prompt: &str) -> Result<String, ExtractError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            let last = self.responses.len() - 1;
            Ok(self.responses[n.min(last)].clone())
        }
    }

    fn extractor(responses: &[&str], max_attempts: u32) -> Extractor {
        Extractor::new(
            Box::new(ScriptedProvider::new(responses)),
            RetryPolicy {
                max_attempts,
                delay: Duration::from_millis(1),
            },
        )
    }

    #[tokio::test]
    async fn fenced_reply_yields_value() {
        let ex = extractor(&["```json\n{\"a\":1}\n```"], 2);
        assert_eq!(
            ex.generate_value("p").await.unwrap(),
            serde_json::json!({"a": 1})
        );
    }

    #[tokio::test]
    async fn prose_first_then_json_recovers_on_retry() {
        let ex = extractor(&["let me think about that...", "[1, 2, 3]"], 2);
        assert_eq!(
            ex.generate_value("p").await.unwrap(),
            serde_json::json!([1, 2, 3])
        );
    }

    #[tokio::test]
    async fn prose_every_time_exhausts_and_propagates() {
        let ex = extractor(&["no structure here at all"], 2);
        assert!(matches!(
            ex.generate_value("p").await,
            Err(ExtractError::NoJsonFound)
        ));
    }

    #[tokio::test]
    async fn typed_extraction_deserializes() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Verdict {
            score: u32,
            summary: String,
        }

        let ex = extractor(&["{score: 8, summary: 'strong fit',}"], 2);
        let verdict: Verdict = ex.generate_as("p").await.unwrap();
        assert_eq!(
            verdict,
            Verdict {
                score: 8,
                summary: "strong fit".into()
            }
        );
    }

    #[tokio::test]
    async fn typed_extraction_wrong_shape_is_a_shape_error() {
        #[derive(Debug, Deserialize)]
        struct Verdict {
            #[allow(dead_code)]
            score: u32,
        }

        let ex = extractor(&["{\"grade\": \"A\"}"], 1);
        let result: Result<Verdict, _> = ex.generate_as("p").await;
        assert!(matches!(result, Err(ExtractError::Shape(_))));
    }

    #[tokio::test]
    async fn text_surface_strips_fences_only() {
        let ex = extractor(&["```\nA short cover letter.\n```"], 1);
        assert_eq!(
            ex.generate_text("p").await.unwrap(),
            "A short cover letter."
        );
    }

    #[tokio::test]
    async fn empty_reply_surfaces_empty_response() {
        let ex = extractor(&[""], 1);
        assert!(matches!(
            ex.generate_text("p").await,
            Err(ExtractError::EmptyResponse)
        ));
    }

    #[test]
    fn from_config_rejects_zero_attempts() {
        let mut config = ExtractorConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(
            Extractor::from_config(&config),
            Err(ExtractError::Config(_))
        ));
    }

    #[test]
    fn from_config_rejects_empty_base_url() {
        let mut config = ExtractorConfig::default();
        config.endpoint.base_url = String::new();
        assert!(Extractor::from_config(&config).is_err());
    }

    #[test]
    fn from_config_accepts_defaults() {
        assert!(Extractor::from_config(&ExtractorConfig::default()).is_ok());
    }
}
