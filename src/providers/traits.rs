use async_trait::async_trait;

use crate::error::ExtractError;

/// One round trip to a text-generation backend.
///
/// Implementations perform exactly one request per call: no retries here
/// (that is the retry orchestrator's job) and no response post-processing
/// (that is the pipeline's job).
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send a fully-rendered prompt and return the model's raw text output.
    ///
    /// Transport errors propagate unmodified.
    async fn generate(&self, prompt: &str) -> Result<String, ExtractError>;

    /// Warm up the HTTP connection pool (TLS handshake, DNS, HTTP/2 setup).
    /// Default implementation is a no-op; providers with HTTP clients should override.
    async fn warmup(&self) -> Result<(), ExtractError> {
        Ok(())
    }
}
