use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::EndpointConfig;
use crate::error::ExtractError;
use crate::providers::traits::Provider;

pub struct OllamaProvider {
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    /// Missing on some error-shaped replies; an absent field is treated as
    /// an empty response, not a transport failure.
    #[serde(default)]
    response: String,
}

impl OllamaProvider {
    pub fn new(endpoint: &EndpointConfig) -> Self {
        Self {
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            model: endpoint.model.clone(),
            temperature: endpoint.temperature,
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(300)) // Ollama runs locally, may be slow
                .connect_timeout(std::time::Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: Options {
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ExtractError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&self.build_request(prompt))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }

    async fn warmup(&self) -> Result<(), ExtractError> {
        self.client.get(&self.base_url).send().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base_url: &str) -> EndpointConfig {
        EndpointConfig {
            base_url: base_url.to_string(),
            ..EndpointConfig::default()
        }
    }

    #[test]
    fn default_url() {
        let p = OllamaProvider::new(&EndpointConfig::default());
        assert_eq!(p.base_url, "http://localhost:11434");
    }

    #[test]
    fn custom_url_trailing_slash() {
        let p = OllamaProvider::new(&endpoint("http://192.168.1.100:11434/"));
        assert_eq!(p.base_url, "http://192.168.1.100:11434");
    }

    #[test]
    fn custom_url_no_trailing_slash() {
        let p = OllamaProvider::new(&endpoint("http://myserver:11434"));
        assert_eq!(p.base_url, "http://myserver:11434");
    }

    #[test]
    fn request_serializes_completion_body() {
        let p = OllamaProvider::new(&EndpointConfig {
            model: "mistral".into(),
            temperature: 0.7,
            ..EndpointConfig::default()
        });
        let json = serde_json::to_string(&p.build_request("hello")).unwrap();
        assert!(json.contains("\"model\":\"mistral\""));
        assert!(json.contains("\"prompt\":\"hello\""));
        assert!(json.contains("\"stream\":false"));
        assert!(json.contains("\"temperature\":0.7"));
    }

    #[test]
    fn response_deserializes() {
        let json = r#"{"model":"llama3","response":"Hello!","done":true}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.response, "Hello!");
    }

    #[test]
    fn missing_response_field_defaults_to_empty() {
        let json = r#"{"model":"llama3","done":true}"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(resp.response.is_empty());
    }
}
