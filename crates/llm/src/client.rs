use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use textconvert_common::{AppConfig, ConverterError, Result};
use tracing::{debug, info};

use crate::llm_trait::LlmClient;
use crate::types::{GenerateRequest, GenerateResponse, TagsResponse};

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: Client,
    health_timeout: Duration,
}

impl OllamaClient {
    /// Create new Ollama client
    ///
    /// `request_timeout` bounds generate calls, `health_timeout` bounds the tags probe.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        health_timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConverterError::network(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama client initialized: {}", base_url);
        Ok(Self {
            base_url,
            client,
            health_timeout,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.completion_host(),
            config.request_timeout(),
            config.health_timeout(),
        )
    }

    /// Single attempt to generate text
    async fn try_generate(&self, request: &GenerateRequest) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ConverterError::network(format!("Failed to send request: {}", e)))?
            .error_for_status()
            .map_err(|e| ConverterError::llm(format!("Ollama API error: {}", e)))?;

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ConverterError::llm(format!("Failed to parse response: {}", e)))?;

        if result.response.is_empty() {
            return Err(ConverterError::llm("Empty response from Ollama"));
        }

        debug!("Received response from Ollama - Length: {}", result.response.len());
        Ok(result.response)
    }

    /// Fetch installed models with the short health timeout
    async fn fetch_tags(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| ConverterError::network(format!("Failed to connect to Ollama: {}", e)))?
            .error_for_status()
            .map_err(|e| ConverterError::llm(format!("Ollama API error: {}", e)))?;

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ConverterError::llm(format!("Failed to parse model list: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        self.try_generate(&request).await
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        self.fetch_tags().await
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerateOptions;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OllamaClient {
        OllamaClient::new(server.uri(), Duration::from_secs(5), Duration::from_secs(1)).unwrap()
    }

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: "llama3.1:8b".to_string(),
            prompt: prompt.to_string(),
            stream: Some(false),
            options: Some(GenerateOptions {
                temperature: Some(0.3),
                top_p: None,
                num_predict: Some(4000),
            }),
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = OllamaClient::new(
            "http://localhost:11434/",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.host(), "http://localhost:11434");
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({
                "model": "llama3.1:8b",
                "stream": false,
                "options": { "num_predict": 4000 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3.1:8b",
                "response": "# Title",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate(request("hello")).await.unwrap();
        assert_eq!(text, "# Title");
    }

    #[tokio::test]
    async fn test_generate_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).generate(request("hello")).await;
        assert!(matches!(result, Err(ConverterError::Llm(_))));
    }

    #[tokio::test]
    async fn test_generate_empty_response_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": "", "done": true })),
            )
            .mount(&server)
            .await;

        assert!(client_for(&server).generate(request("hello")).await.is_err());
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(client_for(&server).generate(request("hello")).await.is_err());
    }

    #[tokio::test]
    async fn test_list_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{ "name": "llama3.1:8b" }, { "name": "mistral:latest" }]
            })))
            .mount(&server)
            .await;

        let models = client_for(&server).list_models().await.unwrap();
        assert_eq!(models, vec!["llama3.1:8b", "mistral:latest"]);
    }

    #[tokio::test]
    async fn test_list_models_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "models": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).list_models().await;
        assert!(matches!(result, Err(ConverterError::Network(_))));
    }
}
