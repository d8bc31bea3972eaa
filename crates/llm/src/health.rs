use tracing::warn;

use crate::llm_trait::LlmClient;
use crate::types::HealthReport;

/// Probe the completion service's model listing
///
/// Never fails: an unreachable service is reported, not returned as an error.
pub async fn check_health(client: &dyn LlmClient, model: &str) -> HealthReport {
    match client.list_models().await {
        Ok(models) => HealthReport::healthy(client.host(), model, models),
        Err(e) => {
            warn!("Completion service health check failed: {}", e);
            HealthReport::unhealthy(client.host(), e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::OllamaClient;
    use crate::types::HealthStatus;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_healthy_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{ "name": "llama3.1:8b" }]
            })))
            .mount(&server)
            .await;

        let client =
            OllamaClient::new(server.uri(), Duration::from_secs(5), Duration::from_secs(1)).unwrap();
        let report = check_health(&client, "llama3.1:8b").await;

        assert!(report.is_healthy());
        assert_eq!(report.model.as_deref(), Some("llama3.1:8b"));
        assert_eq!(report.available_models, Some(vec!["llama3.1:8b".to_string()]));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Nothing listens on port 9 locally
        let client = OllamaClient::new(
            "http://127.0.0.1:9",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .unwrap();
        let report = check_health(&client, "llama3.1:8b").await;

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert_eq!(report.host, "http://127.0.0.1:9");
        assert!(report.error.is_some());
        assert!(report.available_models.is_none());
    }
}
