//! Ollama Generator
//!
//! Implementation of the TextGenerator trait against Ollama's
//! `POST /api/generate` endpoint. One non-streaming request per prompt,
//! bounded by the configured timeout, no retries.

use std::time::Duration;

use async_trait::async_trait;

use super::http_client::build_http_client;
use super::provider::{from_transport_error, parse_http_error, TextGenerator};
use super::types::{GenerateRequest, GenerateResponse, GenerationConfig, LlmError, LlmResult};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Ollama generation backend
pub struct OllamaGenerator {
    config: GenerationConfig,
    client: reqwest::Client,
    generate_url: url::Url,
    tags_url: url::Url,
}

impl OllamaGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: GenerationConfig) -> LlmResult<Self> {
        let base = config.base_url.trim_end_matches('/');
        let generate_url = Self::endpoint(base, "api/generate")?;
        let tags_url = Self::endpoint(base, "api/tags")?;
        let client = build_http_client(Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            config,
            client,
            generate_url,
            tags_url,
        })
    }

    fn endpoint(base: &str, path: &str) -> LlmResult<url::Url> {
        url::Url::parse(&format!("{}/{}", base, path)).map_err(|e| LlmError::InvalidRequest {
            message: format!("invalid base URL {:?}: {}", base, e),
        })
    }

    /// Get the configuration for this generator.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    async fn error_from_status(response: reqwest::Response) -> LlmError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        parse_http_error(status, &body, "ollama")
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> LlmResult<String> {
        let request = GenerateRequest::new(&self.config, prompt);

        let response = self
            .client
            .post(self.generate_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| from_transport_error(e, self.config.timeout_secs))?;

        if !response.status().is_success() {
            return Err(Self::error_from_status(response).await);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| from_transport_error(e, self.config.timeout_secs))?;

        let text = strip_thinking(&body.response);
        tracing::debug!(
            model = %self.config.model,
            chars = text.chars().count(),
            "generation completed"
        );
        Ok(text.trim().to_string())
    }

    async fn health_check(&self) -> LlmResult<()> {
        let response = self
            .client
            .get(self.tags_url.clone())
            .send()
            .await
            .map_err(|e| from_transport_error(e, self.config.timeout_secs))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_status(response).await)
        }
    }
}

/// Remove `<think>...</think>` reasoning blocks emitted by reasoning models.
///
/// A closing tag with no opening tag before it means the output started
/// mid-thought; everything up to it is dropped. An unclosed opening tag drops
/// the remainder.
pub fn strip_thinking(content: &str) -> String {
    let mut rest = content;
    if let Some(end) = rest.find(THINK_CLOSE) {
        if !rest[..end].contains(THINK_OPEN) {
            rest = &rest[end + THINK_CLOSE.len()..];
        }
    }

    let mut text = String::with_capacity(rest.len());
    loop {
        match rest.find(THINK_OPEN) {
            Some(start) => {
                text.push_str(&rest[..start]);
                let after = &rest[start + THINK_OPEN.len()..];
                match after.find(THINK_CLOSE) {
                    Some(end) => rest = &after[end + THINK_CLOSE.len()..],
                    None => break,
                }
            }
            None => {
                text.push_str(rest);
                break;
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn config_for(base_url: String, timeout_secs: u64) -> GenerationConfig {
        GenerationConfig {
            base_url,
            model: "stub-model".to_string(),
            timeout_secs,
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_thinking() {
        assert_eq!(strip_thinking("<think>hmm</think>普通"), "普通");
        assert_eq!(strip_thinking("a<think>x</think>b<think>y</think>c"), "abc");
        assert_eq!(strip_thinking("reasoning...</think>4"), "4");
        assert_eq!(strip_thinking("答案<think>unfinished"), "答案");
        assert_eq!(strip_thinking("no tags"), "no tags");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = OllamaGenerator::new(config_for("::not a url::".to_string(), 5));
        assert!(matches!(result, Err(LlmError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn test_generate_sends_configured_request() {
        let router = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                let echoed = format!(
                    "{}|{}|{}|{}",
                    body["model"].as_str().unwrap_or_default(),
                    body["stream"],
                    body["options"]["num_predict"],
                    body["prompt"].as_str().unwrap_or_default()
                );
                Json(json!({ "response": format!("  <think>ok</think>{}  ", echoed) }))
            }),
        );
        let base = spawn_stub(router).await;
        let generator = OllamaGenerator::new(config_for(base, 5)).unwrap();

        let text = generator.generate("問題").await.unwrap();
        assert_eq!(text, "stub-model|false|500|問題");
        assert_eq!(generator.name(), "ollama");
        assert_eq!(generator.model(), "stub-model");
    }

    #[tokio::test]
    async fn test_generate_server_error() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
        );
        let base = spawn_stub(router).await;
        let generator = OllamaGenerator::new(config_for(base, 5)).unwrap();

        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, LlmError::ServerError { status: Some(500), .. }));
    }

    #[tokio::test]
    async fn test_generate_model_not_found() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { (StatusCode::NOT_FOUND, "model 'stub-model' not found") }),
        );
        let base = spawn_stub(router).await;
        let generator = OllamaGenerator::new(config_for(base, 5)).unwrap();

        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, LlmError::ModelNotFound { .. }));
    }

    #[tokio::test]
    async fn test_generate_timeout() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({ "response": "too late" }))
            }),
        );
        let base = spawn_stub(router).await;
        let generator = OllamaGenerator::new(config_for(base, 1)).unwrap();

        let err = generator.generate("x").await.unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    }

    #[tokio::test]
    async fn test_generate_unparseable_body() {
        let router = Router::new().route("/api/generate", post(|| async { "not json" }));
        let base = spawn_stub(router).await;
        let generator = OllamaGenerator::new(config_for(base, 5)).unwrap();

        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, LlmError::ParseError { .. }));
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let generator = OllamaGenerator::new(config_for(format!("http://{}", addr), 5)).unwrap();
        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, LlmError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = Router::new().route("/api/tags", get(|| async { Json(json!({"models": []})) }));
        let base = spawn_stub(router).await;
        let generator = OllamaGenerator::new(config_for(base, 5)).unwrap();
        assert!(generator.health_check().await.is_ok());
    }
}
