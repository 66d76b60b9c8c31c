//! HTTP client for OpenAI-compatible text completion APIs.
//!
//! Omits the Authorization header when no key is configured so local servers
//! that don't require authentication keep working.

use super::CompletionService;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::types::{CompletionRequest, CompletionResponse, ModelList};
use async_trait::async_trait;
use std::time::Duration;

/// Client for OpenAI-compatible completion APIs.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    organization: Option<String>,
}

impl ApiClient {
    /// Build a client from resolved API configuration.
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: build_http_client(config.timeout()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            organization: config
                .organization
                .as_deref()
                .map(str::trim)
                .filter(|org| !org.is_empty())
                .map(str::to_string),
        }
    }

    /// Send one `/completions` request and parse the response payload.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ApiError> {
        let url = format!("{}/completions", self.base_url);
        tracing::debug!(%url, model = %request.params.model, "dispatching completion request");
        let response = self.authorize(self.http.post(&url).json(request)).send().await?;
        let response = ensure_success(response).await?;
        response
            .json::<CompletionResponse>()
            .await
            .map_err(ApiError::from)
    }

    /// List model ids available to this key, sorted.
    pub async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/models", self.base_url);
        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = ensure_success(response).await?;
        let list: ModelList = response.json().await?;
        let mut ids: Vec<String> = list.data.into_iter().map(|m| m.id).collect();
        ids.sort();
        Ok(ids)
    }

    fn authorize(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if !self.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.api_key));
        }
        if let Some(org) = &self.organization {
            req = req.header("OpenAI-Organization", org);
        }
        req
    }
}

#[async_trait]
impl CompletionService for ApiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError> {
        ApiClient::complete(self, request).await
    }
}

/// Build an HTTP client with timeout applied.
fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status(status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SamplingParams;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            params: SamplingParams {
                model: "dummy-model".into(),
                temperature: 0.0,
                max_tokens: 16,
                top_p: 1.0,
                frequency_penalty: 0.0,
                presence_penalty: 0.0,
            },
            prompt: "Human: hi\nAI: ".into(),
            stop: vec!["Human: ".into(), "AI: ".into()],
        }
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    /// Serve one canned response and hand back the raw request text.
    async fn serve_once(
        response: String,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // Read until the JSON body (if any) has fully arrived.
            loop {
                let n = stream.read(&mut buf).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some((head, body)) = text.split_once("\r\n\r\n") {
                    let expected = head
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if body.len() >= expected {
                        break;
                    }
                }
            }
            let _ = stream.write_all(response.as_bytes()).await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn complete_posts_prompt_and_stop_sequences() {
        let (base_url, server) = serve_once(http_response(
            "200 OK",
            r#"{"id":"cmpl-1","choices":[{"text":"\n\nHello","index":0,"finish_reason":"stop"}]}"#,
        ))
        .await;
        let client = ApiClient::new(&ApiConfig {
            base_url: format!("{base_url}/"),
            api_key: "test-key".into(),
            organization: Some("org-1".into()),
            ..ApiConfig::default()
        });

        let response = client.complete(&sample_request()).await.unwrap();
        assert_eq!(response.choices[0].text, "\n\nHello");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /completions "), "got: {raw}");
        let lower = raw.to_ascii_lowercase();
        assert!(lower.contains("authorization: bearer test-key"));
        assert!(lower.contains("openai-organization: org-1"));
        assert!(raw.contains(r#""stop":["Human: ","AI: "]"#), "got: {raw}");
        assert!(raw.contains(r#""model":"dummy-model""#));
    }

    #[tokio::test]
    async fn complete_omits_auth_without_key() {
        let (base_url, server) =
            serve_once(http_response("200 OK", r#"{"choices":[{"text":"ok"}]}"#)).await;
        let client = ApiClient::new(&ApiConfig {
            base_url,
            ..ApiConfig::default()
        });
        client.complete(&sample_request()).await.unwrap();
        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(!raw.contains("authorization:"), "got: {raw}");
    }

    #[tokio::test]
    async fn non_success_status_becomes_status_error() {
        let (base_url, _server) = serve_once(http_response(
            "429 Too Many Requests",
            r#"{"error":"rate"}"#,
        ))
        .await;
        let client = ApiClient::new(&ApiConfig {
            base_url,
            ..ApiConfig::default()
        });
        let err = client.complete(&sample_request()).await.unwrap_err();
        assert!(err.is_rate_limited(), "got: {err}");
        assert!(err.to_string().contains("rate"));
    }

    #[tokio::test]
    async fn list_models_sorts_ids() {
        let (base_url, server) = serve_once(http_response(
            "200 OK",
            r#"{"data":[{"id":"zeta"},{"id":"alpha"},{"id":"mid"}]}"#,
        ))
        .await;
        let client = ApiClient::new(&ApiConfig {
            base_url,
            ..ApiConfig::default()
        });
        let ids = client.list_models().await.unwrap();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
        assert!(server.await.unwrap().starts_with("GET /models "));
    }
}
