//! OpenAI-compatible gateway implementation

use super::error::{OpenAiError, Result};
use super::protocol::{ChatCompletionRequest, parse_response};
use arena_application::{GatewayError, LlmGateway};
use arena_domain::CompletionRequest;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Gateway to any endpoint speaking the chat-completions dialect
/// (DeepSeek, OpenAI, self-hosted proxies).
///
/// The API key is optional at construction so that a misconfigured run
/// still reaches the pipeline; every call then fails with
/// [`GatewayError::Unauthorized`] and the pipeline degrades to its
/// fallback result.
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    /// Reported in the missing-key error
    api_key_env: String,
}

impl OpenAiGateway {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: "api_key".to_string(),
        })
    }

    /// Name the environment variable the key was expected in.
    pub fn with_api_key_env(mut self, env: impl Into<String>) -> Self {
        self.api_key_env = env.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| OpenAiError::MissingApiKey(self.api_key_env.clone()))?;

        let body = ChatCompletionRequest::from(request);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(
            stage = request.stage.as_str(),
            status = status.as_u16(),
            body_len = text.len(),
            "Chat completion response"
        );

        if !status.is_success() {
            return Err(OpenAiError::status(status.as_u16(), &text));
        }

        parse_response(&text)
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> std::result::Result<String, GatewayError> {
        self.send(request).await.map_err(|e| {
            warn!(
                stage = request.stage.as_str(),
                model = %request.model,
                "Backend call failed: {}",
                e
            );
            GatewayError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_domain::{GenerationParams, Model, Stage};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn request(timeout: Duration) -> CompletionRequest {
        CompletionRequest::new(
            Stage::Normalize,
            Model::DeepSeekChat,
            "system",
            "prompt",
            GenerationParams::default(),
            timeout,
        )
    }

    /// Read one HTTP request (headers plus `Content-Length` body).
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + length {
                    return text;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve exactly one canned response; returns the base URL and a handle
    /// yielding the raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            raw
        });
        (format!("http://{}/v1/", addr), handle)
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = OpenAiGateway::new("https://api.deepseek.com/v1/", None).unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_blank_key_counts_as_missing() {
        let gateway = OpenAiGateway::new("http://127.0.0.1:9", Some("  ".to_string()))
            .unwrap();
        let err = gateway
            .complete(&request(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let gateway = OpenAiGateway::new("http://127.0.0.1:9", None)
            .unwrap()
            .with_api_key_env("DEEPSEEK_API_KEY");
        let err = gateway
            .complete(&request(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized(msg) if msg.contains("DEEPSEEK_API_KEY")));
    }

    #[tokio::test]
    async fn test_success_returns_first_choice() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"你好"}}]}"#,
        )
        .await;
        let gateway = OpenAiGateway::new(&base, Some("sk-test".to_string()))
            .unwrap();

        let text = gateway
            .complete(&request(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(text, "你好");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains(r#""stream":false"#));
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let (base, _server) = serve_once("429 Too Many Requests", r#"{"error":"slow"}"#).await;
        let gateway = OpenAiGateway::new(&base, Some("sk-test".to_string()))
            .unwrap();
        let err = gateway
            .complete(&request(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::RateLimited);
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (base, _server) = serve_once("500 Internal Server Error", "boom").await;
        let gateway = OpenAiGateway::new(&base, Some("sk-test".to_string()))
            .unwrap();
        let err = gateway
            .complete(&request(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid() {
        let (base, _server) = serve_once("200 OK", r#"{"choices":[]}"#).await;
        let gateway = OpenAiGateway::new(&base, Some("sk-test".to_string()))
            .unwrap();
        let err = gateway
            .complete(&request(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let gateway = OpenAiGateway::new(&format!("http://{}", addr), Some("sk-test".to_string()))
            .unwrap();
        let err = gateway
            .complete(&request(Duration::from_millis(100)))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let gateway = OpenAiGateway::new(&format!("http://{}", addr), Some("sk-test".to_string()))
            .unwrap();
        let err = gateway
            .complete(&request(Duration::from_secs(2)))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }
}
