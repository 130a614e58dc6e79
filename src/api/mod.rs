//! Relay payloads and the completion client.
//!
//! The relay exposes one operation: `POST <base>/api/chat` with a
//! `{"message": ...}` body, answering `{"response": ...}` on success. Any
//! non-success status, transport error, or malformed body is a failure; the
//! session controller collapses all of them to one fallback reply, so no
//! error detail crosses this boundary beyond a message for the logs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::constants::CHAT_ENDPOINT;

#[derive(Serialize)]
pub struct CompletionRequest {
    pub message: String,
}

#[derive(Deserialize)]
pub struct CompletionResponse {
    pub response: String,
}

pub type CompletionResult = Result<String, Box<dyn std::error::Error + Send + Sync>>;

/// One request/response exchange with the language-model relay. The chat
/// loop holds this as a trait object so tests can substitute a scripted
/// collaborator.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> CompletionResult;
}

/// Build the chat endpoint URL from a relay base URL, tolerating trailing
/// slashes on the base.
pub fn chat_url(base_url: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), CHAT_ENDPOINT)
}

pub struct RelayClient {
    client: reqwest::Client,
    chat_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            chat_url: chat_url(base_url),
        }
    }
}

#[async_trait]
impl CompletionClient for RelayClient {
    async fn complete(&self, prompt: &str) -> CompletionResult {
        let request = CompletionRequest {
            message: prompt.to_string(),
        };

        let response = self
            .client
            .post(&self.chat_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("relay returned {}", response.status()).into());
        }

        let body: CompletionResponse = response.json().await?;
        Ok(body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn chat_url_tolerates_trailing_slashes() {
        assert_eq!(
            chat_url("http://127.0.0.1:3000"),
            "http://127.0.0.1:3000/api/chat"
        );
        assert_eq!(
            chat_url("http://127.0.0.1:3000/"),
            "http://127.0.0.1:3000/api/chat"
        );
        assert_eq!(
            chat_url("http://127.0.0.1:3000///"),
            "http://127.0.0.1:3000/api/chat"
        );
    }

    /// Serve exactly one canned HTTP response, returning the base URL.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn success_yields_the_response_text() {
        let body = r#"{"response":"A fever is..."}"#;
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 28\r\nConnection: close\r\n\r\n{\"response\":\"A fever is...\"}",
        )
        .await;
        assert_eq!(body.len(), 28);

        let client = RelayClient::new(&base);
        let result = client.complete("What is a fever?").await;
        assert_eq!(result.unwrap(), "A fever is...");
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let base = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let client = RelayClient::new(&base);
        assert!(client.complete("hello").await.is_err());
    }

    #[tokio::test]
    async fn malformed_body_is_a_failure() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 8\r\nConnection: close\r\n\r\nnot json",
        )
        .await;

        let client = RelayClient::new(&base);
        assert!(client.complete("hello").await.is_err());
    }

    #[tokio::test]
    async fn unreachable_relay_is_a_failure() {
        // Bind then drop to find a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RelayClient::new(&format!("http://{addr}"));
        assert!(client.complete("hello").await.is_err());
    }
}
