//! HTTP transport implementing `ChatBackend` for the terminal client.
//!
//! Talks to the Halcyon API server's chat endpoints with a bearer
//! credential per request.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use halcyon_core::chat::controller::{BackendError, ChatBackend, SendReply};
use halcyon_types::message::{StoredMessage, Turn};

/// Chat backend speaking the server's JSON wire format.
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct SendBody<'a> {
    message: &'a str,
    #[serde(rename = "chatHistory")]
    chat_history: &'a [Turn],
}

#[derive(Deserialize)]
struct SendResponse {
    response: String,
    timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
struct HistoryResponse {
    messages: Vec<StoredMessage>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpChatBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| status.to_string());
        Err(match status {
            StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
            StatusCode::BAD_REQUEST => BackendError::Rejected(detail),
            _ => BackendError::Server(detail),
        })
    }
}

fn transport(e: reqwest::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

impl ChatBackend for HttpChatBackend {
    async fn send_message(
        &self,
        token: &str,
        text: &str,
        history: &[Turn],
    ) -> Result<SendReply, BackendError> {
        let response = self
            .client
            .post(self.url("/api/v1/chat/message"))
            .bearer_auth(token)
            .json(&SendBody {
                message: text,
                chat_history: history,
            })
            .send()
            .await
            .map_err(transport)?;

        let body: SendResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        Ok(SendReply {
            response: body.response,
            timestamp: body.timestamp,
        })
    }

    async fn fetch_history(&self, token: &str) -> Result<Vec<StoredMessage>, BackendError> {
        let response = self
            .client
            .get(self.url("/api/v1/chat/history"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let body: HistoryResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        Ok(body.messages)
    }

    async fn clear_history(&self, token: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/api/v1/chat/clear"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = HttpChatBackend::new("http://localhost:8787/");
        assert_eq!(
            backend.url("/api/v1/chat/history"),
            "http://localhost:8787/api/v1/chat/history"
        );
    }

    #[test]
    fn test_send_body_uses_wire_field_names() {
        let history = vec![Turn::user("Hello")];
        let body = SendBody {
            message: "next",
            chat_history: &history,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "next");
        assert_eq!(json["chatHistory"][0]["role"], "user");
    }
}
