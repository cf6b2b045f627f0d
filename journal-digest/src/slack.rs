use crate::digest::Block;
use crate::traits::ChatTransport;
use crate::types::{DigestError, Result};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Posts block chunks with chat.postMessage using a bot token.
pub struct SlackTransport {
    token: String,
    channel: String,
    api_url: String,
    http: reqwest::Client,
}

impl SlackTransport {
    pub fn new(token: String, channel: String) -> Self {
        Self {
            token,
            channel,
            api_url: POST_MESSAGE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Points the transport at another API endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[async_trait]
impl ChatTransport for SlackTransport {
    async fn send(&self, chunk: &[Block]) -> Result<()> {
        let payload = json!({
            "channel": self.channel,
            "blocks": chunk,
            "unfurl_links": false,
        });

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "chat.postMessage returned non-success");
            return Err(DigestError::Transport(format!("chat.postMessage returned {}", status)));
        }

        // The Web API reports failures in the body with a 200 status.
        let body: serde_json::Value = resp.json().await?;
        if !body["ok"].as_bool().unwrap_or(false) {
            let reason = body["error"].as_str().unwrap_or("unknown").to_string();
            return Err(DigestError::Transport(format!("chat.postMessage error: {}", reason)));
        }

        debug!("Posted {} blocks to {}", chunk.len(), self.channel);
        Ok(())
    }
}
