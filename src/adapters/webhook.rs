use crate::config::toml_config::WebhookConfig;
use crate::domain::ports::WebhookRelay;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;

pub const SECRET_HEADER: &str = "X-Webhook-Secret";

/// Forwards JSON documents to a workflow-automation webhook and returns its JSON answer.
pub struct HttpWebhookRelay {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl HttpWebhookRelay {
    pub fn new(client: Client, config: &WebhookConfig) -> Self {
        Self {
            client,
            url: config.enrich_url.clone(),
            secret: config.secret.clone().filter(|s| !s.is_empty()),
        }
    }
}

#[async_trait]
impl WebhookRelay for HttpWebhookRelay {
    async fn forward(&self, payload: serde_json::Value) -> Result<serde_json::Value> {
        tracing::debug!("Forwarding document to webhook {}", self.url);

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(secret) = &self.secret {
            request = request.header(SECRET_HEADER, secret);
        }

        let response = request.send().await.map_err(|e| SiteError::WebhookError {
            message: format!("webhook unreachable: {}", e),
        })?;

        let status = response.status();
        tracing::debug!("Webhook response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::WebhookError {
                message: format!("webhook returned {}: {}", status, body),
            });
        }

        response.json().await.map_err(|e| SiteError::WebhookError {
            message: format!("webhook returned invalid JSON: {}", e),
        })
    }
}
