use crate::config::toml_config::MailConfig;
use crate::domain::model::OutgoingEmail;
use crate::domain::ports::MailSender;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MailApiPayload<'a> {
    from: &'a str,
    to: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<MailApiAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct MailApiAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: &'a str,
}

/// Delivers mail through a transactional email provider's JSON API.
pub struct HttpMailSender {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailSender {
    pub fn new(client: Client, config: &MailConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        let attachments = email
            .attachments
            .iter()
            .map(|a| MailApiAttachment {
                filename: &a.filename,
                content: base64::engine::general_purpose::STANDARD.encode(&a.content),
                content_type: &a.content_type,
            })
            .collect();

        let payload = MailApiPayload {
            from: &self.from,
            to: &email.to,
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            text: &email.text,
            attachments,
        };

        tracing::debug!(
            "Sending mail '{}' to {:?} via {}",
            email.subject,
            email.to,
            self.api_url
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SiteError::MailError {
                message: format!("request to mail API failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::MailError {
                message: format!("mail API returned {}: {}", status, body),
            });
        }

        tracing::info!("📧 Mail '{}' accepted by provider", email.subject);
        Ok(())
    }
}

/// Development transport: logs the message and reports success.
pub struct LogMailSender {
    from: String,
}

impl LogMailSender {
    pub fn new(config: &MailConfig) -> Self {
        Self {
            from: config.from.clone(),
        }
    }
}

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        tracing::info!(
            from = %self.from,
            to = ?email.to,
            reply_to = ?email.reply_to,
            attachments = email.attachments.len(),
            "📧 [log transport] {}\n{}",
            email.subject,
            email.text
        );
        Ok(())
    }
}
