use crate::config::toml_config::PaymentConfig;
use crate::domain::model::{CheckoutMode, CheckoutSession};
use crate::domain::ports::PaymentGateway;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Creates hosted checkout sessions through Stripe's form-encoded REST API.
pub struct StripeGateway {
    client: Client,
    endpoint: String,
    secret_key: String,
    success_url: String,
    cancel_url: String,
}

impl StripeGateway {
    pub fn new(client: Client, config: &PaymentConfig) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/v1/checkout/sessions",
                config.api_base.trim_end_matches('/')
            ),
            secret_key: config.secret_key.clone(),
            success_url: config.success_url.clone(),
            cancel_url: config.cancel_url.clone(),
        }
    }

    fn form_params<'a>(
        &'a self,
        price_id: &'a str,
        mode: CheckoutMode,
        customer_email: Option<&'a str>,
    ) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("mode", mode.as_str()),
            ("line_items[0][price]", price_id),
            ("line_items[0][quantity]", "1"),
            ("success_url", self.success_url.as_str()),
            ("cancel_url", self.cancel_url.as_str()),
        ];
        if let Some(email) = customer_email {
            params.push(("customer_email", email));
        }
        params
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        price_id: &str,
        mode: CheckoutMode,
        customer_email: Option<&str>,
    ) -> Result<CheckoutSession> {
        tracing::debug!(
            "Creating {} checkout session for price {}",
            mode.as_str(),
            price_id
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.secret_key)
            .form(&self.form_params(price_id, mode, customer_email))
            .send()
            .await
            .map_err(|e| SiteError::PaymentError {
                message: format!("request to payment provider failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .map(|b| {
                    format!(
                        "{}: {}",
                        b.error.kind.unwrap_or_else(|| "error".to_string()),
                        b.error.message.unwrap_or_default()
                    )
                })
                .unwrap_or(body);
            return Err(SiteError::PaymentError {
                message: format!("provider returned {}: {}", status, detail),
            });
        }

        let session: CheckoutSession =
            response.json().await.map_err(|e| SiteError::PaymentError {
                message: format!("unreadable checkout session: {}", e),
            })?;

        tracing::info!("💳 Checkout session {} created", session.id);
        Ok(session)
    }
}
