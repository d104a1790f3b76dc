use crate::domain::model::{
    ChatMessage, CheckoutMode, CheckoutSession, OutgoingEmail, SessionUser,
};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<()>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        price_id: &str,
        mode: CheckoutMode,
        customer_email: Option<&str>,
    ) -> Result<CheckoutSession>;
}

#[async_trait]
pub trait ChatResponder: Send + Sync {
    /// `history` holds earlier turns, oldest first, without the new message.
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String>;
}

#[async_trait]
pub trait WebhookRelay: Send + Sync {
    async fn forward(&self, payload: serde_json::Value) -> Result<serde_json::Value>;
}

pub trait SessionValidator: Send + Sync + 'static {
    fn verify(&self, token: &str) -> Result<SessionUser>;
}
