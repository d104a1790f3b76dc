use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Session as issued by the payment provider.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    #[default]
    Payment,
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPlan {
    pub name: String,
    pub price_id: String,
    #[serde(default)]
    pub mode: CheckoutMode,
    #[serde(default)]
    pub display_price: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobApplication {
    pub name: String,
    pub email: String,
    pub position: String,
    pub message: Option<String>,
    pub resume: Attachment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichRequest {
    #[serde(default)]
    pub doc: Option<serde_json::Value>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichPayload {
    pub doc: serde_json::Value,
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

/// Identity recovered from a verified session token.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    pub title: String,
    #[serde(default)]
    pub days: Vec<ItineraryDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// Day listing without the activity detail.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItineraryDaySummary {
    pub day: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&ItineraryDay> for ItineraryDaySummary {
    fn from(day: &ItineraryDay) -> Self {
        Self {
            day: day.day,
            title: day.title.clone(),
            location: day.location.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_uses_camel_case() {
        let req: CheckoutRequest = serde_json::from_str(r#"{"priceId":"price_123"}"#).unwrap();
        assert_eq!(req.price_id.as_deref(), Some("price_123"));

        let empty: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.price_id.is_none());
    }

    #[test]
    fn test_checkout_response_serializes_session_id() {
        let resp = CheckoutResponse {
            session_id: "cs_test_1".to_string(),
            url: None,
        };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({ "sessionId": "cs_test_1" })
        );
    }

    #[test]
    fn test_chat_request_rejects_unknown_role() {
        let bad = r#"{"message":"hi","history":[{"role":"robot","content":"x"}]}"#;
        assert!(serde_json::from_str::<ChatRequest>(bad).is_err());

        let good = r#"{"message":"hi","history":[{"role":"assistant","content":"hello"}]}"#;
        let req: ChatRequest = serde_json::from_str(good).unwrap();
        assert_eq!(req.history[0].role, ChatRole::Assistant);
    }

    #[test]
    fn test_enrich_payload_wire_shape() {
        let payload = EnrichPayload {
            doc: serde_json::json!({ "name": "Acme" }),
            session_id: "abc".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "doc": { "name": "Acme" }, "sessionId": "abc" })
        );
    }
}
