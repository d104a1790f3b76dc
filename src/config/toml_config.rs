use crate::domain::model::{CheckoutMode, PricingPlan};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub payment: PaymentConfig,
    pub auth: AuthConfig,
    pub chat: ChatConfig,
    pub webhook: WebhookConfig,
    pub itinerary: ItineraryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub upstream_timeout_seconds: u64,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            upstream_timeout_seconds: 15,
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    #[default]
    Http,
    /// Write messages to the log instead of delivering them.
    Log,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub api_url: String,
    pub api_key: String,
    pub from: String,
    pub contact_recipient: String,
    pub careers_recipient: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::Http,
            api_url: "https://api.resend.com/emails".to_string(),
            api_key: String::new(),
            from: "Website <noreply@example.com>".to_string(),
            contact_recipient: "hello@example.com".to_string(),
            careers_recipient: "careers@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub api_base: String,
    pub secret_key: String,
    pub success_url: String,
    pub cancel_url: String,
    pub default_mode: CheckoutMode,
    pub plans: Vec<PricingPlan>,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.stripe.com".to_string(),
            secret_key: String::new(),
            success_url: "http://localhost:3000/success?session_id={CHECKOUT_SESSION_ID}"
                .to_string(),
            cancel_url: "http://localhost:3000/pricing".to_string(),
            default_mode: CheckoutMode::Payment,
            plans: Vec::new(),
        }
    }
}

impl PaymentConfig {
    pub fn find_plan(&self, price_id: &str) -> Option<&PricingPlan> {
        self.plans.iter().find(|plan| plan.price_id == price_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub session_secret: String,
    pub cookie_name: String,
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            cookie_name: "site_session".to_string(),
            session_ttl_hours: 24,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatBackend {
    #[default]
    Canned,
    Llm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub backend: ChatBackend,
    pub max_history: usize,
    pub max_message_chars: usize,
    pub fallback_to_canned: bool,
    pub llm: LlmConfig,
    /// Overrides the built-in keyword replies when non-empty.
    pub replies: Vec<CannedReplyConfig>,
    pub default_reply: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: ChatBackend::Canned,
            max_history: 20,
            max_message_chars: 2000,
            fallback_to_canned: false,
            llm: LlmConfig::default(),
            replies: Vec::new(),
            default_reply: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            system_prompt: "You are the website assistant for a technology consultancy. \
                Answer briefly and point visitors to the services, case studies, pricing \
                and contact pages."
                .to_string(),
            max_tokens: Some(400),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CannedReplyConfig {
    pub keywords: Vec<String>,
    pub reply: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub enrich_url: String,
    /// Sent as `X-Webhook-Secret` when set.
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryConfig {
    pub path: Option<String>,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STRIPE_SECRET_KEY})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env pattern is a valid regex")
        });

        ENV_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        use validation::*;

        validate_non_empty_string("server.bind", &self.server.bind)?;
        validate_positive_number("server.max_upload_bytes", self.server.max_upload_bytes, 1)?;
        validate_range(
            "server.upstream_timeout_seconds",
            self.server.upstream_timeout_seconds,
            1,
            300,
        )?;

        validate_mailbox("mail.from", &self.mail.from)?;
        validate_mailbox("mail.contact_recipient", &self.mail.contact_recipient)?;
        validate_mailbox("mail.careers_recipient", &self.mail.careers_recipient)?;
        if self.mail.transport == MailTransport::Http {
            validate_url("mail.api_url", &self.mail.api_url)?;
            validate_resolved("mail.api_key", &self.mail.api_key)?;
        }

        validate_url("payment.api_base", &self.payment.api_base)?;
        validate_resolved("payment.secret_key", &self.payment.secret_key)?;
        validate_url("payment.success_url", &self.payment.success_url)?;
        validate_url("payment.cancel_url", &self.payment.cancel_url)?;
        for plan in &self.payment.plans {
            validate_resolved("payment.plans.price_id", &plan.price_id)?;
        }

        validate_resolved("auth.session_secret", &self.auth.session_secret)?;
        if self.auth.session_secret.len() < 16 {
            return Err(SiteError::InvalidConfigValueError {
                field: "auth.session_secret".to_string(),
                value: "<redacted>".to_string(),
                reason: "Secret must be at least 16 characters".to_string(),
            });
        }
        validate_non_empty_string("auth.cookie_name", &self.auth.cookie_name)?;
        validate_range("auth.session_ttl_hours", self.auth.session_ttl_hours, 1, 24 * 90)?;

        validate_range("chat.max_history", self.chat.max_history, 0, 200)?;
        validate_positive_number("chat.max_message_chars", self.chat.max_message_chars, 1)?;
        if self.chat.backend == ChatBackend::Llm {
            validate_url("chat.llm.api_url", &self.chat.llm.api_url)?;
            validate_resolved("chat.llm.api_key", &self.chat.llm.api_key)?;
            validate_non_empty_string("chat.llm.model", &self.chat.llm.model)?;
        }

        validate_url("webhook.enrich_url", &self.webhook.enrich_url)?;
        if let Some(secret) = &self.webhook.secret {
            validate_resolved("webhook.secret", secret)?;
        }

        if let Some(path) = &self.itinerary.path {
            validate_path("itinerary.path", path)?;
        }

        Ok(())
    }

    pub fn bind_address(&self) -> &str {
        &self.server.bind
    }

    pub fn upstream_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.server.upstream_timeout_seconds)
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
