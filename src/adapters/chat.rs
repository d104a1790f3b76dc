use crate::config::toml_config::{CannedReplyConfig, ChatConfig, LlmConfig};
use crate::domain::model::{ChatMessage, ChatRole};
use crate::domain::ports::ChatResponder;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_REPLY: &str = "Thanks for reaching out! I can tell you about our services, \
    case studies and pricing, or you can leave a note through the contact form and the \
    team will get back to you within one business day.";

fn builtin_rules() -> Vec<CannedReplyConfig> {
    let rule = |keywords: &[&str], reply: &str| CannedReplyConfig {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        reply: reply.to_string(),
    };
    vec![
        rule(
            &["price", "pricing", "cost", "quote", "budget"],
            "Our engagements start with a fixed-price discovery sprint. The pricing page \
             lists the current packages, and checkout is available for the starter plans.",
        ),
        rule(
            &["service", "offer", "consult", "consulting", "build", "develop", "development"],
            "We help teams with product engineering, cloud architecture, data platforms \
             and AI integration. The services page has a breakdown of each practice.",
        ),
        rule(
            &["case study", "case studies", "portfolio", "client", "example"],
            "Have a look at our case studies for recent projects, from marketplace \
             rebuilds to workflow automation rollouts.",
        ),
        rule(
            &["job", "career", "hire", "hiring", "apply", "position", "role"],
            "We're always interested in meeting engineers. Open roles are on the careers \
             page, where you can apply with your resume.",
        ),
        rule(
            &["contact", "email", "call", "meeting", "talk"],
            "You can reach the team through the contact form. We usually reply within \
             one business day.",
        ),
        rule(
            &["hello", "hi", "hey"],
            "Hi there! What can I help you with today?",
        ),
    ]
}

/// Keyword-matched replies. First rule whose keyword appears in the message wins.
pub struct CannedResponder {
    rules: Vec<CannedReplyConfig>,
    default_reply: String,
}

impl CannedResponder {
    pub fn new(config: &ChatConfig) -> Self {
        let rules = if config.replies.is_empty() {
            builtin_rules()
        } else {
            config.replies.clone()
        };
        let default_reply = config
            .default_reply
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REPLY.to_string());
        Self {
            rules,
            default_reply,
        }
    }

    pub fn reply_for(&self, message: &str) -> &str {
        let normalized = message.to_lowercase();
        let words: Vec<&str> = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        self.rules
            .iter()
            .filter(|rule| !rule.reply.trim().is_empty())
            .find(|rule| {
                rule.keywords.iter().any(|keyword| {
                    let keyword = keyword.to_lowercase();
                    if keyword.contains(' ') {
                        normalized.contains(&keyword)
                    } else {
                        words.iter().any(|w| word_matches(w, &keyword))
                    }
                })
            })
            .map(|rule| rule.reply.as_str())
            .unwrap_or(self.default_reply.as_str())
    }
}

/// Whole-word match that also accepts a plain `s`/`es` plural.
fn word_matches(word: &str, keyword: &str) -> bool {
    word == keyword
        || word.strip_suffix('s') == Some(keyword)
        || word.strip_suffix("es") == Some(keyword)
}

#[async_trait]
impl ChatResponder for CannedResponder {
    async fn reply(&self, message: &str, _history: &[ChatMessage]) -> Result<String> {
        Ok(self.reply_for(message).to_string())
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Replies from an OpenAI-compatible chat completions endpoint.
pub struct LlmResponder {
    client: Client,
    config: LlmConfig,
}

impl LlmResponder {
    pub fn new(client: Client, config: &LlmConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    fn build_messages(&self, message: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        if !self.config.system_prompt.trim().is_empty() {
            messages.push(ChatMessage::new(
                ChatRole::System,
                self.config.system_prompt.as_str(),
            ));
        }
        // Clients may not inject their own system turns.
        messages.extend(
            history
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .cloned(),
        );
        messages.push(ChatMessage::new(ChatRole::User, message));
        messages
    }
}

#[async_trait]
impl ChatResponder for LlmResponder {
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        let request = CompletionRequest {
            model: &self.config.model,
            messages: self.build_messages(message, history),
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SiteError::ChatError {
                message: format!("request to completion API failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::ChatError {
                message: format!("completion API returned {}: {}", status, body),
            });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| SiteError::ChatError {
                message: format!("unreadable completion: {}", e),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SiteError::ChatError {
                message: "completion contained no text".to_string(),
            })
    }
}

/// Tries `primary`, answering from `fallback` when it fails.
pub struct FallbackResponder<P: ChatResponder, F: ChatResponder> {
    primary: P,
    fallback: F,
}

impl<P: ChatResponder, F: ChatResponder> FallbackResponder<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P: ChatResponder, F: ChatResponder> ChatResponder for FallbackResponder<P, F> {
    async fn reply(&self, message: &str, history: &[ChatMessage]) -> Result<String> {
        match self.primary.reply(message, history).await {
            Ok(reply) => Ok(reply),
            Err(e) => {
                tracing::warn!("⚠️ Primary chat backend failed, using canned reply: {}", e);
                self.fallback.reply(message, history).await
            }
        }
    }
}
