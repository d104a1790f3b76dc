use super::json_rejection;
use crate::core::server::AppState;
use crate::domain::model::{ChatMessage, ChatReply, ChatRequest};
use crate::utils::error::Result;
use crate::utils::validation::{require_field, validate_max_length};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

/// `POST /api/chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let config = &state.config.chat;

    let message = require_field("message", &request.message)?;
    validate_max_length("message", message, config.max_message_chars)?;

    let history = recent_history(&request.history, config.max_history);
    tracing::debug!("Chat message with {} history entries", history.len());

    let reply = state.chat.reply(message, history).await?;
    Ok(Json(ChatReply { reply }))
}

fn recent_history(history: &[ChatMessage], max_history: usize) -> &[ChatMessage] {
    &history[history.len().saturating_sub(max_history)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChatRole;

    #[test]
    fn test_recent_history_keeps_tail() {
        let history: Vec<ChatMessage> = (0..5)
            .map(|i| ChatMessage::new(ChatRole::User, format!("m{}", i)))
            .collect();
        let tail = recent_history(&history, 2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].content, "m3");
        assert_eq!(recent_history(&history, 10).len(), 5);
        assert!(recent_history(&history, 0).is_empty());
    }
}
