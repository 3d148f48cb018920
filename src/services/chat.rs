use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::{ChatEvent, ChatMessage, ChatSession, Locale, Sender};
use crate::services::responder;
use crate::state::AppState;

pub fn open_session(state: &AppState, locale: Locale) -> (Uuid, Vec<ChatMessage>) {
    let id = Uuid::new_v4();
    state.chats().insert(id, ChatSession::new(locale));
    append(state, id, Sender::Agent, responder::greeting(locale));
    tracing::info!(session_id = %id, locale = locale.as_str(), "chat session opened");

    let log = messages(state, id).unwrap_or_default();
    (id, log)
}

pub fn messages(state: &AppState, id: Uuid) -> Option<Vec<ChatMessage>> {
    state.chats().get(&id).map(|s| s.messages.clone())
}

/// Appends a visitor message and schedules the canned reply after a random
/// typing delay.
pub fn post_message(
    state: &Arc<AppState>,
    id: Uuid,
    content: &str,
) -> Result<ChatMessage, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("message content is required".to_string()));
    }

    let locale = state
        .chats()
        .get(&id)
        .map(|s| s.locale)
        .ok_or_else(|| AppError::NotFound(format!("chat session {id}")))?;

    let message = append(state, id, Sender::Visitor, content)
        .ok_or_else(|| AppError::NotFound(format!("chat session {id}")))?;

    let reply = responder::auto_reply(content, locale);
    let delay = reply_delay(&state.config);
    let state = Arc::clone(state);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if append(&state, id, Sender::Agent, reply).is_none() {
            tracing::warn!(session_id = %id, "chat session gone before auto-reply");
        }
    });

    Ok(message)
}

fn append(state: &AppState, id: Uuid, sender: Sender, content: &str) -> Option<ChatMessage> {
    let message = ChatMessage {
        id: Uuid::new_v4(),
        sender,
        content: content.to_string(),
        sent_at: Utc::now().naive_utc(),
    };

    {
        let mut chats = state.chats();
        let session = chats.get_mut(&id)?;
        session.messages.push(message.clone());
        session.last_active = Instant::now();
    }

    // No subscribers is fine
    let _ = state.chat_tx.send(ChatEvent {
        session_id: id,
        message: message.clone(),
    });
    Some(message)
}

fn reply_delay(config: &AppConfig) -> Duration {
    let min = config.chat_reply_delay_min.as_millis() as u64;
    let max = config.chat_reply_delay_max.as_millis() as u64;
    if max <= min {
        return Duration::from_millis(min);
    }
    Duration::from_millis(rand::rng().random_range(min..=max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Catalog;
    use crate::services::reservations::simulated::SimulatedReservations;

    fn test_state(min_ms: u64, max_ms: u64) -> Arc<AppState> {
        let mut config = AppConfig::from_env();
        config.chat_reply_delay_min = Duration::from_millis(min_ms);
        config.chat_reply_delay_max = Duration::from_millis(max_ms);
        Arc::new(AppState::new(
            config,
            Catalog::builtin(),
            Box::new(SimulatedReservations::new(Duration::ZERO)),
        ))
    }

    #[test]
    fn test_reply_delay_within_range() {
        let state = test_state(1000, 3000);
        for _ in 0..50 {
            let delay = reply_delay(&state.config);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(3000));
        }
        let fixed = test_state(5, 5);
        assert_eq!(reply_delay(&fixed.config), Duration::from_millis(5));
    }

    #[test]
    fn test_open_session_greets() {
        let state = test_state(0, 0);
        let (id, log) = open_session(&state, Locale::En);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].sender, Sender::Agent);
        assert_eq!(log[0].content, responder::greeting(Locale::En));
        assert_eq!(messages(&state, id).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_post_message_appends_reply_after_delay() {
        let state = test_state(20, 20);
        let (id, _) = open_session(&state, Locale::En);
        let mut rx = state.chat_tx.subscribe();

        let sent = post_message(&state, id, "  any coffee today? ").unwrap();
        assert_eq!(sent.sender, Sender::Visitor);
        assert_eq!(sent.content, "any coffee today?");
        assert_eq!(messages(&state, id).unwrap().len(), 2);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.message.id, sent.id);
        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.session_id, id);
        assert_eq!(reply.message.sender, Sender::Agent);
        assert_eq!(
            reply.message.content,
            responder::auto_reply("coffee", Locale::En)
        );
        assert_eq!(messages(&state, id).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_post_message_validation() {
        let state = test_state(0, 0);
        assert!(matches!(
            post_message(&state, Uuid::new_v4(), "hi"),
            Err(AppError::NotFound(_))
        ));
        let (id, _) = open_session(&state, Locale::Es);
        assert!(matches!(
            post_message(&state, id, "   "),
            Err(AppError::BadRequest(_))
        ));
    }
}
