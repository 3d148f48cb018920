use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tokio_stream::StreamExt;
use uuid::Uuid;

use super::catalog::LocaleQuery;
use crate::errors::AppError;
use crate::models::{ChatMessage, Locale};
use crate::services::chat;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ChatSessionResponse {
    id: Uuid,
    locale: Locale,
    messages: Vec<ChatMessage>,
}

// POST /api/chat
pub async fn open_chat(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> (StatusCode, Json<ChatSessionResponse>) {
    let locale = query.resolve(&state);
    let (id, messages) = chat::open_session(&state, locale);
    (
        StatusCode::CREATED,
        Json(ChatSessionResponse {
            id,
            locale,
            messages,
        }),
    )
}

// GET /api/chat/:id/messages
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    chat::messages(&state, id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("chat session {id}")))
}

// POST /api/chat/:id/messages
#[derive(Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    let message = chat::post_message(&state, id, &body.content)?;
    Ok((StatusCode::CREATED, Json(message)))
}

fn message_event(message: &ChatMessage) -> Event {
    let data = serde_json::to_string(message).unwrap_or_default();
    Event::default().data(data).event("chat_message")
}

// GET /api/chat/:id/events — SSE stream
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Subscribe before the snapshot so nothing falls between the two; clients
    // dedupe by message id.
    let rx = state.chat_tx.subscribe();
    let history = chat::messages(&state, id)
        .ok_or_else(|| AppError::NotFound(format!("chat session {id}")))?;

    let catchup_stream = tokio_stream::iter(
        history
            .into_iter()
            .map(|message| Ok::<_, Infallible>(message_event(&message))),
    );

    let live_stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) if event.session_id == id => Some(Ok(message_event(&event.message))),
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(_)) => None,
    });

    let keepalive_stream = StreamExt::map(
        IntervalStream::new(tokio::time::interval(Duration::from_secs(30))),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = catchup_stream.chain(live_stream);
    let merged = StreamExt::merge(combined, keepalive_stream);

    Ok(Sse::new(merged))
}
