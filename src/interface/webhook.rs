//! # Webhook Boundary
//!
//! Receives raw Telegram update payloads, extracts the chat id, sender and text, and hands
//! them to the `CommandRouter`. The response is always `200 OK`: Telegram redelivers
//! anything else, and a failed update retried forever helps nobody.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Deserialize;

use crate::application::rate_limiter::RateLimiter;
use crate::application::router::CommandRouter;
use crate::domain::traits::RecordStore;
use crate::domain::types::{InboundMessage, Sender};
use crate::infrastructure::telegram::{TelegramChat, TelegramClient};
use crate::strings::logs;

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub router: CommandRouter,
    pub telegram: Arc<TelegramClient>,
    pub store: Arc<dyn RecordStore>,
    pub limiter: Arc<RateLimiter>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
    #[serde(default)]
    pub edited_message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramMessage {
    #[serde(default)]
    pub chat: Option<TelegramChatRef>,
    #[serde(default)]
    pub from: Option<TelegramUser>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TelegramChatRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Update {
    /// The message to route, if the update carries one with a chat id.
    pub fn into_inbound(self) -> Option<InboundMessage> {
        let message = self.message.or(self.edited_message)?;
        let chat = message.chat?;
        Some(InboundMessage {
            chat_id: chat.id.to_string(),
            sender: message.from.map(|u| Sender {
                id: u.id,
                first_name: u.first_name,
                username: u.username,
            }),
            text: message.text.unwrap_or_default(),
        })
    }
}

pub async fn handle_update(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => {
            let update_id = update.update_id;
            match update.into_inbound() {
                Some(message) => {
                    let chat = TelegramChat::new(state.telegram.clone(), message.chat_id.clone());
                    let routed = AssertUnwindSafe(state.router.route(&chat, &message))
                        .catch_unwind()
                        .await;
                    if routed.is_err() {
                        tracing::error!("{} (update {:?})", logs::ROUTER_PANICKED, update_id);
                    }
                }
                None => tracing::debug!("{} (update {:?})", logs::UPDATE_WITHOUT_CHAT, update_id),
            }
        }
        Err(e) => tracing::warn!("{}", logs::payload_rejected(&e.to_string())),
    }

    (StatusCode::OK, Json(serde_json::json!({ "ok": true })))
}

/// Plain GET on the webhook path, for platform probes.
pub async fn webhook_alive() -> &'static str {
    "Webhook is running"
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": now.to_rfc3339(),
        "uptime_seconds": (now - state.started_at).num_seconds(),
        "store_configured": state.store.is_configured(),
        "tracked_conversations": state.limiter.tracked(),
    }))
}
