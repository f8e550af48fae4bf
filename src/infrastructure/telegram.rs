//! # Telegram Service Adapter
//!
//! `TelegramClient` wraps the Bot API `sendMessage` call. `TelegramChat` binds the client
//! to one chat and implements the `ChatProvider` trait used by the bot's core logic,
//! the same way one conversation is handed to command handlers.
//!
//! Sends are attempted once. A missing bot token is a configuration error, logged by the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::config::TelegramConfig;
use crate::domain::error::{Error, Result};
use crate::domain::traits::ChatProvider;
use crate::domain::types::MessageFormat;
use crate::strings::logs;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

pub struct TelegramClient {
    http: Client,
    api_base: String,
    token: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            http: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn send_message(&self, chat_id: &str, text: &str, format: MessageFormat) -> Result<()> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| Error::configuration("telegram bot token"))?;

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: match format {
                MessageFormat::Markdown => Some("Markdown"),
                MessageFormat::Plain => None,
            },
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            // The URL embeds the bot token
            .map_err(|e| Error::transport("telegram sendMessage", e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transport(
                "telegram sendMessage",
                format!("HTTP {}: {}", status, body),
            ));
        }
        Ok(())
    }
}

/// A `ChatProvider` for one Telegram chat.
#[derive(Clone)]
pub struct TelegramChat {
    client: Arc<TelegramClient>,
    chat_id: String,
}

impl TelegramChat {
    pub fn new(client: Arc<TelegramClient>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for TelegramChat {
    fn chat_id(&self) -> String {
        self.chat_id.clone()
    }

    async fn send_message(&self, content: &str) -> Result<()> {
        tracing::info!("{}", logs::sending(&self.chat_id, content));
        self.client
            .send_message(&self.chat_id, content, MessageFormat::Markdown)
            .await
    }

    async fn send_notification(&self, content: &str) -> Result<()> {
        self.client
            .send_message(&self.chat_id, content, MessageFormat::Plain)
            .await
    }
}
