//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command word (e.g., `/setpayment` or `setpayment`) and dispatches it with the necessary context.
//!
//! Order of checks for every message: rate limit, then command lookup. Handlers
//! themselves check authorization before arity, and arity before provider validation.
//! Routing never returns an error; failed sends are logged and dropped.

use std::sync::Arc;

use crate::application::auth::AdminList;
use crate::application::rate_limiter::RateLimiter;
use crate::application::utils::parse_command;
use crate::domain::traits::{ChatProvider, RecordStore};
use crate::domain::types::InboundMessage;
use crate::interface::commands;
use crate::strings::{logs, messages};

#[derive(Clone)]
pub struct CommandRouter {
    store: Arc<dyn RecordStore>,
    limiter: Arc<RateLimiter>,
    admins: Arc<AdminList>,
    bot_username: Option<String>,
}

impl CommandRouter {
    pub fn new(store: Arc<dyn RecordStore>, limiter: Arc<RateLimiter>, admins: Arc<AdminList>) -> Self {
        Self {
            store,
            limiter,
            admins,
            bot_username: None,
        }
    }

    /// Sets this bot's username so group commands meant for other bots are skipped.
    pub fn with_bot_username(mut self, bot_username: Option<String>) -> Self {
        self.bot_username = bot_username;
        self
    }

    pub async fn route<C>(&self, chat: &C, message: &InboundMessage)
    where
        C: ChatProvider,
    {
        if !self.limiter.allow(&message.chat_id) {
            tracing::info!("{}", logs::rate_limited(&message.chat_id));
            if let Err(e) = chat.send_notification(messages::RATE_LIMITED).await {
                tracing::error!("{}", logs::send_failed(&message.chat_id, &e.to_string()));
            }
            return;
        }

        let parsed = parse_command(message.text.trim(), self.bot_username.as_deref());
        if parsed.for_other_bot {
            tracing::debug!("{}", logs::other_bot_command(&message.chat_id, &parsed.name));
            return;
        }
        let sender_id = message.sender_id();
        tracing::info!(
            "{}",
            logs::inbound(
                &message.chat_id,
                sender_id.as_deref().unwrap_or("-"),
                &parsed.name
            )
        );

        let result = match parsed.name.as_str() {
            "start" | "help" => commands::help::handle_help(chat).await,
            "profile" | "me" => commands::profile::handle_profile(chat, message.sender.as_ref()).await,
            "setpayment" => {
                commands::payment::handle_set_payment(
                    self.store.as_ref(),
                    &self.admins,
                    chat,
                    sender_id.as_deref(),
                    &parsed.tokens,
                )
                .await
            }
            "getpayments" | "payments" => {
                commands::payment::handle_get_payments(self.store.as_ref(), chat).await
            }
            _ if parsed.is_command => chat.send_message(messages::UNKNOWN_COMMAND).await,
            _ => chat.send_message(messages::PLAIN_TEXT_FALLBACK).await,
        };

        if let Err(e) = result {
            tracing::error!("{}", logs::send_failed(&chat.chat_id(), &e.to_string()));
        }
    }
}
