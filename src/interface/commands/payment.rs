//! # Payment Commands
//!
//! Handles `/setpayment <provider> <details>` (admin only) and `/getpayments`.
//! Checks run in a fixed order: authorization, arity, provider, then the store call.

use crate::application::auth::AdminList;
use crate::application::utils::sanitize_markup;
use crate::domain::error::Result;
use crate::domain::traits::{ChatProvider, RecordStore};
use crate::domain::types::Provider;
use crate::strings::{logs, messages};

pub async fn handle_set_payment(
    store: &dyn RecordStore,
    admins: &AdminList,
    chat: &impl ChatProvider,
    sender_id: Option<&str>,
    tokens: &[&str],
) -> Result<()> {
    if !admins.is_admin(sender_id) {
        return chat.send_message(messages::ADMIN_ONLY).await;
    }

    if tokens.len() < 3 {
        return chat.send_message(messages::SET_PAYMENT_USAGE).await;
    }

    let Some(provider) = Provider::from_str(tokens[1]) else {
        let allowed = Provider::ALL.map(|p| p.as_str());
        return chat
            .send_message(&messages::invalid_provider(&sanitize_markup(tokens[1]), &allowed))
            .await;
    };

    let details = tokens[2..].join(" ");
    let shown = sanitize_markup(&details);

    match store.upsert(provider, &details).await {
        Ok(()) => {
            tracing::info!("Payment method {} updated by {:?}", provider, sender_id);
            chat.send_message(&messages::payment_updated(provider.as_str(), &shown))
                .await
        }
        Err(e) if e.is_configuration() => {
            tracing::warn!("{}", logs::store_unconfigured_write(provider.as_str(), &e.to_string()));
            chat.send_message(&messages::payment_not_persisted(provider.as_str(), &shown))
                .await
        }
        Err(e) => {
            tracing::error!("{}", logs::store_write_failed(provider.as_str(), &e.to_string()));
            chat.send_message(messages::PAYMENT_UPDATE_FAILED).await
        }
    }
}

pub async fn handle_get_payments(store: &dyn RecordStore, chat: &impl ChatProvider) -> Result<()> {
    match store.list_all().await {
        Ok(records) if records.is_empty() => chat.send_message(messages::NO_PAYMENTS).await,
        Ok(records) => {
            let lines: Vec<String> = records
                .iter()
                .map(|r| messages::payment_line(r.provider.as_str(), &sanitize_markup(&r.details)))
                .collect();
            chat.send_message(&messages::payment_list(&lines)).await
        }
        Err(e) => {
            tracing::error!("{}", logs::store_read_failed(&e.to_string()));
            chat.send_message(messages::PAYMENTS_READ_FAILED).await
        }
    }
}
