//! # Domain Traits
//!
//! Abstract interfaces for core system components (Chat, Record Store).
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::types::{PaymentRecord, Provider};

/// Abstract interface for a Chat Provider bound to one conversation (e.g., a Telegram chat).
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a markdown-formatted message to the conversation
    async fn send_message(&self, content: &str) -> Result<()>;

    /// Send a plain-text notice (no markup parsing)
    async fn send_notification(&self, content: &str) -> Result<()>;

    /// Get the current conversation ID
    fn chat_id(&self) -> String;
}

/// Abstract interface for the payment record store.
///
/// `upsert` is find-then-create-or-update with no atomicity: two concurrent
/// upserts for the same provider can both miss the lookup and create duplicates.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records, in store order. Unconfigured stores yield an empty list.
    async fn list_all(&self) -> Result<Vec<PaymentRecord>>;

    /// Create or update the single record for `provider`.
    async fn upsert(&self, provider: Provider, details: &str) -> Result<()>;

    /// Whether credentials and addressing are present.
    fn is_configured(&self) -> bool;
}
