//! In-memory stand-ins for the chat and record store seams, used by unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::error::{Error, Result};
use crate::domain::traits::{ChatProvider, RecordStore};
use crate::domain::types::{PaymentRecord, Provider};

/// Records everything sent to one conversation.
pub struct MockChat {
    chat_id: String,
    fail: bool,
    sent: Mutex<Vec<String>>,
    notifications: Mutex<Vec<String>>,
}

impl MockChat {
    pub fn new(chat_id: &str) -> Self {
        Self {
            chat_id: chat_id.to_string(),
            fail: false,
            sent: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(chat_id: &str) -> Self {
        Self {
            fail: true,
            ..Self::new(chat_id)
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn last(&self) -> String {
        self.sent().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn send_message(&self, content: &str) -> Result<()> {
        if self.fail {
            return Err(Error::transport("mock send", "HTTP 502"));
        }
        self.sent.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn send_notification(&self, content: &str) -> Result<()> {
        if self.fail {
            return Err(Error::transport("mock send", "HTTP 502"));
        }
        self.notifications.lock().unwrap().push(content.to_string());
        Ok(())
    }

    fn chat_id(&self) -> String {
        self.chat_id.clone()
    }
}

#[derive(Default, Clone, Copy, PartialEq)]
enum StoreMode {
    #[default]
    Working,
    Unconfigured,
    Failing,
}

/// Find-or-create store over a `Vec`, counting calls.
#[derive(Default)]
pub struct MemoryStore {
    mode: StoreMode,
    records: Mutex<Vec<PaymentRecord>>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn unconfigured() -> Self {
        Self {
            mode: StoreMode::Unconfigured,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: StoreMode::Failing,
            ..Self::default()
        }
    }

    pub fn insert(&self, record: PaymentRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn records(&self) -> Vec<PaymentRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Every list or upsert call.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Upserts that reached the store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<PaymentRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            StoreMode::Working => Ok(self.records()),
            StoreMode::Unconfigured => Ok(Vec::new()),
            StoreMode::Failing => Err(Error::transport("memory list", "HTTP 500")),
        }
    }

    async fn upsert(&self, provider: Provider, details: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            StoreMode::Unconfigured => return Err(Error::configuration("memory store")),
            StoreMode::Failing => return Err(Error::transport("memory upsert", "HTTP 500")),
            StoreMode::Working => {}
        }
        self.writes.fetch_add(1, Ordering::SeqCst);

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.provider == provider) {
            Some(existing) => existing.details = details.to_string(),
            None => records.push(PaymentRecord::new(provider, details)),
        }
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.mode != StoreMode::Unconfigured
    }
}
