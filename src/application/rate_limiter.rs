//! Fixed-window request throttle keyed by conversation.
//!
//! Each conversation gets a window of `window` length that admits at most
//! `max_requests` messages. The first message after a window has expired opens a
//! new one. Windows live in process memory and are never evicted, so a
//! long-running process grows one entry per conversation it has seen.
//!
//! The map sits behind a `Mutex` because the webhook server handles updates
//! concurrently and every check is a read-modify-write.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::config::RateLimitConfig;

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("rate limiter state is poisoned")]
    Poisoned,
    #[error("window of {0:?} overflows the clock")]
    Overflow(Duration),
}

#[derive(Debug, Clone, Copy)]
struct RateWindow {
    count: u32,
    reset_at: Instant,
}

pub struct RateLimiter {
    /// Length of one window
    window: Duration,
    /// Messages admitted per window
    max_requests: u32,
    windows: Mutex<HashMap<String, RateWindow>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(Duration::from_millis(config.window_ms), config.max_requests)
    }

    /// Whether a message from `chat_id` may be processed now.
    ///
    /// Never fails: an internal fault lets the message through.
    pub fn allow(&self, chat_id: &str) -> bool {
        self.allow_at(chat_id, Instant::now())
    }

    pub fn allow_at(&self, chat_id: &str, now: Instant) -> bool {
        match self.try_allow_at(chat_id, now) {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::warn!("Rate limiter fault for chat {}, allowing: {}", chat_id, e);
                true
            }
        }
    }

    pub fn try_allow_at(&self, chat_id: &str, now: Instant) -> Result<bool, RateLimitError> {
        if self.max_requests == 0 {
            return Ok(false);
        }
        // Overflow is checked before locking; a panic under the guard poisons the map
        let reset_at = now
            .checked_add(self.window)
            .ok_or(RateLimitError::Overflow(self.window))?;

        let mut windows = self.windows.lock().map_err(|_| RateLimitError::Poisoned)?;

        if let Some(w) = windows.get_mut(chat_id)
            && now <= w.reset_at
        {
            if w.count < self.max_requests {
                w.count += 1;
                return Ok(true);
            }
            return Ok(false);
        }

        windows.insert(
            chat_id.to_string(),
            RateWindow {
                count: 1,
                reset_at,
            },
        );
        Ok(true)
    }

    /// Number of conversations with a window on record.
    pub fn tracked(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or(0)
    }
}
