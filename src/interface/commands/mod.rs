//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., /start, /profile, /setpayment).
//! These handlers are invoked by the Router and reply through the `ChatProvider`.

pub mod help;
pub mod payment;
pub mod profile;
