//! # Application Layer
//!
//! Contains the core decision logic of the bot: command routing, rate limiting,
//! and the admin allow-list.

pub mod auth;
pub mod rate_limiter;
pub mod router;
pub mod utils;
