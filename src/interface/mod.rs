//! # Interface Layer
//!
//! Entry points into the bot: the HTTP webhook boundary and the command handlers it reaches.

pub mod commands;
pub mod server;
pub mod webhook;
