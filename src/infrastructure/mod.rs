//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, RecordStore).

pub mod airtable;
pub mod telegram;
