//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Callers sanitize any user-controlled value before passing it in.

pub const UNKNOWN_COMMAND: &str = "❓ Unknown command. Send /help to see what I can do.";
pub const PLAIN_TEXT_FALLBACK: &str =
    "🤖 I only understand a few commands. Send /help to see them.";
pub const RATE_LIMITED: &str = "⏳ Too many messages. Please slow down and try again in a few seconds.";

pub const ADMIN_ONLY: &str = "🚫 *Admin only*. You are not allowed to change payment methods.";
pub const SET_PAYMENT_USAGE: &str = "Usage: /setpayment <provider> <details>\nExample: /setpayment jazzcash 0300-1234567";
pub const PAYMENT_UPDATE_FAILED: &str = "❌ Failed to update payment method. Please try again later.";

pub const NO_PAYMENTS: &str = "No payment methods configured yet.";
pub const PAYMENTS_READ_FAILED: &str = "❌ Error reading payment methods. Please try again later.";

pub const DEFAULT_NAME: &str = "User";
pub const USERNAME_NOT_SET: &str = "(not set)";

pub fn invalid_provider(given: &str, allowed: &[&str]) -> String {
    format!(
        "❌ Invalid provider *{given}*.\nAllowed: {}",
        allowed.join(", ")
    )
}

pub fn payment_updated(provider: &str, details: &str) -> String {
    format!("✅ Payment method updated\n*{provider}*: {details}")
}

/// Reply when the store has no credentials: echo what would have been saved.
pub fn payment_not_persisted(provider: &str, details: &str) -> String {
    format!(
        "⚠️ Storage is not configured, nothing was saved.\nWould set *{provider}*: {details}"
    )
}

pub fn payment_list(lines: &[String]) -> String {
    format!("💳 *Payment Methods*\n{}", lines.join("\n"))
}

pub fn payment_line(provider: &str, details: &str) -> String {
    format!("- {provider}: {details}")
}

pub fn profile(name: &str, id: &str, username: &str) -> String {
    format!("👤 *Profile*\nName: {name}\nID: {id}\nUsername: {username}")
}
