pub fn config_loaded(path: &str, store_configured: bool, admins: usize) -> String {
    format!("Loaded configuration from {path} (store configured: {store_configured}, admin ids: {admins})")
}

pub fn server_listening(addr: &str, webhook_path: &str) -> String {
    format!("Webhook server listening on {addr} (path {webhook_path})")
}

pub const SERVER_STOPPED: &str = "Webhook server stopped";
pub const OPEN_ADMIN_POLICY: &str =
    "Admin allow-list is empty: every sender is treated as admin";
pub const TOKEN_MISSING: &str = "No Telegram bot token configured; replies will not be delivered";

pub fn inbound(chat_id: &str, sender: &str, command: &str) -> String {
    format!("Inbound chat={chat_id} sender={sender} command='{command}'")
}

pub fn other_bot_command(chat_id: &str, command: &str) -> String {
    format!("Ignoring '/{command}' addressed to another bot in chat {chat_id}")
}

pub fn rate_limited(chat_id: &str) -> String {
    format!("Rate limit exceeded for chat {chat_id}")
}

pub fn send_failed(chat_id: &str, err: &str) -> String {
    format!("Failed to deliver reply to chat {chat_id}: {err}")
}

pub fn sending(chat_id: &str, content: &str) -> String {
    format!("Bot sending message to {chat_id}: {content}")
}

pub fn store_write_failed(provider: &str, err: &str) -> String {
    format!("Payment upsert for {provider} failed: {err}")
}

pub fn store_read_failed(err: &str) -> String {
    format!("Payment listing failed: {err}")
}

pub fn store_unconfigured_write(provider: &str, err: &str) -> String {
    format!("Payment upsert for {provider} skipped, store {err}")
}

pub fn skipped_record(id: &str) -> String {
    format!("Skipping store record {id}: missing or unknown provider")
}

pub fn payload_rejected(err: &str) -> String {
    format!("Ignoring unparseable update payload: {err}")
}

pub const UPDATE_WITHOUT_CHAT: &str = "Update carries no message with a chat id; acknowledging";
pub const ROUTER_PANICKED: &str = "Command routing panicked; acknowledging anyway";
