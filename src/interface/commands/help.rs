//! # Help Command
//!
//! Handles the `/start` and `/help` commands.
//! Displays the command list to the user.

use crate::domain::error::Result;
use crate::domain::traits::ChatProvider;

pub async fn handle_help(chat: &impl ChatProvider) -> Result<()> {
    chat.send_message(crate::strings::help::MAIN).await
}
