//! # Profile Command
//!
//! Handles `/profile` and `/me`: echoes what the platform told us about the sender.

use crate::application::utils::sanitize_markup;
use crate::domain::error::Result;
use crate::domain::traits::ChatProvider;
use crate::domain::types::Sender;
use crate::strings::messages;

pub async fn handle_profile(chat: &impl ChatProvider, sender: Option<&Sender>) -> Result<()> {
    chat.send_message(&profile_text(sender)).await
}

fn profile_text(sender: Option<&Sender>) -> String {
    let username = sender
        .and_then(|s| s.username.as_deref())
        .filter(|u| !u.is_empty());

    let name = sender
        .and_then(|s| s.first_name.as_deref())
        .filter(|n| !n.is_empty())
        .or(username)
        .unwrap_or(messages::DEFAULT_NAME);

    let id = sender.map_or_else(|| "unknown".to_string(), |s| s.id.to_string());

    let handle = match username {
        Some(u) => format!("@{}", sanitize_markup(u)),
        None => messages::USERNAME_NOT_SET.to_string(),
    };

    messages::profile(&sanitize_markup(name), &id, &handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_falls_back_to_username_then_default() {
        let with_username = Sender {
            id: 5,
            first_name: None,
            username: Some("sara".to_string()),
        };
        assert_eq!(
            profile_text(Some(&with_username)),
            messages::profile("sara", "5", "@sara")
        );

        let bare = Sender {
            id: 6,
            ..Sender::default()
        };
        assert_eq!(
            profile_text(Some(&bare)),
            messages::profile("User", "6", "(not set)")
        );
    }

    #[test]
    fn test_missing_sender() {
        assert_eq!(
            profile_text(None),
            messages::profile("User", "unknown", "(not set)")
        );
    }
}
