/// Characters the outbound Markdown rendering treats as markup.
const MARKUP_CHARS: [char; 5] = ['*', '_', '`', '[', ']'];

/// Strips emphasis, code and link markers from user-controlled text before it is
/// interpolated into a Markdown reply.
/// e.g. `*bold_name*` -> `boldname`
pub fn sanitize_markup(text: &str) -> String {
    text.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

/// A message split into its command word and whitespace-delimited tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lowercased first token without the leading `/` or a trailing `@botname`
    pub name: String,
    /// Whether the first token carried the `/` marker
    pub is_command: bool,
    /// The command was suffixed `@otherbot` for a bot other than this one
    pub for_other_bot: bool,
    /// All tokens, the command word included
    pub tokens: Vec<&'a str>,
}

/// Splits `text` into tokens and extracts the command word.
///
/// `bot_username` is this bot's own username (with or without `@`). When it is
/// unknown, any `@suffix` is accepted as addressed to us.
pub fn parse_command<'a>(text: &'a str, bot_username: Option<&str>) -> ParsedCommand<'a> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let first = tokens.first().copied().unwrap_or("");

    let is_command = first.starts_with('/');
    let word = first.strip_prefix('/').unwrap_or(first);
    // Group chats address commands as /start@SomeBot
    let (word, target) = match word.split_once('@') {
        Some((cmd, bot)) if is_command => (cmd, Some(bot)),
        _ => (word, None),
    };
    let own = bot_username
        .map(|u| u.trim().trim_start_matches('@'))
        .filter(|u| !u.is_empty());
    let for_other_bot = match (target, own) {
        (Some(target), Some(own)) => !target.eq_ignore_ascii_case(own),
        _ => false,
    };

    ParsedCommand {
        name: word.to_lowercase(),
        is_command,
        for_other_bot,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_markup() {
        assert_eq!(sanitize_markup("*evil* `code` [link](x) _u_"), "evil code link(x) u");
        assert_eq!(sanitize_markup("plain text 0300-1234567"), "plain text 0300-1234567");
        assert_eq!(sanitize_markup(""), "");
    }

    #[test]
    fn test_parse_with_marker() {
        let parsed = parse_command("  /SetPayment  jazzcash 0300 1234  ", None);
        assert_eq!(parsed.name, "setpayment");
        assert!(parsed.is_command);
        assert_eq!(parsed.tokens, vec!["/SetPayment", "jazzcash", "0300", "1234"]);
    }

    #[test]
    fn test_parse_without_marker() {
        let parsed = parse_command("payments", None);
        assert_eq!(parsed.name, "payments");
        assert!(!parsed.is_command);
    }

    #[test]
    fn test_parse_strips_bot_suffix() {
        let parsed = parse_command("/start@PayBot", None);
        assert_eq!(parsed.name, "start");
        assert!(!parsed.for_other_bot);
        // Only commands carry a bot suffix
        assert_eq!(parse_command("me@home", Some("PayBot")).name, "me@home");
        assert!(!parse_command("me@home", Some("PayBot")).for_other_bot);
    }

    #[test]
    fn test_parse_flags_other_bot_suffix() {
        let parsed = parse_command("/start@OtherBot", Some("PayBot"));
        assert_eq!(parsed.name, "start");
        assert!(parsed.for_other_bot);

        assert!(!parse_command("/start@paybot", Some("@PayBot")).for_other_bot);
        assert!(!parse_command("/start", Some("PayBot")).for_other_bot);
        assert!(!parse_command("/start@OtherBot", Some("  ")).for_other_bot);
    }

    #[test]
    fn test_parse_empty() {
        let parsed = parse_command("   ", None);
        assert_eq!(parsed.name, "");
        assert!(!parsed.is_command);
        assert!(parsed.tokens.is_empty());
    }
}
