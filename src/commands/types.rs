//! Command types and definitions.

use std::fmt;

use thiserror::Error;

/// Available bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    /// Send a prayer, the verse at the reference and its explanation.
    Bible(String),

    /// List the books of the Bible, or show one book's chapter count.
    Books(Option<String>),

    /// Show help information.
    Help,
}

/// Reasons a prefixed message could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing required argument for command: {0}")]
    MissingArgument(&'static str),
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Returns `None` if the message is not addressed to the bot: no
    /// prefix, or an `@Name` suffix naming a bot other than `bot_username`.
    /// Otherwise returns the command or the reason it was rejected.
    pub fn parse(
        text: &str,
        prefix: &str,
        bot_username: Option<&str>,
    ) -> Option<Result<Self, CommandError>> {
        let text = text.trim();

        // Check if message starts with the command prefix
        let after_prefix = text.strip_prefix(prefix)?.trim_start();
        if after_prefix.is_empty() {
            return None;
        }

        // Handle commands with arguments
        let (cmd, args) = match after_prefix.split_once(char::is_whitespace) {
            Some((cmd, args)) => (cmd, Some(args.trim()).filter(|a| !a.is_empty())),
            None => (after_prefix, None),
        };

        // Telegram appends "@BotName" to commands in groups
        let cmd = match cmd.split_once('@') {
            Some((name, addressee)) => {
                if !bot_username.is_some_and(|own| own.eq_ignore_ascii_case(addressee)) {
                    return None;
                }
                name
            }
            None => cmd,
        }
        .to_lowercase();

        let command = match cmd.as_str() {
            "bible" | "biblia" | "verse" => args
                .map(|a| Self::Bible(a.to_owned()))
                .ok_or(CommandError::MissingArgument("bible")),
            "books" | "livros" => Ok(Self::Books(args.map(str::to_owned))),
            "help" | "h" | "?" | "start" => Ok(Self::Help),
            _ => Err(CommandError::Unknown(cmd)),
        };

        Some(command)
    }

    /// Returns the command name as it appears in help.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bible(_) => "bible",
            Self::Books(_) => "books",
            Self::Help => "help",
        }
    }

    /// Returns the command description for help.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Bible(_) => "Sends a prayer, a Bible verse and its explanation",
            Self::Books(_) => "Lists the books of the Bible and their chapters",
            Self::Help => "Shows this help message",
        }
    }

    /// Returns all available commands with their usage, aliases and descriptions.
    #[must_use]
    pub fn all_commands() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            (
                "bible <Book> <Chapter>:<Verse>",
                "(biblia, verse)",
                "Sends a prayer, a Bible verse and its explanation",
            ),
            ("books [book]", "(livros)", "Lists the books of the Bible and their chapters"),
            ("help", "(h, ?)", "Shows this help message"),
        ]
    }

    /// Command names and descriptions for the platform command menu.
    #[must_use]
    pub fn menu() -> Vec<(&'static str, &'static str)> {
        [
            Self::Bible(String::new()),
            Self::Books(None),
            Self::Help,
        ]
        .iter()
        .map(|command| (command.name(), command.description()))
        .collect()
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bible(reference) => write!(f, "bible {reference}"),
            Self::Books(Some(book)) => write!(f, "books {book}"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Result of command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command was successful.
    pub success: bool,

    /// Response message to show the user.
    pub message: String,
}

impl CommandResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Creates an error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/";

    #[test]
    fn test_parse_bible() {
        assert_eq!(
            BotCommand::parse("/bible John 3:16", PREFIX, None),
            Some(Ok(BotCommand::Bible("John 3:16".to_owned())))
        );
        assert_eq!(
            BotCommand::parse("/biblia 1 Coríntios 13:4", PREFIX, None),
            Some(Ok(BotCommand::Bible("1 Coríntios 13:4".to_owned())))
        );
    }

    #[test]
    fn test_parse_bible_without_reference() {
        assert_eq!(
            BotCommand::parse("/bible", PREFIX, None),
            Some(Err(CommandError::MissingArgument("bible")))
        );
        assert_eq!(
            BotCommand::parse("/bible    ", PREFIX, None),
            Some(Err(CommandError::MissingArgument("bible")))
        );
    }

    #[test]
    fn test_parse_keeps_reference_verbatim() {
        assert_eq!(
            BotCommand::parse("/verse   Psalms 23:1-6  ", PREFIX, None),
            Some(Ok(BotCommand::Bible("Psalms 23:1-6".to_owned())))
        );
    }

    #[test]
    fn test_parse_own_bot_username_suffix() {
        assert_eq!(
            BotCommand::parse("/bible@ScriptureBot Romans 8:28", PREFIX, Some("ScriptureBot")),
            Some(Ok(BotCommand::Bible("Romans 8:28".to_owned())))
        );
        assert_eq!(
            BotCommand::parse("/help@scripturebot", PREFIX, Some("ScriptureBot")),
            Some(Ok(BotCommand::Help))
        );
    }

    #[test]
    fn test_parse_other_bot_username_suffix() {
        assert_eq!(
            BotCommand::parse("/bible@OtherBot John 3:16", PREFIX, Some("ScriptureBot")),
            None
        );
        assert_eq!(BotCommand::parse("/stats@OtherBot", PREFIX, Some("ScriptureBot")), None);
    }

    #[test]
    fn test_parse_suffix_without_known_username() {
        assert_eq!(BotCommand::parse("/bible@ScriptureBot John 3:16", PREFIX, None), None);
        assert_eq!(
            BotCommand::parse("/bible John 3:16", PREFIX, None),
            Some(Ok(BotCommand::Bible("John 3:16".to_owned())))
        );
    }

    #[test]
    fn test_parse_books() {
        assert_eq!(BotCommand::parse("/books", PREFIX, None), Some(Ok(BotCommand::Books(None))));
        assert_eq!(
            BotCommand::parse("/livros Psalms", PREFIX, None),
            Some(Ok(BotCommand::Books(Some("Psalms".to_owned()))))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            BotCommand::parse("/pray now", PREFIX, None),
            Some(Err(CommandError::Unknown("pray".to_owned())))
        );
    }

    #[test]
    fn test_parse_wrong_prefix() {
        assert_eq!(BotCommand::parse("!bible John 3:16", PREFIX, None), None);
        assert_eq!(BotCommand::parse("bible John 3:16", PREFIX, None), None);
        assert_eq!(BotCommand::parse("/", PREFIX, None), None);
    }

    #[test]
    fn test_parse_custom_prefix() {
        assert_eq!(
            BotCommand::parse("!bible Genesis 1:1", "!", None),
            Some(Ok(BotCommand::Bible("Genesis 1:1".to_owned())))
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            BotCommand::parse("/BIBLE John 1:1", PREFIX, None),
            Some(Ok(BotCommand::Bible("John 1:1".to_owned())))
        );
        assert_eq!(BotCommand::parse("/Help", PREFIX, None), Some(Ok(BotCommand::Help)));
    }

    #[test]
    fn test_parse_with_extra_whitespace() {
        assert_eq!(BotCommand::parse("  /   help  ", PREFIX, None), Some(Ok(BotCommand::Help)));
    }

    #[test]
    fn test_menu_names() {
        let names: Vec<_> = BotCommand::menu().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["bible", "books", "help"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(BotCommand::Bible("John 3:16".to_owned()).to_string(), "bible John 3:16");
        assert_eq!(BotCommand::Books(None).to_string(), "books");
    }
}
