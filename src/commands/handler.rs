//! Command handler implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::types::{BotCommand, CommandError, CommandResult};
use crate::devotional::{
    BookCatalog, MAX_MESSAGE_LEN, ReplyFormatter, chunk_message, generate_passage,
    generate_prayer, truncate_for_log,
};
use crate::generation::TextGenerator;
use crate::telegram::TelegramError;

/// Notice sent when a command fails for a reason the user cannot fix.
pub const UNEXPECTED_ERROR_NOTICE: &str =
    "An unexpected error occurred while processing your command.";

/// Sends text back to the chat a command came from.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends one message.
    async fn respond(&self, text: &str) -> Result<(), TelegramError>;
}

/// Handles bot commands.
pub struct CommandHandler<G: ?Sized> {
    /// Command prefix (e.g., "/").
    prefix: String,

    /// This bot's username, matched against `@Name` command suffixes.
    bot_username: Option<String>,

    /// Generation API used for prayers and passages.
    generator: Arc<G>,

    /// Reply formatter.
    formatter: ReplyFormatter,

    /// Book reference data for the `books` command.
    catalog: BookCatalog,
}

impl<G: TextGenerator + ?Sized> CommandHandler<G> {
    /// Creates a new command handler.
    #[must_use]
    pub fn new(prefix: String, generator: Arc<G>, formatter: ReplyFormatter) -> Self {
        Self {
            prefix,
            bot_username: None,
            generator,
            formatter,
            catalog: BookCatalog::standard(),
        }
    }

    /// Sets the username used to tell this bot's `/command@Name` apart
    /// from commands addressed to other bots.
    #[must_use]
    pub fn with_bot_username(mut self, username: Option<String>) -> Self {
        self.bot_username = username;
        self
    }

    /// Command prefix this handler reacts to.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Tries to parse and execute a command from a message, sending every
    /// reply through `responder`.
    ///
    /// Returns `None` if the message is not a command.
    pub async fn try_handle<R>(&self, message_text: &str, responder: &R) -> Option<CommandResult>
    where
        R: Responder + ?Sized,
    {
        let parsed = BotCommand::parse(message_text, &self.prefix, self.bot_username.as_deref())?;
        let result = match parsed {
            Ok(command) => {
                debug!("Handling command: {}", command);
                match self.execute(command, responder).await {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Error in command: {}", e);
                        CommandResult::error(UNEXPECTED_ERROR_NOTICE)
                    }
                }
            }
            Err(CommandError::Unknown(name)) => {
                debug!("Unknown command: {}", name);
                CommandResult::error(self.usage_hint())
            }
            Err(CommandError::MissingArgument(command)) => {
                debug!("Missing argument for command: {}", command);
                CommandResult::error(self.missing_reference_prompt())
            }
        };

        info!("Command result: success={}", result.success);

        for chunk in chunk_message(&result.message, MAX_MESSAGE_LEN) {
            if let Err(e) = responder.respond(&chunk).await {
                error!("Failed to send reply: {}", e);
                break;
            }
        }

        Some(result)
    }

    /// Executes a parsed command.
    async fn execute<R>(&self, command: BotCommand, responder: &R) -> Result<CommandResult, TelegramError>
    where
        R: Responder + ?Sized,
    {
        match command {
            BotCommand::Bible(reference) => self.handle_bible(&reference, responder).await,
            BotCommand::Books(book) => Ok(self.handle_books(book.as_deref())),
            BotCommand::Help => Ok(self.handle_help()),
        }
    }

    async fn handle_bible<R>(&self, reference: &str, responder: &R) -> Result<CommandResult, TelegramError>
    where
        R: Responder + ?Sized,
    {
        info!("Passage requested: \"{}\"", truncate_for_log(reference, 40));

        responder
            .respond(&ReplyFormatter::acknowledgment(reference))
            .await?;

        let generator = &*self.generator;
        let (prayer, passage) = tokio::join!(
            generate_prayer(generator),
            generate_passage(generator, reference)
        );

        info!(
            "Generation finished: prayer={}, passage={}",
            prayer.kind(),
            passage.kind()
        );

        let message = self.formatter.format_reply(prayer.value(), passage.value());

        Ok(CommandResult {
            success: !prayer.is_failed() && !passage.is_failed(),
            message,
        })
    }

    fn handle_books(&self, book: Option<&str>) -> CommandResult {
        let Some(book) = book else {
            let mut lines = vec![format!("Books of the Bible ({}):", self.catalog.len())];
            lines.extend(
                self.catalog
                    .iter()
                    .map(|(name, chapters)| format!("{name} ({chapters})")),
            );
            return CommandResult::success(lines.join("\n"));
        };

        match self.catalog.find(book) {
            Some((name, 1)) => CommandResult::success(format!("{name} has 1 chapter.")),
            Some((name, chapters)) => {
                CommandResult::success(format!("{name} has {chapters} chapters."))
            }
            None => CommandResult::error(format!(
                "Unknown book: '{book}'. Use {}books to see all books.",
                self.prefix
            )),
        }
    }

    fn handle_help(&self) -> CommandResult {
        let mut lines = vec!["Available commands:".to_owned()];

        for (usage, aliases, description) in BotCommand::all_commands() {
            if aliases.is_empty() {
                lines.push(format!("{}{usage} - {description}", self.prefix));
            } else {
                lines.push(format!("{}{usage} {aliases} - {description}", self.prefix));
            }
        }

        lines.push(String::new());
        lines.push(format!("Example: {}bible John 3:16", self.prefix));

        CommandResult::success(lines.join("\n"))
    }

    fn usage_hint(&self) -> String {
        format!(
            "Sorry, that command does not exist. Use {p}bible <book> <chapter>:<verse> (e.g. {p}bible Genesis 1:1)",
            p = self.prefix
        )
    }

    fn missing_reference_prompt(&self) -> String {
        format!(
            "Please provide the Bible reference. E.g. {}bible John 3:16",
            self.prefix
        )
    }
}

impl<G: ?Sized> std::fmt::Debug for CommandHandler<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandler")
            .field("prefix", &self.prefix)
            .field("bot_username", &self.bot_username)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}
