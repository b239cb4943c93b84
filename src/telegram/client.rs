//! Telegram client wrapper for running the command bot.

use std::sync::Arc;

use grammers_client::{Client, InvocationError, SenderPool, sender};
use grammers_session::storages::SqliteSession;
use grammers_tl_types as tl;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::responder::ChannelResponder;
use crate::commands::CommandHandler;
use crate::config::TelegramConfig;
use crate::generation::TextGenerator;

pub use grammers_client::update::Update;

/// Updates buffered between the update stream and the dispatcher.
const UPDATE_QUEUE_SIZE: usize = 100;

/// Errors that can occur during Telegram operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Not authorized. Please sign in first.")]
    NotAuthorized,

    #[error("Sign in failed: {0}")]
    SignInFailed(String),

    #[error("Flood wait required: {0} seconds")]
    FloodWait(u32),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("API invocation error: {0}")]
    Invocation(String),

    #[error("Update stream is already running")]
    AlreadyRunning,
}

impl From<InvocationError> for TelegramError {
    fn from(err: InvocationError) -> Self {
        let err_str = err.to_string();

        // Check for flood wait errors
        if (err_str.contains("FLOOD_WAIT") || err_str.contains("flood"))
            && let Some(seconds) = extract_flood_wait_seconds(&err_str)
        {
            return Self::FloodWait(seconds);
        }

        Self::Invocation(err_str)
    }
}

/// Extracts flood wait seconds from an error message.
fn extract_flood_wait_seconds(err_msg: &str) -> Option<u32> {
    let patterns = ["FLOOD_WAIT_", "flood wait "];

    for pattern in patterns {
        if let Some(idx) = err_msg.to_lowercase().find(&pattern.to_lowercase()) {
            let start = idx + pattern.len();
            let num_str: String = err_msg[start..]
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            if let Ok(seconds) = num_str.parse() {
                return Some(seconds);
            }
        }
    }
    None
}

/// High-level Telegram bot client.
pub struct TelegramBot {
    /// The underlying grammers client.
    client: Client,

    /// Handle to the sender pool for disconnection.
    handle: sender::SenderPoolHandle,

    /// The bot's own username, as reported by Telegram after sign-in.
    username: Option<String>,

    /// Incoming updates, taken by [`TelegramBot::run`].
    updates: Mutex<Option<mpsc::Receiver<Update>>>,

    /// Stops the update stream task.
    stop_updates: Mutex<Option<oneshot::Sender<()>>>,

    /// Background task reading the update stream.
    update_task: Mutex<Option<JoinHandle<()>>>,

    /// Background task running the sender pool.
    _pool_task: JoinHandle<()>,
}

impl TelegramBot {
    /// Connects to Telegram, signs in with the bot token if the session is
    /// not yet authorized, and starts listening for updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file cannot be opened, the bot token
    /// is rejected, or the bot's own account cannot be fetched.
    pub async fn connect(config: &TelegramConfig) -> Result<Self, TelegramError> {
        info!("Connecting to Telegram...");

        let session = Arc::new(
            SqliteSession::open(&config.session_path)
                .await
                .map_err(|e| TelegramError::Session(e.to_string()))?,
        );

        let SenderPool {
            runner,
            updates,
            handle,
        } = SenderPool::new(Arc::clone(&session), config.api_id);

        let client = Client::new(handle.clone());

        // Spawn the sender pool runner
        let pool_task = tokio::spawn(async move {
            runner.run().await;
        });

        let is_authorized = client
            .is_authorized()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))?;

        info!("Connected to Telegram. Authorized: {}", is_authorized);

        if !is_authorized {
            info!("Signing in with bot token...");
            client
                .bot_sign_in(&config.bot_token, &config.api_hash)
                .await
                .map_err(|e| TelegramError::SignInFailed(e.to_string()))?;
            info!("Successfully signed in!");
        }

        let me = client.get_me().await?;
        let username = me.username().map(str::to_owned);
        info!("Signed in as @{}", username.as_deref().unwrap_or("<no username>"));

        // Forward updates into a channel so the dispatcher owns plain `Update`s.
        let (update_tx, update_rx) = mpsc::channel(UPDATE_QUEUE_SIZE);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let stream_client = client.clone();

        let update_task = tokio::spawn(async move {
            let mut stream = stream_client.stream_updates(updates, Default::default()).await;

            loop {
                let update = tokio::select! {
                    _ = &mut stop_rx => break,
                    update = stream.next() => update,
                };

                match update {
                    Ok(update) => {
                        if update_tx.send(update).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Update stream failed: {}", e);
                        break;
                    }
                }
            }

            stream.sync_update_state();
            debug!("Update stream stopped");
        });

        Ok(Self {
            client,
            handle: handle.thin,
            username,
            updates: Mutex::new(Some(update_rx)),
            stop_updates: Mutex::new(Some(stop_tx)),
            update_task: Mutex::new(Some(update_task)),
            _pool_task: pool_task,
        })
    }

    /// The bot's own username, used to recognise `/command@Name` addressed to it.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Checks if the client is authorized.
    ///
    /// # Errors
    ///
    /// Returns an error if Telegram cannot be reached.
    pub async fn is_authorized(&self) -> Result<bool, TelegramError> {
        self.client
            .is_authorized()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))
    }

    /// Publishes the bot's command list to Telegram's command menu.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::NotAuthorized`] if the session is not signed
    /// in, or an invocation error if Telegram rejects the command list.
    pub async fn register_commands(
        &self,
        commands: &[(&str, &str)],
    ) -> Result<(), TelegramError> {
        if !self.is_authorized().await? {
            return Err(TelegramError::NotAuthorized);
        }

        debug!("Registering {} bot commands", commands.len());

        let request = tl::functions::bots::SetBotCommands {
            scope: tl::enums::BotCommandScope::Default,
            lang_code: String::new(),
            commands: commands
                .iter()
                .map(|(command, description)| {
                    tl::types::BotCommand {
                        command: (*command).to_owned(),
                        description: (*description).to_owned(),
                    }
                    .into()
                })
                .collect(),
        };

        self.client.invoke(&request).await?;
        info!("Bot commands registered");
        Ok(())
    }

    /// Dispatches incoming messages to the command handler until the
    /// update stream ends.
    ///
    /// Every message is handled on its own task.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::AlreadyRunning`] if the updates were already
    /// taken by an earlier call.
    pub async fn run<G>(&self, handler: Arc<CommandHandler<G>>) -> Result<(), TelegramError>
    where
        G: TextGenerator + ?Sized + 'static,
    {
        let mut updates = self
            .updates
            .lock()
            .await
            .take()
            .ok_or(TelegramError::AlreadyRunning)?;

        info!("Listening for commands (prefix: {})", handler.prefix());

        while let Some(update) = updates.recv().await {
            let Update::NewMessage(message) = update else {
                continue;
            };
            if message.outgoing() {
                continue;
            }

            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                let text = message.text().to_owned();
                let (responder, mut outbox) = ChannelResponder::new();

                let handle = async move {
                    let result = handler.try_handle(&text, &responder).await;
                    drop(responder);
                    result
                };

                let deliver = async {
                    while let Some((reply, done)) = outbox.recv().await {
                        let sent = message
                            .respond(reply.as_str())
                            .await
                            .map(|_| ())
                            .map_err(TelegramError::from);
                        if let Err(e) = &sent {
                            warn!("Failed to send message: {}", e);
                        }
                        let _ = done.send(sent);
                    }
                };

                let (result, ()) = tokio::join!(handle, deliver);
                if let Some(result) = result {
                    debug!("Handled command, success={}", result.success);
                }
            });
        }

        info!("Update stream closed");
        Ok(())
    }

    /// Stops the update stream and disconnects from Telegram.
    pub async fn disconnect(&self) {
        info!("Disconnecting from Telegram...");

        if let Some(stop) = self.stop_updates.lock().await.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.update_task.lock().await.take() {
            let _ = task.await;
        }

        self.handle.quit();
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
