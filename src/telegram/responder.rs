//! Channel-backed [`Responder`] used by the update dispatcher.
//!
//! The command handler pushes replies into a channel; the task that owns
//! the incoming Telegram message drains it and sends each reply, handing
//! the outcome back so the handler sees send failures.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::TelegramError;
use crate::commands::Responder;

/// A reply waiting to be sent, with the channel its outcome goes back on.
pub type OutgoingReply = (String, oneshot::Sender<Result<(), TelegramError>>);

/// Responder that forwards replies to whoever owns the receiving end.
#[derive(Debug)]
pub struct ChannelResponder {
    tx: mpsc::UnboundedSender<OutgoingReply>,
}

impl ChannelResponder {
    /// Creates a responder and the receiver its replies arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutgoingReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Responder for ChannelResponder {
    async fn respond(&self, text: &str) -> Result<(), TelegramError> {
        let (done_tx, done_rx) = oneshot::channel();

        self.tx
            .send((text.to_owned(), done_tx))
            .map_err(|_| TelegramError::Connection("reply channel closed".to_owned()))?;

        done_rx
            .await
            .map_err(|_| TelegramError::Connection("reply was dropped before sending".to_owned()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_delivered_in_order() {
        let (responder, mut outbox) = ChannelResponder::new();

        let deliver = tokio::spawn(async move {
            let mut delivered = Vec::new();
            while let Some((text, done)) = outbox.recv().await {
                delivered.push(text);
                let _ = done.send(Ok(()));
            }
            delivered
        });

        responder.respond("first").await.unwrap();
        responder.respond("second").await.unwrap();
        drop(responder);

        assert_eq!(deliver.await.unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_send_failure_is_reported() {
        let (responder, mut outbox) = ChannelResponder::new();

        tokio::spawn(async move {
            while let Some((_, done)) = outbox.recv().await {
                let _ = done.send(Err(TelegramError::FloodWait(5)));
            }
        });

        assert!(matches!(
            responder.respond("hello").await,
            Err(TelegramError::FloodWait(5))
        ));
    }

    #[tokio::test]
    async fn test_closed_channel_is_an_error() {
        let (responder, outbox) = ChannelResponder::new();
        drop(outbox);

        assert!(matches!(
            responder.respond("hello").await,
            Err(TelegramError::Connection(_))
        ));
    }
}
