//! Relays a check result from the frame that issued the request to the
//! top-level frame that renders it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::suggestion::Suggestion;

/// Envelope carried over the messaging channel between frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum RelayMessage {
    CheckResult {
        text: String,
        suggestions: Vec<Suggestion>,
    },
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Relay receiver dropped")]
    Disconnected,
}

/// Publishing half, cloned into every frame that can issue a check.
#[derive(Debug, Clone)]
pub struct ResultRelay {
    tx: mpsc::UnboundedSender<RelayMessage>,
}

/// Receiving half, owned by the top-level frame.
#[derive(Debug)]
pub struct RelayReceiver {
    rx: mpsc::UnboundedReceiver<RelayMessage>,
}

pub fn channel() -> (ResultRelay, RelayReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ResultRelay { tx }, RelayReceiver { rx })
}

impl ResultRelay {
    pub fn publish(&self, message: RelayMessage) -> Result<(), RelayError> {
        self.tx.send(message).map_err(|_| RelayError::Disconnected)
    }
}

impl RelayReceiver {
    /// Waits for the next relayed result; `None` once every publisher is
    /// gone.
    pub async fn recv(&mut self) -> Option<RelayMessage> {
        self.rx.recv().await
    }
}
