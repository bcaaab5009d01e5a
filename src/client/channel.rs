//! Outbound side of the message channel.
//!
//! The game client only holds a send capability; the websocket itself is
//! owned by the transport task. Sends are fire-and-forget: when the
//! channel is gone the action is dropped, never queued or retried.

use log::warn;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::messages::ClientAction;
use crate::error::ChannelError;

/// Capability to push one action towards the server.
pub trait Outbound {
    fn send(&self, action: ClientAction) -> Result<(), ChannelError>;
}

/// Sender half handed to the game client.
#[derive(Clone)]
pub struct ChannelHandle {
    tx: UnboundedSender<ClientAction>,
}

impl ChannelHandle {
    /// Create a handle and the receiver the transport drains.
    pub fn new() -> (Self, UnboundedReceiver<ClientAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

impl Outbound for ChannelHandle {
    fn send(&self, action: ClientAction) -> Result<(), ChannelError> {
        self.tx.send(action).map_err(|err| {
            warn!("[Channel] Dropping {:?}: channel closed", err.0);
            ChannelError::Closed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sends_in_order() {
        let (handle, mut rx) = ChannelHandle::new();
        handle.send(ClientAction::CreateRoom).unwrap();
        handle.send(ClientAction::PlayerReady).unwrap();
        assert_eq!(rx.try_recv().unwrap(), ClientAction::CreateRoom);
        assert_eq!(rx.try_recv().unwrap(), ClientAction::PlayerReady);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_send_after_close_is_dropped() {
        let (handle, rx) = ChannelHandle::new();
        drop(rx);
        assert!(!handle.is_open());
        assert_eq!(handle.send(ClientAction::CreateRoom), Err(ChannelError::Closed));
    }
}
