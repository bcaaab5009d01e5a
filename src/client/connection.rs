//! Websocket link between the game server and the game client actor.
//!
//! Inbound text frames are decoded into `ServerEvent`s and forwarded to
//! the actor in arrival order; actions queued on the outbound channel are
//! encoded and written as text frames.

use actix::Addr;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::client::messages::{ClientAction, LinkStatus, ServerEvent};
use crate::client::session::GameClient;
use crate::error::ClientError;

/// Decode one inbound frame. Malformed or unknown messages are dropped.
pub fn decode(text: &str) -> Option<ServerEvent> {
    match serde_json::from_str(text) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!("[Connection] Dropping malformed message: {} ({})", text, err);
            None
        }
    }
}

fn check_url(url: &str) -> Result<(), ClientError> {
    if url.starts_with("ws://") || url.starts_with("wss://") {
        Ok(())
    } else {
        Err(ClientError::InvalidUrl { url: url.to_string() })
    }
}

/// Connect to `url` and shuttle messages until either side closes.
/// The client is told when the link opens and when it goes away.
pub async fn run(
    url: &str,
    client: Addr<GameClient>,
    outbound: UnboundedReceiver<ClientAction>,
) -> Result<(), ClientError> {
    check_url(url)?;
    info!("[Connection] Connecting to {}", url);
    let result = pump(url, &client, outbound).await;
    client.do_send(LinkStatus::Closed);
    match &result {
        Ok(()) => info!("[Connection] Closed"),
        Err(err) => warn!("[Connection] Closed with error: {}", err),
    }
    result
}

async fn pump(
    url: &str,
    client: &Addr<GameClient>,
    mut outbound: UnboundedReceiver<ClientAction>,
) -> Result<(), ClientError> {
    let (ws, _response) = connect_async(url).await?;
    let (mut write, mut read) = ws.split();
    client.do_send(LinkStatus::Opened);

    loop {
        tokio::select! {
            action = outbound.recv() => {
                let Some(action) = action else {
                    debug!("[Connection] Outbound channel closed");
                    write.close().await?;
                    return Ok(());
                };
                let text = serde_json::to_string(&action)?;
                write.send(Message::Text(text.into())).await?;
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(event) = decode(&text) {
                            client.do_send(event);
                        }
                    }
                    Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                        Ok(text) => {
                            if let Some(event) = decode(text) {
                                client.do_send(event);
                            }
                        }
                        Err(_) => warn!("[Connection] Dropping non-UTF-8 binary frame"),
                    },
                    Some(Ok(Message::Close(frame))) => {
                        debug!("[Connection] Server closed: {:?}", frame);
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                }
            }
        }
    }
}
