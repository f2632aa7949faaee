//! Connection Pumps
//!
//! The two concurrent activities of a live connection. The outbound pump
//! drains the mailbox into the socket; the inbound pump reads only to notice
//! that the peer has gone away. Both leave the registry through
//! [`Hub::unregister`], never by touching it directly.

use std::fmt::Display;
use std::time::Duration;

use axum::extract::ws::{Message, Utf8Bytes};
use bytes::Bytes;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio::time::{interval_at, timeout, Instant};

use super::endpoint::{EndpointId, Mailbox};
use super::hub::Hub;
use crate::config::WebSocketSettings;

/// Keep-alive and deadline settings shared by both pumps
#[derive(Debug, Clone, Copy)]
pub struct PumpTiming {
    /// Upper bound on a single socket write
    pub write_wait: Duration,
    /// How long the inbound side may stay silent before the peer is considered gone
    pub pong_wait: Duration,
    /// Interval between keep-alive pings; should be shorter than `pong_wait`
    pub ping_interval: Duration,
}

impl Default for PumpTiming {
    fn default() -> Self {
        Self {
            write_wait: Duration::from_secs(10),
            pong_wait: Duration::from_secs(60),
            ping_interval: Duration::from_secs(54),
        }
    }
}

impl From<&WebSocketSettings> for PumpTiming {
    fn from(settings: &WebSocketSettings) -> Self {
        Self {
            write_wait: Duration::from_secs(settings.write_wait_secs),
            pong_wait: Duration::from_secs(settings.pong_wait_secs),
            ping_interval: Duration::from_secs(settings.ping_interval_secs),
        }
    }
}

/// Why the outbound pump stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundExit {
    /// The hub closed the mailbox
    MailboxClosed,
    /// A socket write failed or timed out
    WriteFailed,
}

/// Why the inbound pump stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundExit {
    /// Peer sent a close frame or the stream ended
    PeerClosed,
    /// Reading from the socket failed
    ReadFailed,
    /// Nothing arrived within the idle deadline
    IdleTimeout,
}

/// Convert an opaque payload into a socket frame
///
/// UTF-8 payloads become Text frames sharing the payload buffer; anything
/// else is sent as Binary.
pub fn frame(payload: Bytes) -> Message {
    match Utf8Bytes::try_from(payload.clone()) {
        Ok(text) => Message::Text(text),
        Err(_) => Message::Binary(payload),
    }
}

/// Drain `mailbox` into `sink` in enqueue order until the mailbox closes or a
/// write fails. A failed write unregisters the endpoint.
pub async fn outbound_pump<S>(
    mut mailbox: Mailbox,
    mut sink: S,
    hub: Hub,
    id: EndpointId,
    timing: PumpTiming,
) -> OutboundExit
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let mut keepalive = interval_at(Instant::now() + timing.ping_interval, timing.ping_interval);

    let exit = loop {
        tokio::select! {
            next = mailbox.recv() => match next {
                Some(payload) => {
                    if let Err(e) = write(&mut sink, frame(payload), timing.write_wait).await {
                        tracing::debug!(endpoint_id = %id, error = %e, "Write failed");
                        break OutboundExit::WriteFailed;
                    }
                }
                None => {
                    let _ = write(&mut sink, Message::Close(None), timing.write_wait).await;
                    break OutboundExit::MailboxClosed;
                }
            },
            _ = keepalive.tick() => {
                if let Err(e) = write(&mut sink, Message::Ping(Bytes::new()), timing.write_wait).await {
                    tracing::debug!(endpoint_id = %id, error = %e, "Ping failed");
                    break OutboundExit::WriteFailed;
                }
            }
        }
    };

    if exit == OutboundExit::WriteFailed {
        hub.unregister(id);
    }
    let _ = sink.close().await;

    tracing::debug!(endpoint_id = %id, exit = ?exit, "Outbound pump stopped");
    exit
}

/// Read frames from `stream` until the peer leaves, then unregister.
///
/// Frame contents are ignored; any frame, including pongs, resets the idle
/// deadline.
pub async fn inbound_pump<R, E>(
    mut stream: R,
    hub: Hub,
    id: EndpointId,
    timing: PumpTiming,
) -> InboundExit
where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    let exit = loop {
        match timeout(timing.pong_wait, stream.next()).await {
            Err(_) => break InboundExit::IdleTimeout,
            Ok(None) | Ok(Some(Ok(Message::Close(_)))) => break InboundExit::PeerClosed,
            Ok(Some(Err(e))) => {
                tracing::debug!(endpoint_id = %id, error = %e, "Read failed");
                break InboundExit::ReadFailed;
            }
            Ok(Some(Ok(_))) => continue,
        }
    };

    hub.unregister(id);

    tracing::debug!(endpoint_id = %id, exit = ?exit, "Inbound pump stopped");
    exit
}

async fn write<S>(sink: &mut S, message: Message, wait: Duration) -> Result<(), String>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match timeout(wait, sink.send(message)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("write timed out after {:?}", wait)),
    }
}
