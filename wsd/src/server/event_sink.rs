use crate::{
  server::ConnectionId,
  web_socket::{Frame, OpCode, PeerInfo},
};

/// Text frame sent by [`EventSink::on_open`] when not overridden.
pub const GREETING: &str = "Hi people!";

/// Write side of the connection table handed to [`EventSink`] hooks.
///
/// Streams are never exposed, a hook can only address connections through their identifiers.
pub trait Outbox {
  /// Identifiers of every live connection, in order of arrival.
  fn connections(&self) -> Vec<ConnectionId>;

  /// Handshake data of a live connection.
  fn peer_info(&self, id: ConnectionId) -> Option<&PeerInfo>;

  /// Sends a single frame to the connection identified by `id`.
  ///
  /// Writes are synchronous, a slow peer delays the whole event loop.
  fn send(&mut self, id: ConnectionId, op_code: OpCode, payload: &[u8]) -> crate::Result<()>;
}

/// Application hooks invoked by the event loop.
///
/// Hooks do not return errors, failures that concern a connection are detected and handled by the
/// loop on the next read.
pub trait EventSink {
  /// A connection was retired. `id` is no longer present in `outbox`.
  #[inline]
  fn on_close(&mut self, id: ConnectionId, outbox: &mut dyn Outbox) {
    let _ = (id, outbox);
  }

  /// A non-close frame was received.
  #[inline]
  fn on_message(&mut self, id: ConnectionId, frame: Frame, outbox: &mut dyn Outbox) {
    let _ = (id, frame, outbox);
  }

  /// A handshake finished successfully. Sends [`GREETING`] by default.
  #[inline]
  fn on_open(&mut self, id: ConnectionId, peer_info: &PeerInfo, outbox: &mut dyn Outbox) {
    let _ = peer_info;
    if let Err(_err) = outbox.send(id, OpCode::Text, GREETING.as_bytes()) {
      _debug!(%id, "Unable to greet: {_err}");
    }
  }
}

impl<T> EventSink for &mut T
where
  T: EventSink,
{
  #[inline]
  fn on_close(&mut self, id: ConnectionId, outbox: &mut dyn Outbox) {
    (**self).on_close(id, outbox);
  }

  #[inline]
  fn on_message(&mut self, id: ConnectionId, frame: Frame, outbox: &mut dyn Outbox) {
    (**self).on_message(id, frame, outbox);
  }

  #[inline]
  fn on_open(&mut self, id: ConnectionId, peer_info: &PeerInfo, outbox: &mut dyn Outbox) {
    (**self).on_open(id, peer_info, outbox);
  }
}

/// Greets new connections and ignores everything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSink;

impl EventSink for DefaultSink {}
