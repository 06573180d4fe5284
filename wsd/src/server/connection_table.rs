use crate::{
  server::{Outbox, ServerError},
  stream::Stream,
  web_socket::{encode, OpCode, PeerInfo},
};
use core::fmt::{Display, Formatter};
use mio::Token;
use std::{collections::BTreeMap, time::Instant};

/// Identifier of an upgraded connection.
///
/// Values start at `1` and are never reused while the event loop is alive.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConnectionId(usize);

impl ConnectionId {
  /// Raw value.
  #[inline]
  pub const fn get(self) -> usize {
    self.0
  }

  pub(crate) fn from_token(token: Token) -> Self {
    Self(token.0)
  }

  pub(crate) fn token(self) -> Token {
    Token(self.0)
  }
}

impl Display for ConnectionId {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// An upgraded client.
#[derive(Debug)]
pub struct Connection<S> {
  id: ConnectionId,
  last_activity: Instant,
  peer_info: PeerInfo,
  stream: S,
}

impl<S> Connection<S> {
  /// See [`ConnectionId`].
  #[inline]
  pub fn id(&self) -> ConnectionId {
    self.id
  }

  /// Instant of the last received frame or of the last keepalive ping.
  #[inline]
  pub fn last_activity(&self) -> Instant {
    self.last_activity
  }

  /// See [`PeerInfo`].
  #[inline]
  pub fn peer_info(&self) -> &PeerInfo {
    &self.peer_info
  }

  /// Underlying transport.
  #[inline]
  pub fn stream(&self) -> &S {
    &self.stream
  }

  pub(crate) fn stream_mut(&mut self) -> &mut S {
    &mut self.stream
  }

  /// Never moves backwards.
  pub(crate) fn touch(&mut self, now: Instant) {
    if now > self.last_activity {
      self.last_activity = now;
    }
  }
}

impl<S> Connection<S>
where
  S: Stream,
{
  /// Shuts the transport down. Consuming `self` guarantees that a connection is closed once.
  pub(crate) fn close(mut self) -> S {
    if let Err(_err) = self.stream.shutdown() {
      _debug!(id = %self.id, "Unable to shutdown stream: {_err}");
    }
    self.stream
  }
}

/// Live connections indexed by [`ConnectionId`].
///
/// Iteration follows the ascending order of identifiers, which is also the order of arrival.
#[derive(Debug)]
pub struct ConnectionTable<S> {
  connections: BTreeMap<ConnectionId, Connection<S>>,
  next_id: usize,
}

impl<S> ConnectionTable<S> {
  /// Empty instance.
  #[inline]
  pub fn new() -> Self {
    Self { connections: BTreeMap::new(), next_id: 1 }
  }

  /// Connection identified by `id`, if still live.
  #[inline]
  pub fn get(&self, id: ConnectionId) -> Option<&Connection<S>> {
    self.connections.get(&id)
  }

  /// Identifiers of every live connection.
  #[inline]
  pub fn ids(&self) -> impl Iterator<Item = ConnectionId> + '_ {
    self.connections.keys().copied()
  }

  /// Stores a freshly upgraded stream under a new identifier.
  #[inline]
  pub fn insert(&mut self, stream: S, peer_info: PeerInfo, now: Instant) -> ConnectionId {
    let id = ConnectionId(self.next_id);
    self.next_id = self.next_id.wrapping_add(1);
    let connection = Connection { id, last_activity: now, peer_info, stream };
    let _prev = self.connections.insert(id, connection);
    id
  }

  /// If there are no live connections.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.connections.is_empty()
  }

  /// Number of live connections.
  #[inline]
  pub fn len(&self) -> usize {
    self.connections.len()
  }

  /// Detaches a connection. The caller becomes responsible for closing it.
  #[inline]
  pub fn remove(&mut self, id: ConnectionId) -> Option<Connection<S>> {
    self.connections.remove(&id)
  }

  pub(crate) fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Connection<S>> {
    self.connections.get_mut(&id)
  }

  pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Connection<S>> {
    self.connections.values_mut()
  }
}

impl<S> ConnectionTable<S>
where
  S: Stream,
{
  /// Encodes `payload` and writes the resulting frame to the connection identified by `id`.
  #[inline]
  pub fn send(&mut self, id: ConnectionId, op_code: OpCode, payload: &[u8]) -> crate::Result<()> {
    let connection = self.get_mut(id).ok_or(ServerError::UnknownConnection { id })?;
    connection.stream.write_all(&encode(payload, op_code)?)
  }
}

impl<S> Default for ConnectionTable<S> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<S> Outbox for ConnectionTable<S>
where
  S: Stream,
{
  #[inline]
  fn connections(&self) -> Vec<ConnectionId> {
    self.ids().collect()
  }

  #[inline]
  fn peer_info(&self, id: ConnectionId) -> Option<&PeerInfo> {
    self.get(id).map(Connection::peer_info)
  }

  #[inline]
  fn send(&mut self, id: ConnectionId, op_code: OpCode, payload: &[u8]) -> crate::Result<()> {
    ConnectionTable::send(self, id, op_code, payload)
  }
}
