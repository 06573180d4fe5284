use std::net::{IpAddr, SocketAddr};

/// Snapshot of the upgrade request captured during the handshake.
///
/// Only the `Connection`, `Upgrade`, `Cookie` and `Sec-WebSocket-Key` headers are retained.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PeerInfo {
  /// Remote address.
  pub addr: SocketAddr,
  /// `Connection` header.
  pub connection: Option<String>,
  /// `Cookie` header.
  pub cookie: Option<String>,
  /// First token of the request line.
  pub method: String,
  /// `Sec-WebSocket-Key` header. Never empty.
  pub sec_web_socket_key: String,
  /// `Upgrade` header.
  pub upgrade: Option<String>,
}

impl PeerInfo {
  /// Remote IP.
  #[inline]
  pub fn ip(&self) -> IpAddr {
    self.addr.ip()
  }

  /// Remote port.
  #[inline]
  pub fn port(&self) -> u16 {
    self.addr.port()
  }
}
