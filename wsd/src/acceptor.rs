//! Promotion of freshly accepted TCP connections into the streams used by the event loop.

#[cfg(feature = "rustls")]
mod rustls;

#[cfg(feature = "rustls")]
pub use self::rustls::{RustlsAcceptor, TlsStream};
use crate::stream::Stream;
use std::{net::TcpStream, os::fd::AsRawFd};

/// Turns a blocking TCP connection into the transport stream of a connection.
///
/// `()` is the plain TCP acceptor.
pub trait Acceptor {
  /// Resulting transport.
  type Stream: AsRawFd + Stream;

  /// Wraps `stream`. The returned stream is expected to block.
  fn accept(&self, stream: TcpStream) -> crate::Result<Self::Stream>;
}

impl Acceptor for () {
  type Stream = TcpStream;

  #[inline]
  fn accept(&self, stream: TcpStream) -> crate::Result<Self::Stream> {
    Ok(stream)
  }
}
