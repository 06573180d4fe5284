use crate::{server::ServerError, web_socket::WebSocketError};
use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External - Misc
  //
  #[cfg(feature = "rustls")]
  RustlsError(Box<rustls::Error>),
  #[cfg(feature = "_tracing-tree")]
  TryInitError(tracing_subscriber::util::TryInitError),

  // External - Std
  //
  AddrParseError(core::net::AddrParseError),
  IoError(std::io::Error),
  TryFromIntError(core::num::TryFromIntError),

  // Generic
  //
  /// A TLS private key is protected by a passphrase, which is not supported.
  EncryptedPrivateKey,
  /// A PEM file does not contain a private key.
  MissingPrivateKey,
  /// Unexpected end of file when reading from a stream.
  UnexpectedStreamReadEOF,

  // Internal
  //
  ServerError(ServerError),
  WebSocketError(WebSocketError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

#[cfg(feature = "rustls")]
impl From<rustls::Error> for Error {
  #[inline]
  #[track_caller]
  fn from(from: rustls::Error) -> Self {
    Self::RustlsError(from.into())
  }
}

#[cfg(feature = "_tracing-tree")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

impl From<core::net::AddrParseError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: core::net::AddrParseError) -> Self {
    Self::AddrParseError(from)
  }
}

impl From<std::io::Error> for Error {
  #[inline]
  #[track_caller]
  fn from(from: std::io::Error) -> Self {
    Self::IoError(from)
  }
}

impl From<core::num::TryFromIntError> for Error {
  #[inline]
  #[track_caller]
  fn from(from: core::num::TryFromIntError) -> Self {
    Self::TryFromIntError(from)
  }
}

impl From<ServerError> for Error {
  #[inline]
  fn from(from: ServerError) -> Self {
    Self::ServerError(from)
  }
}

impl From<WebSocketError> for Error {
  #[inline]
  fn from(from: WebSocketError) -> Self {
    Self::WebSocketError(from)
  }
}
