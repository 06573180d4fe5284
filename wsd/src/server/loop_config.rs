use crate::web_socket::DFLT_READ_CHUNK_LEN;
use core::time::Duration;

/// Parameters of an [`crate::server::EventLoop`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoopConfig {
  pub(crate) io_timeout: Option<Duration>,
  pub(crate) keepalive_interval: Duration,
  pub(crate) poll_timeout: Duration,
  pub(crate) read_chunk_len: usize,
}

impl LoopConfig {
  /// Read and write timeout applied to accepted sockets. `None` lets a stalled peer block the
  /// whole loop. Must not be zero.
  ///
  /// Defaults to 20 seconds.
  #[inline]
  pub const fn io_timeout(mut self, elem: Option<Duration>) -> Self {
    self.io_timeout = elem;
    self
  }

  /// Minimum idle period before a connection receives a ping. Also the minimum period between
  /// two sweeps.
  ///
  /// Defaults to 300 seconds.
  #[inline]
  pub const fn keepalive_interval(mut self, elem: Duration) -> Self {
    self.keepalive_interval = elem;
    self
  }

  /// Upper bound of each readiness wait.
  ///
  /// Defaults to 20 seconds.
  #[inline]
  pub const fn poll_timeout(mut self, elem: Duration) -> Self {
    self.poll_timeout = elem;
    self
  }

  /// Maximum number of bytes pulled from a connection when it becomes readable.
  ///
  /// Defaults to 8192 bytes.
  #[inline]
  pub const fn read_chunk_len(mut self, elem: usize) -> Self {
    self.read_chunk_len = elem;
    self
  }
}

impl Default for LoopConfig {
  #[inline]
  fn default() -> Self {
    Self {
      io_timeout: Some(Duration::from_secs(20)),
      keepalive_interval: Duration::from_secs(300),
      poll_timeout: Duration::from_secs(20),
      read_chunk_len: DFLT_READ_CHUNK_LEN,
    }
  }
}
