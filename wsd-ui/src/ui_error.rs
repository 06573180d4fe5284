use core::fmt::{Debug, Display, Formatter};

/// Failures of the process level commands.
#[derive(Debug)]
pub(crate) enum UiError {
  /// The process named by the pid file is alive.
  AlreadyRunning { pid: i32 },
  /// The process ignored `SIGTERM` for too long.
  DidNotStop { pid: i32 },
  /// The pid file does not contain a positive integer.
  InvalidPidFile,
  IoError(std::io::Error),
  /// There is no pid file.
  NotRunning,
  WsdError(wsd::Error),
}

impl Display for UiError {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for UiError {}

impl From<std::io::Error> for UiError {
  #[inline]
  #[track_caller]
  fn from(from: std::io::Error) -> Self {
    Self::IoError(from)
  }
}

impl From<wsd::Error> for UiError {
  #[inline]
  #[track_caller]
  fn from(from: wsd::Error) -> Self {
    Self::WsdError(from)
  }
}
