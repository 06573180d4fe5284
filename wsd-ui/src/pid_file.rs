//! Identification of the running instance through a file that holds its process id.

use crate::ui_error::UiError;
use core::time::Duration;
use std::{fs, io, path::Path, thread};

const STOP_ATTEMPTS: u8 = 10;
const STOP_INTERVAL: Duration = Duration::from_secs(1);

/// `kill(pid, 0)`. A process owned by another user is also considered alive.
pub(crate) fn is_alive(pid: i32) -> bool {
  // SAFETY: signal 0 only performs permission and existence checks
  if unsafe { libc::kill(pid, 0) } == 0 {
    return true;
  }
  io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

/// Process id stored in `path`, if the file exists.
pub(crate) fn read(path: &Path) -> Result<Option<i32>, UiError> {
  let content = match fs::read_to_string(path) {
    Ok(elem) => elem,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(err) => return Err(err.into()),
  };
  match content.trim().parse::<i32>() {
    Ok(pid) if pid > 0 => Ok(Some(pid)),
    _ => Err(UiError::InvalidPidFile),
  }
}

/// Removes `path`, a missing file is not an error.
pub(crate) fn remove(path: &Path) -> Result<(), UiError> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(err) => Err(err.into()),
  }
}

/// Sends `SIGTERM` to the process named by `path` and waits for it to exit.
pub(crate) fn stop(path: &Path) -> Result<(), UiError> {
  let Some(pid) = read(path)? else {
    return Err(UiError::NotRunning);
  };
  if !is_alive(pid) {
    return remove(path);
  }
  // SAFETY: `pid` is positive so the signal targets a single process
  if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
    return Err(io::Error::last_os_error().into());
  }
  for _ in 0..STOP_ATTEMPTS {
    thread::sleep(STOP_INTERVAL);
    if !is_alive(pid) {
      return remove(path);
    }
  }
  Err(UiError::DidNotStop { pid })
}

/// Records the current process.
pub(crate) fn write(path: &Path) -> Result<(), UiError> {
  fs::write(path, std::process::id().to_string())?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use crate::{pid_file, ui_error::UiError};
  use std::{env, fs, path::PathBuf};

  fn path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("wsd-{}-{name}.pid", std::process::id()))
  }

  #[test]
  fn current_process_is_alive() {
    let path = path("current");
    pid_file::write(&path).unwrap();
    let pid = pid_file::read(&path).unwrap().unwrap();
    assert!(pid_file::is_alive(pid));
    pid_file::remove(&path).unwrap();
    assert_eq!(pid_file::read(&path).unwrap(), None);
  }

  #[test]
  fn invalid_content() {
    let path = path("invalid");
    fs::write(&path, "-1").unwrap();
    assert!(matches!(pid_file::read(&path), Err(UiError::InvalidPidFile)));
    fs::write(&path, "abc").unwrap();
    assert!(matches!(pid_file::read(&path), Err(UiError::InvalidPidFile)));
    pid_file::remove(&path).unwrap();
  }

  #[test]
  fn stop_without_pid_file() {
    assert!(matches!(pid_file::stop(&path("missing")), Err(UiError::NotRunning)));
  }
}
