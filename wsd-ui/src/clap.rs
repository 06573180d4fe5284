use crate::{pid_file, server, ui_error::UiError};
use clap::Parser;
use std::path::PathBuf;

pub(crate) fn init() -> Result<(), UiError> {
  let args = Cli::parse();
  match args.commands {
    Commands::Restart(elem) => {
      if pid_file::read(&elem.pid)?.is_some() {
        pid_file::stop(&elem.pid)?;
      }
      server::start(&elem)?;
    }
    Commands::Start(elem) => {
      server::start(&elem)?;
    }
    Commands::Stop(elem) => {
      pid_file::stop(&elem.pid)?;
    }
  }
  Ok(())
}

/// Single-threaded WebSocket daemon
#[derive(Debug, clap::Parser)]
#[command(author, long_about = None, name = "wsd", version)]
struct Cli {
  #[command(subcommand)]
  commands: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
  /// Stops the running instance, if any, and then starts a new one
  Restart(Start),
  /// Starts a server in the foreground
  Start(Start),
  /// Stops the running instance
  Stop(Stop),
}

/// Server parameters
#[derive(Debug, clap::Args)]
pub(crate) struct Start {
  /// PEM certificate chain. Enables TLS
  #[arg(long, requires = "key", value_name = "PEM")]
  pub(crate) cert: Option<PathBuf>,
  /// Echoes received text and binary frames instead of only greeting new connections
  #[arg(long)]
  pub(crate) echo: bool,
  /// PEM private key of `--cert`
  #[arg(long, requires = "cert", value_name = "PEM")]
  pub(crate) key: Option<PathBuf>,
  /// Seconds of inactivity before a connection is pinged
  #[arg(default_value_t = 300, long, value_name = "SECS")]
  pub(crate) keepalive: u64,
  /// File that stores the identifier of the running process
  #[arg(default_value = "wsd.pid", long, value_name = "PATH")]
  pub(crate) pid: PathBuf,
  /// Maximum number of seconds of each readiness wait
  #[arg(default_value_t = 20, long, value_name = "SECS")]
  pub(crate) poll_timeout: u64,
  /// Listening address, for example, `0.0.0.0:8000` or `tcp://0.0.0.0:8000`
  #[arg(long, value_name = "ADDR")]
  pub(crate) socket: String,
}

/// Stop parameters
#[derive(Debug, clap::Args)]
pub(crate) struct Stop {
  /// File that stores the identifier of the running process
  #[arg(default_value = "wsd.pid", long, value_name = "PATH")]
  pub(crate) pid: PathBuf,
}

#[cfg(test)]
mod tests {
  use crate::clap::{Cli, Commands};
  use clap::{CommandFactory, Parser};

  #[test]
  fn cli_is_consistent() {
    Cli::command().debug_assert();
  }

  #[test]
  fn cert_requires_key() {
    assert!(Cli::try_parse_from(["wsd", "start", "--socket", "127.0.0.1:0", "--cert", "a.pem"]).is_err());
  }

  #[test]
  fn start_defaults() {
    let cli = Cli::try_parse_from(["wsd", "start", "--socket", "tcp://127.0.0.1:8000"]).unwrap();
    let Commands::Start(start) = cli.commands else {
      panic!("expected the start command");
    };
    assert!(!start.echo);
    assert_eq!(start.keepalive, 300);
    assert_eq!(start.pid.to_str(), Some("wsd.pid"));
    assert_eq!(start.poll_timeout, 20);
    assert_eq!(start.socket, "tcp://127.0.0.1:8000");
  }
}
