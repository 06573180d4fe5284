use crate::{clap::Start, echo_sink::EchoSink, pid_file, ui_error::UiError};
use core::time::Duration;
use std::{
  fs,
  net::{SocketAddr, TcpListener},
};
use wsd::{
  acceptor::{Acceptor, RustlsAcceptor},
  server::{DefaultSink, EventLoop, EventSink, LoopConfig},
};

/// Runs the event loop in the foreground until the readiness mechanism fails.
pub(crate) fn start(args: &Start) -> Result<(), UiError> {
  wsd::misc::tracing_tree_init(Some("info"))?;
  if let Some(pid) = pid_file::read(&args.pid)? {
    if pid_file::is_alive(pid) {
      return Err(UiError::AlreadyRunning { pid });
    }
    pid_file::remove(&args.pid)?;
  }
  let listener = TcpListener::bind(socket_addr(&args.socket)?)?;
  pid_file::write(&args.pid)?;
  let config = LoopConfig::default()
    .keepalive_interval(Duration::from_secs(args.keepalive))
    .poll_timeout(Duration::from_secs(args.poll_timeout));
  let err = match (&args.cert, &args.key) {
    (Some(cert), Some(key)) => {
      let acceptor = RustlsAcceptor::with_cert_chain_and_priv_key(&fs::read(cert)?, &fs::read(key)?)?;
      serve(acceptor, args.echo, config, listener)
    }
    _ => serve((), args.echo, config, listener),
  };
  pid_file::remove(&args.pid)?;
  Err(err.into())
}

fn run<A, E>(acceptor: A, config: LoopConfig, listener: TcpListener, sink: E) -> wsd::Error
where
  A: Acceptor,
  E: EventSink,
{
  match EventLoop::new(acceptor, config, listener, sink) {
    Ok(event_loop) => event_loop.run(),
    Err(err) => err,
  }
}

fn serve<A>(acceptor: A, echo: bool, config: LoopConfig, listener: TcpListener) -> wsd::Error
where
  A: Acceptor,
{
  if echo {
    run(acceptor, config, listener, EchoSink)
  } else {
    run(acceptor, config, listener, DefaultSink)
  }
}

/// Accepts plain addresses as well as addresses prefixed by a scheme like `tcp://`.
fn socket_addr(socket: &str) -> wsd::Result<SocketAddr> {
  let addr = socket.split_once("://").map_or(socket, |(_, rest)| rest);
  Ok(addr.parse()?)
}

#[cfg(test)]
mod tests {
  use crate::server::socket_addr;
  use std::net::SocketAddr;

  #[test]
  fn socket_addresses() {
    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    assert_eq!(socket_addr("0.0.0.0:8000").unwrap(), addr);
    assert_eq!(socket_addr("tcp://0.0.0.0:8000").unwrap(), addr);
    assert!(socket_addr("localhost").is_err());
  }
}
