use crate::{
  acceptor::Acceptor,
  server::{ConnectionId, ConnectionTable, EventSink, KeepaliveMonitor, LoopConfig},
  stream::{read_chunk, Stream},
  web_socket::{decode, negotiate, OpCode, PeerInfo, NORMAL_CLOSURE},
};
use mio::{unix::SourceFd, Events, Interest, Poll, Token};
use std::{
  io::ErrorKind,
  net::{SocketAddr, TcpListener, TcpStream},
  os::fd::AsRawFd,
  time::Instant,
};

const EVENTS_CAPACITY: usize = 1024;
const LISTENER: Token = Token(0);

/// Multiplexes a listening socket and every upgraded connection on the calling thread.
///
/// Each readable connection is served with one bounded read that is expected to contain exactly
/// one frame. Close frames are answered with [`NORMAL_CLOSURE`] and retire the connection, so do
/// read errors, end of stream and malformed frames.
pub struct EventLoop<A, E>
where
  A: Acceptor,
{
  acceptor: A,
  config: LoopConfig,
  events: Events,
  keepalive: KeepaliveMonitor,
  listener: TcpListener,
  poll: Poll,
  sink: E,
  table: ConnectionTable<A::Stream>,
}

impl<A, E> EventLoop<A, E>
where
  A: Acceptor,
  E: EventSink,
{
  /// Registers `listener`, which must already be bound and listening.
  #[inline]
  pub fn new(
    acceptor: A,
    config: LoopConfig,
    listener: TcpListener,
    sink: E,
  ) -> crate::Result<Self> {
    listener.set_nonblocking(true)?;
    let poll = Poll::new()?;
    poll.registry().register(&mut SourceFd(&listener.as_raw_fd()), LISTENER, Interest::READABLE)?;
    Ok(Self {
      acceptor,
      config,
      events: Events::with_capacity(EVENTS_CAPACITY),
      keepalive: KeepaliveMonitor::new(config.keepalive_interval, Instant::now()),
      listener,
      poll,
      sink,
      table: ConnectionTable::new(),
    })
  }

  /// Live connections.
  #[inline]
  pub fn connections(&self) -> &ConnectionTable<A::Stream> {
    &self.table
  }

  /// Address the listener is bound to.
  #[inline]
  pub fn local_addr(&self) -> crate::Result<SocketAddr> {
    Ok(self.listener.local_addr()?)
  }

  /// Runs until the readiness mechanism fails. The listener and every remaining connection are
  /// closed before the error is returned.
  #[inline]
  pub fn run(mut self) -> crate::Error {
    _info!("Listening on {:?}", self.listener.local_addr());
    loop {
      if let Err(err) = self.turn() {
        _info!("Event loop stopped: {err}");
        return err;
      }
    }
  }

  /// A single iteration: waits for readiness, ticks the keepalive monitor, accepts pending
  /// connections and then serves every ready connection.
  ///
  /// Only errors of the readiness mechanism itself are returned.
  #[inline]
  pub fn turn(&mut self) -> crate::Result<()> {
    if let Err(err) = self.poll.poll(&mut self.events, Some(self.config.poll_timeout)) {
      if err.kind() != ErrorKind::Interrupted {
        return Err(err.into());
      }
      self.events.clear();
    }
    let _sent = self.keepalive.tick(Instant::now(), &mut self.table);
    let mut has_pending_accepts = false;
    let mut ready = Vec::new();
    for event in self.events.iter() {
      if event.token() == LISTENER {
        has_pending_accepts = true;
      } else {
        ready.push(ConnectionId::from_token(event.token()));
      }
    }
    if has_pending_accepts {
      self.accept_pending();
    }
    for id in ready {
      self.serve(id);
    }
    Ok(())
  }

  // Readiness is edge-triggered, every pending connection must be taken.
  fn accept_pending(&mut self) {
    loop {
      match self.listener.accept() {
        Ok((stream, _addr)) => {
          _debug!("Accepted connection from {_addr}");
          self.open(stream);
        }
        Err(err) if err.kind() == ErrorKind::WouldBlock => break,
        Err(err) if err.kind() == ErrorKind::Interrupted => continue,
        Err(_err) => {
          _debug!("Unable to accept connection: {_err}");
          break;
        }
      }
    }
  }

  fn open(&mut self, tcp_stream: TcpStream) {
    let (stream, peer_info) = match self.upgrade(tcp_stream) {
      Ok(elem) => elem,
      Err(_err) => {
        _debug!("Handshake failure: {_err}");
        return;
      }
    };
    let fd = stream.as_raw_fd();
    let id = self.table.insert(stream, peer_info.clone(), Instant::now());
    let rslt = self.poll.registry().register(&mut SourceFd(&fd), id.token(), Interest::READABLE);
    if let Err(_err) = rslt {
      _debug!(%id, "Unable to register connection: {_err}");
      if let Some(connection) = self.table.remove(id) {
        let _stream = connection.close();
      }
      return;
    }
    _debug!(%id, "Connection opened");
    self.sink.on_open(id, &peer_info, &mut self.table);
  }

  fn retire(&mut self, id: ConnectionId) {
    let Some(connection) = self.table.remove(id) else {
      return;
    };
    let fd = connection.stream().as_raw_fd();
    if let Err(_err) = self.poll.registry().deregister(&mut SourceFd(&fd)) {
      _debug!(%id, "Unable to deregister connection: {_err}");
    }
    let _stream = connection.close();
    _debug!(%id, "Connection closed");
    self.sink.on_close(id, &mut self.table);
  }

  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
  fn serve(&mut self, id: ConnectionId) {
    let read_chunk_len = self.config.read_chunk_len;
    let Some(connection) = self.table.get_mut(id) else {
      return;
    };
    let rslt = read_chunk(connection.stream_mut(), read_chunk_len).and_then(|bytes| decode(&bytes));
    match rslt {
      Ok(frame) if frame.op_code().is_close() => {
        if let Err(_err) = self.table.send(id, OpCode::Close, &NORMAL_CLOSURE.to_be_bytes()) {
          _debug!(%id, "Unable to reply close frame: {_err}");
        }
        self.retire(id);
      }
      Ok(frame) => {
        connection.touch(Instant::now());
        _trace!(op_code = ?frame.op_code(), "Received frame");
        self.sink.on_message(id, frame, &mut self.table);
      }
      Err(_err) => {
        _debug!(%id, "Dropping connection: {_err}");
        self.retire(id);
      }
    }
  }

  fn upgrade(&self, tcp_stream: TcpStream) -> crate::Result<(A::Stream, PeerInfo)> {
    tcp_stream.set_nonblocking(false)?;
    tcp_stream.set_read_timeout(self.config.io_timeout)?;
    tcp_stream.set_write_timeout(self.config.io_timeout)?;
    let mut stream = self.acceptor.accept(tcp_stream)?;
    match negotiate(&mut stream, self.config.read_chunk_len) {
      Ok(peer_info) => Ok((stream, peer_info)),
      Err(err) => {
        let _rslt = stream.shutdown();
        Err(err)
      }
    }
  }
}
