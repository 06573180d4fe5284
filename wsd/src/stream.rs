//! Bidirectional byte channels consumed by the event loop.

use std::{
  collections::VecDeque,
  io::{Read, Write},
  net::{Ipv4Addr, Shutdown, SocketAddr, SocketAddrV4, TcpStream},
};

/// A stream of values produced synchronously.
///
/// Implementations are expected to block, the event loop only calls them after the underlying
/// socket was reported as ready.
pub trait Stream {
  /// Address of the remote party.
  fn peer_addr(&self) -> crate::Result<SocketAddr>;

  /// Pulls some bytes from this source into the specified buffer, returning how many bytes
  /// were read.
  fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize>;

  /// Shuts down both halves of the channel.
  fn shutdown(&mut self) -> crate::Result<()>;

  /// Attempts to write ***all*** `bytes`.
  fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()>;
}

impl<T> Stream for &mut T
where
  T: Stream,
{
  #[inline]
  fn peer_addr(&self) -> crate::Result<SocketAddr> {
    (**self).peer_addr()
  }

  #[inline]
  fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
    (**self).read(bytes)
  }

  #[inline]
  fn shutdown(&mut self) -> crate::Result<()> {
    (**self).shutdown()
  }

  #[inline]
  fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
    (**self).write_all(bytes)
  }
}

impl Stream for TcpStream {
  #[inline]
  fn peer_addr(&self) -> crate::Result<SocketAddr> {
    Ok(TcpStream::peer_addr(self)?)
  }

  #[inline]
  fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
    Ok(<Self as Read>::read(self, bytes)?)
  }

  #[inline]
  fn shutdown(&mut self) -> crate::Result<()> {
    TcpStream::shutdown(self, Shutdown::Both)?;
    Ok(())
  }

  #[inline]
  fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
    <Self as Write>::write_all(self, bytes)?;
    Ok(())
  }
}

/// In-memory stream.
///
/// Every call to `read` returns at most the remaining part of the current segment, which allows
/// the reproduction of transports that split data at arbitrary points. Written data is stored
/// separately and never read back.
#[derive(Debug)]
pub struct BytesStream {
  is_shutdown: bool,
  peer_addr: SocketAddr,
  segments: VecDeque<Vec<u8>>,
  written: Vec<u8>,
}

impl BytesStream {
  /// Instance with a single segment.
  #[inline]
  pub fn new(bytes: &[u8]) -> Self {
    let mut this = Self::default();
    this.push_segment(bytes);
    this
  }

  /// If [`Stream::shutdown`] was called.
  #[inline]
  pub fn is_shutdown(&self) -> bool {
    self.is_shutdown
  }

  /// Enqueues data that will be returned by subsequent reads.
  #[inline]
  pub fn push_segment(&mut self, bytes: &[u8]) {
    self.segments.push_back(bytes.into());
  }

  /// Changes the reported remote address.
  #[inline]
  pub fn set_peer_addr(&mut self, peer_addr: SocketAddr) {
    self.peer_addr = peer_addr;
  }

  /// Everything written so far.
  #[inline]
  pub fn written(&self) -> &[u8] {
    &self.written
  }
}

impl Default for BytesStream {
  #[inline]
  fn default() -> Self {
    Self {
      is_shutdown: false,
      peer_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 9000)),
      segments: VecDeque::new(),
      written: Vec::new(),
    }
  }
}

impl Stream for BytesStream {
  #[inline]
  fn peer_addr(&self) -> crate::Result<SocketAddr> {
    Ok(self.peer_addr)
  }

  #[inline]
  fn read(&mut self, bytes: &mut [u8]) -> crate::Result<usize> {
    let Some(segment) = self.segments.front_mut() else {
      return Ok(0);
    };
    let len = segment.len().min(bytes.len());
    let data = segment.get(..len).unwrap_or_default();
    bytes.get_mut(..len).unwrap_or_default().copy_from_slice(data);
    let _ = segment.drain(..len);
    if segment.is_empty() {
      let _ = self.segments.pop_front();
    }
    Ok(len)
  }

  #[inline]
  fn shutdown(&mut self) -> crate::Result<()> {
    self.is_shutdown = true;
    Ok(())
  }

  #[inline]
  fn write_all(&mut self, bytes: &[u8]) -> crate::Result<()> {
    self.written.extend_from_slice(bytes);
    Ok(())
  }
}

/// Reads up to `chunk_len` bytes. A single byte is followed by another read because some
/// transports, TLS in particular, can deliver the first byte of a message in its own segment.
///
/// A closed stream is reported as [`crate::Error::UnexpectedStreamReadEOF`].
pub(crate) fn read_chunk<S>(stream: &mut S, chunk_len: usize) -> crate::Result<Vec<u8>>
where
  S: Stream,
{
  let mut buffer = vec![0; chunk_len];
  let mut read = stream.read(&mut buffer)?;
  if read == 0 {
    return Err(crate::Error::UnexpectedStreamReadEOF);
  }
  if read == 1 {
    buffer.resize(chunk_len.wrapping_add(1), 0);
    let local_read = stream.read(buffer.get_mut(1..).unwrap_or_default())?;
    read = read.wrapping_add(local_read);
  }
  buffer.truncate(read);
  Ok(buffer)
}

#[cfg(test)]
mod tests {
  use crate::{
    stream::{read_chunk, BytesStream},
    Error,
  };

  #[test]
  fn single_byte_segment_is_concatenated() {
    let mut stream = BytesStream::new(&[1]);
    stream.push_segment(&[2, 3, 4]);
    stream.push_segment(&[5]);
    assert_eq!(read_chunk(&mut stream, 8192).unwrap(), [1, 2, 3, 4]);
    assert_eq!(read_chunk(&mut stream, 8192).unwrap(), [5]);
  }

  #[test]
  fn chunks_are_bounded() {
    let mut stream = BytesStream::new(&[0; 10]);
    assert_eq!(read_chunk(&mut stream, 4).unwrap().len(), 4);
    assert_eq!(read_chunk(&mut stream, 8).unwrap().len(), 6);
  }

  #[test]
  fn closed_stream() {
    let mut stream = BytesStream::default();
    assert!(matches!(read_chunk(&mut stream, 8192), Err(Error::UnexpectedStreamReadEOF)));
  }
}
