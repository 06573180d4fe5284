
use crate::{
  stream::{read_chunk, Stream},
  web_socket::{PeerInfo, WebSocketError},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use core::iter;
use sha1::{Digest, Sha1};

/// Reads the upgrade request of a freshly accepted `stream` and, if it carries a
/// `Sec-WebSocket-Key`, writes back the switching-protocols response.
///
/// Everything is expected to arrive in a single read of at most `read_chunk_len` bytes. Parsing
/// is lenient: the request line only provides the method, lines without a colon are skipped and
/// the final empty line is not required. The absence of a non-empty key is the only rejection.
#[inline]
pub fn negotiate<S>(stream: &mut S, read_chunk_len: usize) -> crate::Result<PeerInfo>
where
  S: Stream,
{
  let buffer = read_chunk(stream, read_chunk_len)?;
  let mut lines = crlf_lines(&buffer);
  let request_line = lines.next().unwrap_or_default();
  let method = request_line.split(|byte| *byte == b' ').next().unwrap_or_default();
  let mut connection = None;
  let mut cookie = None;
  let mut sec_web_socket_key = None;
  let mut upgrade = None;
  for line in lines {
    let Some(idx) = line.iter().position(|byte| *byte == b':') else {
      continue;
    };
    let name = line.get(..idx).unwrap_or_default().trim_ascii();
    let value = line.get(idx.wrapping_add(1)..).unwrap_or_default().trim_ascii();
    let opt = if name.eq_ignore_ascii_case(b"connection") {
      &mut connection
    } else if name.eq_ignore_ascii_case(b"cookie") {
      &mut cookie
    } else if name.eq_ignore_ascii_case(b"sec-websocket-key") {
      &mut sec_web_socket_key
    } else if name.eq_ignore_ascii_case(b"upgrade") {
      &mut upgrade
    } else {
      continue;
    };
    *opt = Some(String::from_utf8_lossy(value).into_owned());
  }
  let Some(sec_web_socket_key) = sec_web_socket_key.filter(|el| !el.is_empty()) else {
    return Err(WebSocketError::MissingSecWebSocketKey.into());
  };
  let peer_info = PeerInfo {
    addr: stream.peer_addr()?,
    connection,
    cookie,
    method: String::from_utf8_lossy(method).into_owned(),
    sec_web_socket_key,
    upgrade,
  };
  stream.write_all(build_res(&derived_key(peer_info.sec_web_socket_key.as_bytes())).as_bytes())?;
  _debug!(peer = %peer_info.addr, method = %peer_info.method, "Handshake completed");
  Ok(peer_info)
}

/// Value of the `Sec-WebSocket-Accept` header that corresponds to the given `Sec-WebSocket-Key`.
#[inline]
pub fn derived_key(key: &[u8]) -> String {
  let mut sha1 = Sha1::new();
  sha1.update(key);
  sha1.update(b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11");
  STANDARD.encode(sha1.finalize())
}

/// Server response
fn build_res(accept: &str) -> String {
  let mut rslt = String::with_capacity(128);
  rslt.push_str("HTTP/1.1 101 Web Socket Protocol Handshake\r\n");
  rslt.push_str("Upgrade: websocket\r\n");
  rslt.push_str("Connection: Upgrade\r\n");
  rslt.push_str("Sec-WebSocket-Accept: ");
  rslt.push_str(accept);
  rslt.push_str("\r\n\r\n");
  rslt
}

// Lines separated by `\r\n`. The last line does not need a terminator.
fn crlf_lines(mut bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
  iter::from_fn(move || {
    if bytes.is_empty() {
      return None;
    }
    let (line, rest) = match bytes.windows(2).position(|el| el == b"\r\n") {
      Some(idx) => (bytes.get(..idx)?, bytes.get(idx.wrapping_add(2)..)?),
      None => (bytes, &[][..]),
    };
    bytes = rest;
    Some(line)
  })
}
