use crate::web_socket::{misc::has_masked_frame, OpCode, WebSocketError, PAYLOAD_MASK};

/// Parameters of an WebSocket frame.
#[derive(Debug, Eq, PartialEq)]
pub struct ReadFrameInfo {
  /// Number of bytes before the payload, mask key included.
  pub header_len: u8,
  /// Present when the peer masked the payload.
  pub mask: Option<[u8; 4]>,
  /// See [`OpCode`].
  pub op_code: OpCode,
  /// Declared payload length.
  pub payload_len: usize,
}

impl ReadFrameInfo {
  /// Creates a new instance based on a sequence of bytes.
  ///
  /// Trailing payload bytes are not inspected.
  #[inline]
  pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
    let [a, b, rest @ ..] = bytes else {
      return Err(WebSocketError::InvalidFrameHeaderBounds.into());
    };
    let op_code = OpCode::from(*a);
    let length_code = b & PAYLOAD_MASK;
    let (mut header_len, payload_len, rest): (u8, usize, &[u8]) = match length_code {
      126 => {
        let [c, d, local_rest @ ..] = rest else {
          return Err(incomplete(4, bytes));
        };
        (4u8, u16::from_be_bytes([*c, *d]).into(), local_rest)
      }
      127 => {
        let [c, d, e, f, g, h, i, j, local_rest @ ..] = rest else {
          return Err(incomplete(10, bytes));
        };
        let Ok(payload_len) = usize::try_from(u64::from_be_bytes([*c, *d, *e, *f, *g, *h, *i, *j]))
        else {
          return Err(WebSocketError::VeryLargePayload.into());
        };
        (10, payload_len, local_rest)
      }
      _ => (2, length_code.into(), rest),
    };
    let mut mask = None;
    if has_masked_frame(*b) {
      let [e, f, g, h, ..] = rest else {
        return Err(incomplete(usize::from(header_len).wrapping_add(4), bytes));
      };
      mask = Some([*e, *f, *g, *h]);
      header_len = header_len.wrapping_add(4);
    }
    Ok(Self { header_len, mask, op_code, payload_len })
  }

  /// Header length plus payload length.
  #[inline]
  pub fn frame_len(&self) -> crate::Result<usize> {
    usize::from(self.header_len)
      .checked_add(self.payload_len)
      .ok_or_else(|| WebSocketError::VeryLargePayload.into())
  }
}

fn incomplete(expected: usize, bytes: &[u8]) -> crate::Error {
  WebSocketError::IncompleteFrame { expected, received: bytes.len() }.into()
}

#[cfg(test)]
mod tests {
  use crate::{
    web_socket::{OpCode, ReadFrameInfo, WebSocketError},
    Error,
  };

  #[test]
  fn masked_short_header() {
    let rfi = ReadFrameInfo::from_bytes(&[0x81, 0x84, 1, 2, 3, 4]).unwrap();
    assert_eq!(
      rfi,
      ReadFrameInfo {
        header_len: 6,
        mask: Some([1, 2, 3, 4]),
        op_code: OpCode::Text,
        payload_len: 4
      }
    );
  }

  #[test]
  fn unmasked_extended_headers() {
    let rfi = ReadFrameInfo::from_bytes(&[0x82, 126, 1, 0]).unwrap();
    assert_eq!((rfi.header_len, rfi.payload_len, rfi.mask), (4, 256, None));
    let rfi = ReadFrameInfo::from_bytes(&[0x89, 127, 0, 0, 0, 0, 0, 1, 0, 0]).unwrap();
    assert_eq!((rfi.header_len, rfi.payload_len, rfi.op_code), (10, 65536, OpCode::Ping));
  }

  #[test]
  fn short_buffers() {
    assert!(matches!(
      ReadFrameInfo::from_bytes(&[0x81]),
      Err(Error::WebSocketError(WebSocketError::InvalidFrameHeaderBounds))
    ));
    assert!(matches!(
      ReadFrameInfo::from_bytes(&[0x81, 126, 1]),
      Err(Error::WebSocketError(WebSocketError::IncompleteFrame { expected: 4, received: 3 }))
    ));
    assert!(matches!(
      ReadFrameInfo::from_bytes(&[0x81, 127, 0, 0, 0]),
      Err(Error::WebSocketError(WebSocketError::IncompleteFrame { expected: 10, received: 5 }))
    ));
    assert!(matches!(
      ReadFrameInfo::from_bytes(&[0x81, 0x80, 1, 2]),
      Err(Error::WebSocketError(WebSocketError::IncompleteFrame { expected: 6, received: 4 }))
    ));
  }
}
