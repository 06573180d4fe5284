use crate::web_socket::OpCode;
use core::str;

/// Unit of generic data used for communication.
///
/// Decoded frames are always final and unmasked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
  op_code: OpCode,
  payload: Vec<u8>,
}

impl Frame {
  /// New instance
  #[inline]
  pub fn new(op_code: OpCode, payload: Vec<u8>) -> Self {
    Self { op_code, payload }
  }

  /// See [`OpCode`].
  #[inline]
  pub fn op_code(&self) -> OpCode {
    self.op_code
  }

  /// Frame's content.
  #[inline]
  pub fn payload(&self) -> &[u8] {
    &self.payload
  }

  /// Owned version of [`Self::payload`].
  #[inline]
  pub fn into_payload(self) -> Vec<u8> {
    self.payload
  }

  /// If the frame is of type [`OpCode::Text`] and its content is valid UTF-8, returns its payload
  /// interpreted as a string.
  #[inline]
  pub fn text_payload(&self) -> Option<&str> {
    if self.op_code != OpCode::Text {
      return None;
    }
    str::from_utf8(&self.payload).ok()
  }
}

#[cfg(test)]
mod tests {
  use crate::web_socket::{Frame, OpCode};

  #[test]
  fn text_payload_requires_valid_text_frames() {
    assert_eq!(Frame::new(OpCode::Text, b"ping".to_vec()).text_payload(), Some("ping"));
    assert_eq!(Frame::new(OpCode::Text, vec![0xFF]).text_payload(), None);
    assert_eq!(Frame::new(OpCode::Binary, b"ping".to_vec()).text_payload(), None);
  }

  #[test]
  fn into_payload_keeps_the_content() {
    let frame = Frame::new(OpCode::Pong, vec![1, 2, 3]);
    assert_eq!(frame.payload(), [1, 2, 3]);
    assert_eq!(frame.into_payload(), [1, 2, 3]);
  }
}
