/// Defines how to interpret the payload data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpCode {
  /// UTF-8 text.
  Text,
  /// Opaque bytes.
  Binary,
  /// Connection is closed.
  Close,
  /// Test reachability.
  Ping,
  /// Response of a ping frame.
  Pong,
  /// Any other 4-bit value, including continuations.
  Unknown(u8),
}

impl OpCode {
  /// Control frames carry protocol signals instead of application data.
  #[inline]
  pub fn is_control(self) -> bool {
    matches!(self, OpCode::Close | OpCode::Ping | OpCode::Pong)
  }

  #[inline]
  pub(crate) fn is_close(self) -> bool {
    matches!(self, OpCode::Close)
  }
}

impl From<OpCode> for u8 {
  #[inline]
  fn from(from: OpCode) -> Self {
    match from {
      OpCode::Text => 0b0000_0001,
      OpCode::Binary => 0b0000_0010,
      OpCode::Close => 0b0000_1000,
      OpCode::Ping => 0b0000_1001,
      OpCode::Pong => 0b0000_1010,
      OpCode::Unknown(elem) => elem,
    }
  }
}

/// Only the four lower bits are considered.
impl From<u8> for OpCode {
  #[inline]
  fn from(from: u8) -> Self {
    match from & super::OP_CODE_MASK {
      0b0000_0001 => Self::Text,
      0b0000_0010 => Self::Binary,
      0b0000_1000 => Self::Close,
      0b0000_1001 => Self::Ping,
      0b0000_1010 => Self::Pong,
      other => Self::Unknown(other),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::web_socket::OpCode;

  #[test]
  fn maps_known_and_unknown_values() {
    assert_eq!(OpCode::from(1), OpCode::Text);
    assert_eq!(OpCode::from(2), OpCode::Binary);
    assert_eq!(OpCode::from(8), OpCode::Close);
    assert_eq!(OpCode::from(9), OpCode::Ping);
    assert_eq!(OpCode::from(10), OpCode::Pong);
    assert_eq!(OpCode::from(0), OpCode::Unknown(0));
    assert_eq!(OpCode::from(3), OpCode::Unknown(3));
    assert_eq!(OpCode::from(0b1000_0001), OpCode::Text);
  }

  #[test]
  fn control_frames() {
    assert!(OpCode::Close.is_control());
    assert!(OpCode::Ping.is_control());
    assert!(OpCode::Pong.is_control());
    assert!(!OpCode::Text.is_control());
    assert!(!OpCode::Unknown(11).is_control());
  }
}
