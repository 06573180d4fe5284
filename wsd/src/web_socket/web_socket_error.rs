use crate::web_socket::OpCode;

/// WebSocket Error
#[derive(Debug)]
pub enum WebSocketError {
  /// The buffer ends before the declared length of the frame.
  IncompleteFrame {
    /// Number of bytes the frame header declares.
    expected: usize,
    /// Number of bytes that were actually available.
    received: usize,
  },
  /// There aren't enough bytes to hold the two mandatory header bytes.
  InvalidFrameHeaderBounds,
  /// The upgrade request does not contain a non-empty `Sec-WebSocket-Key` header.
  MissingSecWebSocketKey,
  /// Only text, binary, close, ping and pong frames can be encoded.
  UnsupportedEncodeOpCode {
    /// Provided op code
    op_code: OpCode,
  },
  /// Frame payload exceeds the supported range.
  VeryLargePayload,
}
