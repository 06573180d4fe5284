use crate::web_socket::{
  misc::fill_header_from_params, unmask, Frame, OpCode, ReadFrameInfo, WebSocketError,
  MAX_HEADER_LEN,
};

/// Decodes the frame located at the beginning of `bytes`.
///
/// A buffer that ends before the declared length is reported as
/// [`WebSocketError::IncompleteFrame`]. Nothing is buffered between calls, bytes that follow the
/// frame are ignored.
#[inline]
pub fn decode(bytes: &[u8]) -> crate::Result<Frame> {
  let rfi = ReadFrameInfo::from_bytes(bytes)?;
  let frame_len = rfi.frame_len()?;
  let Some(payload) = bytes.get(usize::from(rfi.header_len)..frame_len) else {
    let received = bytes.len();
    return Err(WebSocketError::IncompleteFrame { expected: frame_len, received }.into());
  };
  let mut payload = payload.to_vec();
  if let Some(mask) = rfi.mask {
    unmask(&mut payload, mask);
  }
  _trace!("Decoded frame of type {:?} with {} bytes", rfi.op_code, payload.len());
  Ok(Frame::new(rfi.op_code, payload))
}

/// Encodes a final and unmasked frame, i.e., a frame suitable for server to client transfers.
#[inline]
pub fn encode(payload: &[u8], op_code: OpCode) -> crate::Result<Vec<u8>> {
  if let OpCode::Unknown(_) = op_code {
    return Err(WebSocketError::UnsupportedEncodeOpCode { op_code }.into());
  }
  let mut header = [0; MAX_HEADER_LEN];
  let header_len = fill_header_from_params(&mut header, op_code.into(), payload.len())?;
  let mut rslt = Vec::with_capacity(header_len.wrapping_add(payload.len()));
  rslt.extend_from_slice(header.get(..header_len).unwrap_or_default());
  rslt.extend_from_slice(payload);
  Ok(rslt)
}
