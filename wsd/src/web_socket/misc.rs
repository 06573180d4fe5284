use crate::web_socket::{WebSocketError, FIN_MASK, MASK_MASK, MAX_HEADER_LEN};

/// Writes the header of an unmasked and final frame, returning the number of used bytes.
pub(crate) fn fill_header_from_params(
  header: &mut [u8; MAX_HEADER_LEN],
  op_code: u8,
  payload_len: usize,
) -> crate::Result<usize> {
  let first = FIN_MASK | op_code;
  match payload_len {
    0..=125 => {
      let [a, b, ..] = header;
      *a = first;
      *b = u8::try_from(payload_len)?;
      Ok(2)
    }
    126..=65535 => {
      let [len_c, len_d] = u16::try_from(payload_len)?.to_be_bytes();
      let [a, b, c, d, ..] = header;
      *a = first;
      *b = 126;
      *c = len_c;
      *d = len_d;
      Ok(4)
    }
    _ => {
      // The four most significant bytes are always zero.
      let Ok(len) = u32::try_from(payload_len) else {
        return Err(WebSocketError::VeryLargePayload.into());
      };
      let [len_g, len_h, len_i, len_j] = len.to_be_bytes();
      let [a, b, c, d, e, f, g, h, i, j, ..] = header;
      *a = first;
      *b = 127;
      *c = 0;
      *d = 0;
      *e = 0;
      *f = 0;
      *g = len_g;
      *h = len_h;
      *i = len_i;
      *j = len_j;
      Ok(10)
    }
  }
}

pub(crate) const fn has_masked_frame(second_header_byte: u8) -> bool {
  second_header_byte & MASK_MASK != 0
}
