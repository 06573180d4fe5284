/// Unmasks a sequence of bytes using the given 4-byte `mask`.
///
/// Masking and unmasking are the same operation, applying it twice restores the original bytes.
#[inline]
pub fn unmask(bytes: &mut [u8], mask: [u8; 4]) {
  let mask_u32 = u32::from_ne_bytes(mask);
  let mut chunks = bytes.chunks_exact_mut(4);
  for chunk in chunks.by_ref() {
    if let [a, b, c, d] = chunk {
      let [e, f, g, h] = (u32::from_ne_bytes([*a, *b, *c, *d]) ^ mask_u32).to_ne_bytes();
      *a = e;
      *b = f;
      *c = g;
      *d = h;
    }
  }
  unmask_u8_slice(chunks.into_remainder(), mask);
}

#[expect(clippy::indexing_slicing, reason = "index will always be in-bounds")]
fn unmask_u8_slice(bytes: &mut [u8], mask: [u8; 4]) {
  for (idx, elem) in bytes.iter_mut().enumerate() {
    *elem ^= mask[idx & 3];
  }
}

#[cfg(test)]
mod proptest {
  #[test_strategy::proptest]
  fn unmask_is_involutive(data: Vec<u8>, mask: [u8; 4]) {
    let mut local = data.clone();
    crate::web_socket::unmask(&mut local, mask);
    crate::web_socket::unmask(&mut local, mask);
    assert_eq!(local, data);
  }
}
