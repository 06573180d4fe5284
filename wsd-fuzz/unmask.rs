//! Unmask

#![no_main]

libfuzzer_sys::fuzz_target!(|data: (&[u8], [u8; 4])| {
  let (bytes, mask) = data;
  let mut unmasked = bytes.to_vec();
  wsd::web_socket::unmask(&mut unmasked, mask);
  wsd::web_socket::unmask(&mut unmasked, mask);
  assert_eq!(unmasked, bytes);
});
