//! Decode frame

#![no_main]

use wsd::web_socket::{decode, encode, OpCode};

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
  let Ok(frame) = decode(data) else {
    return;
  };
  if let OpCode::Unknown(_) = frame.op_code() {
    return;
  }
  let Ok(encoded) = encode(frame.payload(), frame.op_code()) else {
    return;
  };
  assert_eq!(decode(&encoded).ok().as_ref(), Some(&frame));
});
