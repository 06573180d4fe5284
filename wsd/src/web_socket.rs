//! A computer communications protocol, providing full-duplex communication channels over a single
//! TCP connection.
//!
//! Only the subset needed by a single-frame message model is supported: no fragmentation, no
//! extensions and no subprotocol negotiation.

mod codec;
mod frame;
pub(crate) mod handshake;
mod misc;
mod op_code;
mod peer_info;
pub(crate) mod read_frame_info;
mod unmask;
mod web_socket_error;

pub use codec::{decode, encode};
pub use frame::Frame;
pub use handshake::{derived_key, negotiate};
pub use op_code::OpCode;
pub use peer_info::PeerInfo;
pub use read_frame_info::ReadFrameInfo;
pub use unmask::unmask;
pub use web_socket_error::WebSocketError;

const FIN_MASK: u8 = 0b1000_0000;
const MASK_MASK: u8 = 0b1000_0000;
const MAX_HEADER_LEN: usize = 14;
const OP_CODE_MASK: u8 = 0b0000_1111;
const PAYLOAD_MASK: u8 = 0b0111_1111;

/// Number of bytes pulled from a stream in a single read.
pub const DFLT_READ_CHUNK_LEN: usize = 8192;
/// Status code sent back when a peer closes the connection.
pub const NORMAL_CLOSURE: u16 = 1000;
