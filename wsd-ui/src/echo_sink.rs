use wsd::{
  server::{ConnectionId, EventSink, Outbox},
  web_socket::{Frame, OpCode},
};

/// Greets new connections and sends text and binary frames back to their author.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct EchoSink;

impl EventSink for EchoSink {
  fn on_message(&mut self, id: ConnectionId, frame: Frame, outbox: &mut dyn Outbox) {
    let op_code = frame.op_code();
    if !matches!(op_code, OpCode::Binary | OpCode::Text) {
      return;
    }
    if let Err(err) = outbox.send(id, op_code, frame.payload()) {
      eprintln!("Unable to echo a frame to connection {id}: {err}");
    }
  }
}
