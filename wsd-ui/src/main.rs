//! Process-level interface of the wsd WebSocket daemon.

mod clap;
mod echo_sink;
mod pid_file;
mod server;
mod ui_error;

fn main() -> Result<(), ui_error::UiError> {
  clap::init()
}
