//! Readiness based WebSocket server.
//!
//! A single thread owns the listening socket and every upgraded connection. The only point where
//! the thread waits is the readiness poll, whose timeout doubles as the keepalive tick.

mod connection_table;
mod event_loop;
mod event_sink;
mod keepalive_monitor;
mod loop_config;
mod server_error;

pub use connection_table::{Connection, ConnectionId, ConnectionTable};
pub use event_loop::EventLoop;
pub use event_sink::{DefaultSink, EventSink, Outbox, GREETING};
pub use keepalive_monitor::{KeepaliveMonitor, PING_PAYLOAD};
pub use loop_config::LoopConfig;
pub use server_error::ServerError;
