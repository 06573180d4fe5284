#![doc = include_str!("../README.md")]

#[macro_use]
mod macros;

pub mod acceptor;
mod error;
pub mod misc;
pub mod server;
pub mod stream;
pub mod web_socket;

pub use error::Error;

/// Shortcut of [`core::result::Result<T, Error>`].
pub type Result<T> = core::result::Result<T, Error>;
