use crate::server::ConnectionId;

/// Server Error
#[derive(Debug)]
pub enum ServerError {
  /// There is no live connection with the given identifier.
  UnknownConnection {
    /// Provided identifier
    id: ConnectionId,
  },
}
