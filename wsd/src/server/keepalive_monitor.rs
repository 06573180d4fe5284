use crate::{
  server::ConnectionTable,
  stream::Stream,
  web_socket::{encode, OpCode},
};
use core::time::Duration;
use std::time::Instant;

/// Payload of keepalive pings.
pub const PING_PAYLOAD: &[u8] = b"ping";

/// Pings connections that have been silent for too long.
///
/// Sweeps are rate limited: a sweep only happens once `interval` elapsed since the previous one.
#[derive(Debug)]
pub struct KeepaliveMonitor {
  interval: Duration,
  last_sweep: Instant,
}

impl KeepaliveMonitor {
  /// The first sweep happens `interval` after `now`.
  #[inline]
  pub fn new(interval: Duration, now: Instant) -> Self {
    Self { interval, last_sweep: now }
  }

  /// Instant of the last sweep or of the creation of this instance.
  #[inline]
  pub fn last_sweep(&self) -> Instant {
    self.last_sweep
  }

  /// If a sweep is due, sends a ping to every connection idle for at least one interval and
  /// marks them as active. Returns the number of pings successfully written.
  ///
  /// Write failures are only logged, broken connections are detected by the next read.
  #[inline]
  pub fn tick<S>(&mut self, now: Instant, table: &mut ConnectionTable<S>) -> usize
  where
    S: Stream,
  {
    let Some(deadline) = self.last_sweep.checked_add(self.interval) else {
      return 0;
    };
    if now < deadline {
      return 0;
    }
    self.last_sweep = now;
    let Ok(ping) = encode(PING_PAYLOAD, OpCode::Ping) else {
      return 0;
    };
    let mut sent: usize = 0;
    for connection in table.iter_mut() {
      let is_idle = connection
        .last_activity()
        .checked_add(self.interval)
        .is_some_and(|idle_deadline| idle_deadline <= now);
      if !is_idle {
        continue;
      }
      match connection.stream_mut().write_all(&ping) {
        Ok(()) => sent = sent.wrapping_add(1),
        Err(_err) => {
          _debug!(id = %connection.id(), "Unable to send ping: {_err}");
        }
      }
      connection.touch(now);
    }
    _trace!("Keepalive sweep sent {sent} ping(s)");
    sent
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    server::{ConnectionTable, KeepaliveMonitor},
    stream::BytesStream,
    web_socket::PeerInfo,
  };
  use core::time::Duration;
  use std::{net::SocketAddr, time::Instant};

  const INTERVAL: Duration = Duration::from_secs(300);
  const PING: [u8; 6] = [0x89, 4, b'p', b'i', b'n', b'g'];

  fn peer_info() -> PeerInfo {
    PeerInfo {
      addr: SocketAddr::from(([127, 0, 0, 1], 9000)),
      connection: None,
      cookie: None,
      method: "GET".into(),
      sec_web_socket_key: "dGhlIHNhbXBsZSBub25jZQ==".into(),
      upgrade: None,
    }
  }

  #[test]
  fn sweeps_are_rate_limited() {
    let t0 = Instant::now();
    let mut table = ConnectionTable::new();
    let id = table.insert(BytesStream::default(), peer_info(), t0);
    let mut monitor = KeepaliveMonitor::new(INTERVAL, t0);
    assert_eq!(monitor.tick(t0 + Duration::from_secs(299), &mut table), 0);
    assert_eq!(monitor.last_sweep(), t0);
    assert_eq!(monitor.tick(t0 + INTERVAL, &mut table), 1);
    assert_eq!(monitor.last_sweep(), t0 + INTERVAL);
    assert_eq!(monitor.tick(t0 + INTERVAL + Duration::from_secs(1), &mut table), 0);
    let connection = table.get(id).unwrap();
    assert_eq!(connection.stream().written(), PING);
    assert_eq!(connection.last_activity(), t0 + INTERVAL);
  }

  #[test]
  fn recently_active_connections_are_skipped() {
    let t0 = Instant::now();
    let mut table = ConnectionTable::new();
    let idle = table.insert(BytesStream::default(), peer_info(), t0);
    let active = table.insert(BytesStream::default(), peer_info(), t0 + Duration::from_secs(100));
    let mut monitor = KeepaliveMonitor::new(INTERVAL, t0);
    assert_eq!(monitor.tick(t0 + INTERVAL, &mut table), 1);
    assert_eq!(table.get(idle).unwrap().stream().written(), PING);
    assert!(table.get(active).unwrap().stream().written().is_empty());
    assert_eq!(monitor.tick(t0 + INTERVAL * 2, &mut table), 2);
    assert_eq!(table.get(active).unwrap().stream().written(), PING);
  }

  #[test]
  fn empty_table() {
    let t0 = Instant::now();
    let mut table = ConnectionTable::<BytesStream>::new();
    let mut monitor = KeepaliveMonitor::new(INTERVAL, t0);
    assert_eq!(monitor.tick(t0 + INTERVAL, &mut table), 0);
    assert_eq!(monitor.last_sweep(), t0 + INTERVAL);
  }

  // A connection silent since `t0` is pinged at the first tick where `now >= t0 + interval`,
  // never before.
  #[test_strategy::proptest]
  fn first_ping_after_one_interval(#[strategy(1u64..600)] interval_secs: u64, steps: Vec<u8>) {
    let interval = Duration::from_secs(interval_secs);
    let t0 = Instant::now();
    let mut table = ConnectionTable::new();
    let id = table.insert(BytesStream::default(), peer_info(), t0);
    let mut monitor = KeepaliveMonitor::new(interval, t0);
    let mut now = t0;
    for step in steps {
      now += Duration::from_secs(step.into());
      let _sent = monitor.tick(now, &mut table);
      let is_written = !table.get(id).unwrap().stream().written().is_empty();
      if now < t0 + interval {
        assert!(!is_written);
      } else {
        assert!(is_written);
        break;
      }
    }
  }
}
