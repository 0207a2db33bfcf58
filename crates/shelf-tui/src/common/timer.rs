//! Values that disappear after a fixed duration.

use std::time::{Duration, Instant};

/// A value shown until its deadline passes.
#[derive(Debug, Clone)]
pub struct Expiring<T> {
    pub value: T,
    expires_at: Instant,
}

impl<T> Expiring<T> {
    pub fn new(value: T, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Clears `slot` once its value has expired. Returns true if it was cleared.
pub fn clear_expired<T>(slot: &mut Option<Expiring<T>>, now: Instant) -> bool {
    if slot.as_ref().is_some_and(|v| v.is_expired(now)) {
        *slot = None;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_at_deadline() {
        let now = Instant::now();
        let mut slot = Some(Expiring::new("saved", now, Duration::from_secs(3)));

        assert!(!clear_expired(&mut slot, now + Duration::from_millis(2999)));
        assert!(slot.is_some());
        assert!(clear_expired(&mut slot, now + Duration::from_secs(3)));
        assert!(slot.is_none());
    }
}
