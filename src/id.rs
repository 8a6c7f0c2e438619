//! List item identifiers
//!
//! Ids are decimal strings of the creation time in milliseconds since the
//! Unix epoch. The generator never hands out the same value twice: when the
//! clock has not moved past the last issued id, it issues `last + 1`.
//! Ids already stored are fed back through [`IdGenerator::observe`] so a
//! restarted process does not re-issue them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never issue `id` or anything below it
    pub fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::AcqRel);
    }

    /// Issue the next identifier
    pub fn next_id(&self) -> String {
        self.next_from(now_millis()).to_string()
    }

    fn next_from(&self, now: u64) -> u64 {
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > current { now } else { current + 1 };
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_timestamp_strings() {
        let ids = IdGenerator::new();
        let before = now_millis();
        let id: u64 = ids.next_id().parse().unwrap();
        assert!(id >= before);
    }

    #[test]
    fn test_same_millisecond_does_not_repeat() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_from(1_000), 1_000);
        assert_eq!(ids.next_from(1_000), 1_001);
        assert_eq!(ids.next_from(999), 1_002);
        assert_eq!(ids.next_from(5_000), 5_000);
    }

    #[test]
    fn test_observed_ids_are_not_reissued() {
        let ids = IdGenerator::new();
        ids.observe(9_000);
        assert_eq!(ids.next_from(1_000), 9_001);
        ids.observe(10);
        assert_eq!(ids.next_from(1_000), 9_002);
    }

    #[test]
    fn test_rapid_generation_is_unique() {
        let ids = IdGenerator::new();
        let issued: HashSet<String> = (0..500).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 500);
    }
}
