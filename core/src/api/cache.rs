//! TTL slots for read-mostly reference data.
//!
//! Slots never fetch anything themselves; the client checks a slot, goes to
//! the network on a miss, and stores the result. A failed fetch never
//! touches a slot, so stale-but-valid data survives collector hiccups.

use chrono::{DateTime, TimeDelta, Utc};

/// Account snapshots move with every point award.
pub const ACCOUNT_TTL_SECS: i64 = 120;
/// Reference catalogues change rarely.
pub const CATALOGUE_TTL_SECS: i64 = 300;
/// Live event listings are the most volatile reads.
pub const LIVE_TTL_SECS: i64 = 60;

/// One cached value with its fetch time.
#[derive(Debug, Clone)]
pub struct CachedResponse<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CachedResponse<T> {
    pub fn new(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self { value, fetched_at }
    }

    pub fn fresh_at(&self, ttl_secs: i64, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < TimeDelta::seconds(ttl_secs)
    }
}

/// Cache slot for an endpoint with no parameters.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    entry: Option<CachedResponse<T>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self, ttl_secs: i64, now: DateTime<Utc>) -> Option<T> {
        self.entry
            .as_ref()
            .filter(|e| e.fresh_at(ttl_secs, now))
            .map(|e| e.value.clone())
    }

    pub fn put(&mut self, value: T, now: DateTime<Utc>) {
        self.entry = Some(CachedResponse::new(value, now));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// Single-slot cache for a parameterized endpoint, keyed by the last-queried
/// identifier. A hit requires both a matching key and a fresh timestamp;
/// storing under a different key evicts the previous entry outright.
#[derive(Debug, Clone)]
pub struct KeyedSlot<K, T> {
    entry: Option<(K, CachedResponse<T>)>,
}

impl<K, T> Default for KeyedSlot<K, T> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, T: Clone> KeyedSlot<K, T> {
    pub fn get(&self, key: &K, ttl_secs: i64, now: DateTime<Utc>) -> Option<T> {
        self.entry
            .as_ref()
            .filter(|(k, e)| k == key && e.fresh_at(ttl_secs, now))
            .map(|(_, e)| e.value.clone())
    }

    pub fn put(&mut self, key: K, value: T, now: DateTime<Utc>) {
        self.entry = Some((key, CachedResponse::new(value, now)));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn secs(n: i64) -> TimeDelta {
        TimeDelta::seconds(n)
    }

    #[test]
    fn test_slot_hit_within_ttl() {
        let mut slot = Slot::default();
        slot.put("points", t0());
        assert_eq!(slot.get(300, t0() + secs(299)), Some("points"));
    }

    #[test]
    fn test_slot_miss_after_expiry() {
        let mut slot = Slot::default();
        slot.put("points", t0());
        assert_eq!(slot.get(300, t0() + secs(300)), None);
    }

    #[test]
    fn test_slot_clear() {
        let mut slot = Slot::default();
        slot.put(1, t0());
        slot.clear();
        assert_eq!(slot.get(300, t0()), None);
    }

    #[test]
    fn test_keyed_slot_requires_matching_key() {
        let mut slot = KeyedSlot::default();
        slot.put(Some(42_u64), "mine", t0());
        assert_eq!(slot.get(&Some(42), 120, t0() + secs(10)), Some("mine"));
        assert_eq!(slot.get(&Some(77), 120, t0() + secs(10)), None);
        assert_eq!(slot.get(&None, 120, t0() + secs(10)), None);
    }

    #[test]
    fn test_keyed_slot_evicts_on_new_key() {
        let mut slot = KeyedSlot::default();
        slot.put(Some(42_u64), "mine", t0());
        slot.put(Some(77_u64), "theirs", t0() + secs(1));
        assert_eq!(slot.get(&Some(42), 120, t0() + secs(2)), None);
        assert_eq!(slot.get(&Some(77), 120, t0() + secs(2)), Some("theirs"));
    }

    #[test]
    fn test_keyed_slot_expires_like_plain_slot() {
        let mut slot = KeyedSlot::default();
        slot.put(None::<u64>, "own account", t0());
        assert_eq!(slot.get(&None, 120, t0() + secs(119)), Some("own account"));
        assert_eq!(slot.get(&None, 120, t0() + secs(121)), None);
    }
}
