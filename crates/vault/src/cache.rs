//! Single-slot memoization.
//!
//! Each cache holds at most one key/value pair. A miss fully evicts the old
//! entry before the new one is stored, so the memo only ever helps when the
//! same call repeats consecutively with the same key. This is the intended
//! policy, not a degenerate LRU: the vault pins exactly this behavior in its
//! tests.

/// A memo holding at most one key/value pair.
#[derive(Debug, Default)]
pub struct SingleSlot {
    slot: Option<(String, String)>,
}

impl SingleSlot {
    /// Look up `key`; only the currently held key can hit.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.slot
            .as_ref()
            .filter(|(held, _)| held == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the entire cache with a single new entry. The old entry is
    /// dropped before the insert, so a lookup for a new key never transiently
    /// sees stale contents.
    pub fn put(&mut self, key: &str, value: &str) {
        self.slot = None;
        self.slot = Some((key.to_owned(), value.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_misses() {
        let cache = SingleSlot::default();
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn hit_only_on_the_held_key() {
        let mut cache = SingleSlot::default();
        cache.put("a", "1");
        assert_eq!(cache.get("a"), Some("1"));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn put_replaces_wholesale() {
        let mut cache = SingleSlot::default();
        cache.put("a", "1");
        cache.put("b", "2");
        assert_eq!(cache.get("a"), None, "old entry must be gone");
        assert_eq!(cache.get("b"), Some("2"));
    }

    #[test]
    fn reinserting_the_same_key_updates_the_value() {
        let mut cache = SingleSlot::default();
        cache.put("a", "1");
        cache.put("a", "2");
        assert_eq!(cache.get("a"), Some("2"));
    }
}
