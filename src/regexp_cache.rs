use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

struct CacheEntry {
    regex: Arc<regex::Regex>,
    last_used: u64,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    // monotonic access counter; bumped on every hit and insert
    tick: u64,
}

/// A bounded cache of compiled regexes keyed by pattern string.
///
/// Lookups hand out a clone of the cached `Arc`, so repeated requests for
/// the same pattern share one compiled object. Eviction is strict LRU:
/// when an insert pushes the map over capacity, exactly the entry with the
/// oldest access time goes away. A single mutex covers lookup, insert and
/// evict, so recency bookkeeping cannot be lost between threads.
pub struct RegexCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "regex cache capacity must be non-zero");
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity),
                tick: 0,
            }),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        let mut inner = self.inner.lock().expect("regex cache lock poisoned");
        inner.tick += 1;
        let tick = inner.tick;

        if let Some(entry) = inner.entries.get_mut(pattern) {
            entry.last_used = tick;
            return Ok(entry.regex.clone());
        }

        // Compile outside of the map entry so a failure caches nothing.
        let regex = Arc::new(regex::Regex::new(pattern)?);
        if inner.entries.len() >= self.capacity {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(pattern, _)| pattern.clone());
            if let Some(oldest) = oldest {
                inner.entries.remove(&oldest);
            }
        }
        inner.entries.insert(
            pattern.to_string(),
            CacheEntry {
                regex: regex.clone(),
                last_used: tick,
            },
        );
        Ok(regex)
    }

    #[cfg(test)]
    fn contains(&self, pattern: &str) -> bool {
        self.inner
            .lock()
            .expect("regex cache lock poisoned")
            .entries
            .contains_key(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_regex_shares_identity() {
        let cache = RegexCache::with_capacity(4);
        let first = cache.get_regex(r"\d{3}").unwrap();
        let second = cache.get_regex(r"\d{3}").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn touching_an_entry_protects_it_from_eviction() {
        let cache = RegexCache::with_capacity(2);
        cache.get_regex("a+").unwrap();
        cache.get_regex("b+").unwrap();
        // "a+" becomes the most recently used entry, so inserting a third
        // pattern must push out "b+".
        cache.get_regex("a+").unwrap();
        cache.get_regex("c+").unwrap();
        assert!(cache.contains("a+"));
        assert!(cache.contains("c+"));
        assert!(!cache.contains("b+"));
    }

    #[test]
    fn invalid_pattern_is_reported_and_not_cached() {
        let cache = RegexCache::with_capacity(2);
        assert!(cache.get_regex("(").is_err());
        assert!(!cache.contains("("));
    }
}
