//! Memoized highlight specification parsing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::LineSet;

/// Default number of distinct specifications kept before the cache resets.
pub const DEFAULT_CAPACITY: usize = 256;

/// Caches parsed line sets keyed by the exact specification string.
///
/// Repeated lookups of the same string share one parsed [`LineSet`]. When
/// the cache is full it is cleared wholesale; entries are cheap to rebuild.
///
/// ## Examples
///
/// ```
/// use std::sync::Arc;
/// use code_block::LineSetCache;
///
/// let cache = LineSetCache::new();
/// let first = cache.get_or_parse("1,3..4");
/// let second = cache.get_or_parse("1,3..4");
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Debug)]
pub struct LineSetCache {
    entries: Mutex<HashMap<String, Arc<LineSet>>>,
    capacity: usize,
}

impl LineSetCache {
    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` specifications.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Returns the parsed set for `spec`, parsing it on first sight.
    pub fn get_or_parse(&self, spec: &str) -> Arc<LineSet> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(lines) = entries.get(spec) {
            tracing::trace!(spec = spec, "Line set cache hit");
            return Arc::clone(lines);
        }

        if entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "Line set cache full; clearing");
            entries.clear();
        }

        let lines = Arc::new(LineSet::parse(spec));
        tracing::trace!(spec = spec, lines = lines.len(), "Parsed highlight specification");
        entries.insert(spec.to_string(), Arc::clone(&lines));
        lines
    }

    /// Number of cached specifications.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for LineSetCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_spec_is_parsed_once() {
        let cache = LineSetCache::new();
        let a = cache.get_or_parse("2,4");
        let b = cache.get_or_parse("2,4");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_specs_are_distinct_entries() {
        let cache = LineSetCache::new();
        let a = cache.get_or_parse("2,4");
        let b = cache.get_or_parse("2, 4");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_empty_spec_is_cached_as_empty_set() {
        let cache = LineSetCache::new();
        assert!(cache.get_or_parse("").is_empty());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_resets_at_capacity() {
        let cache = LineSetCache::with_capacity(2);
        cache.get_or_parse("1");
        cache.get_or_parse("2");
        assert_eq!(cache.len(), 2);
        cache.get_or_parse("3");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = LineSetCache::new();
        cache.get_or_parse("1");
        cache.clear();
        assert!(cache.is_empty());
    }
}
