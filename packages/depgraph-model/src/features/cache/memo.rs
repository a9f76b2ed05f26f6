//! Keyed at-most-once memoization

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::hash::Hash;
use std::sync::Arc;

/// Compute-if-absent map with one initialisation per key
///
/// Each key owns an `Arc<OnceCell<V>>`. The cell is cloned out of the map
/// before initialisation, so no shard lock is held while `init` runs:
/// distinct keys construct in parallel, callers of the same key block on
/// the cell and all observe the same value. `init` may recurse into the
/// cache for other keys; it must not request its own key.
pub struct MemoCache<K, V> {
    cells: DashMap<K, Arc<OnceCell<V>>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Value for `key`, running `init` if no caller has completed it yet
    ///
    /// A failed `init` leaves the cell empty; the next caller retries.
    pub fn get_or_try_init<E, F>(&self, key: &K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        // Fast path: already initialised
        if let Some(cell) = self.cells.get(key) {
            if let Some(value) = cell.get() {
                return Ok(value.clone());
            }
        }

        let cell = Arc::clone(
            self.cells
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .value(),
        );

        cell.get_or_try_init(init).map(V::clone)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cells.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Key has a completed value
    pub fn is_initialized(&self, key: &K) -> bool {
        self.cells
            .get(key)
            .map(|cell| cell.get().is_some())
            .unwrap_or(false)
    }

    /// Number of completed values
    pub fn len(&self) -> usize {
        self.cells
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cells.clear();
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_init_runs_once_per_key() {
        let cache: MemoCache<&str, Arc<String>> = MemoCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_try_init(&"a", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(Arc::new("A".to_string()))
                })
                .unwrap();
            assert_eq!(value.as_str(), "A");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_init_is_retried() {
        let cache: MemoCache<u32, u32> = MemoCache::new();

        assert!(cache.get_or_try_init(&1, || Err("boom")).is_err());
        assert!(!cache.is_initialized(&1));
        assert_eq!(cache.len(), 0);

        assert_eq!(cache.get_or_try_init(&1, || Ok::<_, &str>(7)), Ok(7));
        assert_eq!(cache.get(&1), Some(7));
    }

    #[test]
    fn test_recursive_init_of_other_key() {
        let cache: MemoCache<u32, u32> = MemoCache::new();

        let value = cache
            .get_or_try_init(&1, || {
                let inner = cache.get_or_try_init(&2, || Ok::<_, ()>(20))?;
                Ok::<_, ()>(inner + 1)
            })
            .unwrap();

        assert_eq!(value, 21);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_same_key_shares_value() {
        let cache: Arc<MemoCache<u32, Arc<u64>>> = Arc::new(MemoCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache
                        .get_or_try_init(&42, || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(std::time::Duration::from_millis(10));
                            Ok::<_, ()>(Arc::new(42))
                        })
                        .unwrap()
                })
            })
            .collect();

        let values: Vec<Arc<u64>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_clear() {
        let cache: MemoCache<u32, u32> = MemoCache::new();
        cache.get_or_try_init(&1, || Ok::<_, ()>(1)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }
}
