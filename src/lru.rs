//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides an LRU cache with O(1) operations for all common
//! cache operations. LRU is one of the most widely used eviction algorithms
//! due to its simplicity and good performance for workloads with temporal
//! locality.
//!
//! # Algorithm
//!
//! The cache maintains entries in order of recency of use and evicts the
//! least recently used entry when capacity is reached. A hit relinks the
//! entry to the front of the recency list; a miss inserts at the front,
//! evicting from the back when full.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - `look_update`: O(1)
//!   - Get: O(1)
//!   - Put: O(1)
//!   - Remove: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - Entries are stored in a slot arena addressed by integer handles;
//!     the key index maps keys to handles, never to pointers
//!
//! # When to Use
//!
//! LRU caches are ideal for:
//! - General-purpose caching where access patterns exhibit temporal locality
//! - Simple implementation with predictable performance
//! - Caching with a fixed entry budget
//!
//! They are less suitable for:
//! - Workloads where frequency of access is more important than recency
//! - Scanning patterns where a large set of keys is accessed once in sequence
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a synchronization primitive such as `Mutex` or `RwLock`.

extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

use crate::arena::EntryId;
use crate::config::LruCacheConfig;
use crate::list::RecencyList;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Internal LRU segment containing the actual cache algorithm.
///
/// The recency list owns the entries; the key index maps each cached key to
/// the arena handle of its list node. The two structures agree at every
/// public-method boundary: a key is in the map exactly when its entry is in
/// the list.
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: RecencyList<(K, V)>,
    map: HashMap<K, EntryId, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    pub(crate) fn with_hasher(
        config: LruCacheConfig,
        hash_builder: S,
        metrics: LruCacheMetrics,
    ) -> Self {
        let cap = config.capacity();
        let map_capacity = cap.get().next_power_of_two();
        LruSegment {
            config,
            list: RecencyList::with_capacity(cap.get()),
            map: HashMap::with_capacity_and_hasher(map_capacity, hash_builder),
            metrics,
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> NonZeroUsize {
        self.config.capacity()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    pub(crate) fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Answers one request: hit if `key` is cached, miss otherwise.
    ///
    /// On a hit the entry moves to the front of the recency list and
    /// `on_miss` is never called. On a miss the back entry is evicted first
    /// when the cache is full, then `on_miss` produces the value stored for
    /// `key`.
    pub(crate) fn look_update<F>(&mut self, key: K, on_miss: F) -> bool
    where
        K: Clone,
        F: FnOnce(&K) -> V,
    {
        if let Some(&id) = self.map.get(&key) {
            self.list.move_to_front(id);
            self.metrics.core.record_hit();
            return true;
        }

        self.metrics.core.record_miss();
        if self.map.len() >= self.cap().get() {
            if let Some((old_key, _)) = self.list.pop_back() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
            }
        }
        let value = on_miss(&key);
        let id = self.list.push_front((key.clone(), value));
        self.map.insert(key, id);
        self.metrics.core.record_insertion();
        false
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key).copied()?;
        self.list.move_to_front(id);
        self.metrics.core.record_hit();
        self.list.get(id).map(|(_, v)| v)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.get(key).copied()?;
        self.list.move_to_front(id);
        self.metrics.core.record_hit();
        self.list.get_mut(id).map(|(_, v)| v)
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(&id) = self.map.get(&key) {
            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|slot| mem::replace(slot, (key, value)));
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            if let Some((old_key, old_value)) = self.list.pop_back() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
                evicted = Some((old_key, old_value));
            }
        }

        let id = self.list.push_front((key.clone(), value));
        self.map.insert(key, id);
        self.metrics.core.record_insertion();
        evicted
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.map.remove(key)?;
        let removed = self.list.remove(id);
        if removed.is_some() {
            self.metrics.core.record_eviction();
        }
        removed.map(|(_, v)| v)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.map.len())
            .finish()
    }
}

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When the cache reaches
/// capacity, the least recently used entry is evicted to make room.
///
/// # Examples
///
/// ```
/// use evict_rs::LruCache;
/// use evict_rs::config::LruCacheConfig;
///
/// let config = LruCacheConfig::try_new(2).unwrap();
/// let mut cache = LruCache::init(config, None);
///
/// // Add items to the cache
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an LRU cache from its config, with optional pre-seeded
    /// metrics.
    pub fn init(config: LruCacheConfig, metrics: Option<LruCacheMetrics>) -> LruCache<K, V> {
        LruCache {
            segment: LruSegment::with_hasher(
                config,
                DefaultHashBuilder::default(),
                metrics.unwrap_or_default(),
            ),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates an LRU cache with the specified config and hash builder.
    pub fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LruSegment::with_hasher(config, hash_builder, LruCacheMetrics::new()),
        }
    }

    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.segment.cap()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Answers one request of the stream: returns true on a hit, false on a
    /// miss. On a miss, `on_miss` is called exactly once to produce the
    /// value cached for `key`; on a hit it is not called at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use evict_rs::LruCache;
    /// use evict_rs::config::LruCacheConfig;
    ///
    /// let config = LruCacheConfig::try_new(2).unwrap();
    /// let mut cache = LruCache::init(config, None);
    ///
    /// assert!(!cache.look_update(1u64, |k| *k * 10)); // miss
    /// assert!(!cache.look_update(2, |k| *k * 10)); // miss
    /// assert!(cache.look_update(1, |_| unreachable!())); // hit
    /// assert!(!cache.look_update(3, |k| *k * 10)); // miss, evicts 2
    /// assert_eq!(cache.get(&2), None);
    /// assert_eq!(cache.get(&3), Some(&30));
    /// ```
    #[inline]
    pub fn look_update<F>(&mut self, key: K, on_miss: F) -> bool
    where
        K: Clone,
        F: FnOnce(&K) -> V,
    {
        self.segment.look_update(key, on_miss)
    }

    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.segment.record_miss();
    }

    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    #[inline]
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        self.segment.put(key, value)
    }

    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Iterates the cached entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.segment.iter()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

/// Iterator over the entries of an [`LruCache`], most recently used first.
pub struct Iter<'a, K, V> {
    inner: crate::list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn make_cache<K: Hash + Eq, V>(cap: usize) -> LruCache<K, V> {
        let config = LruCacheConfig::try_new(cap).unwrap();
        LruCache::init(config, None)
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = make_cache(2);
        assert_eq!(cache.put("apple", 1), None);
        assert_eq!(cache.put("banana", 2), None);
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);
        assert_eq!(cache.put("apple", 3).unwrap().1, 1);
        assert_eq!(cache.get(&"apple"), Some(&3));
        let evicted = cache.put("cherry", 4).unwrap();
        assert_eq!(evicted, ("banana", 2));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&"cherry"), None);
        let evicted = cache.put("cherry", 3);
        assert_eq!(evicted, None);
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_capacity_limits() {
        let mut cache = make_cache(3);
        for i in 0..10u32 {
            cache.put(i, i * 100);
            assert!(cache.len() <= 3, "cache exceeded its capacity");
        }
        // Only the three most recent keys survive
        assert_eq!(cache.get(&7), Some(&700));
        assert_eq!(cache.get(&8), Some(&800));
        assert_eq!(cache.get(&9), Some(&900));
        assert_eq!(cache.get(&0), None);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = make_cache(2);
        cache.put("one".to_string(), 1);
        cache.put("two".to_string(), 2);
        // Borrowed lookups work against owned keys
        assert_eq!(cache.get("one"), Some(&1));
        cache.put("three".to_string(), 3);
        assert_eq!(cache.get("two"), None);
        assert_eq!(cache.get("three"), Some(&3));
    }

    #[test]
    fn test_lru_complex_values() {
        let mut cache: LruCache<u32, Vec<String>> = make_cache(2);
        cache.put(1, ["a".to_string(), "b".to_string()].to_vec());
        if let Some(v) = cache.get_mut(&1) {
            v.push("c".to_string());
        }
        assert_eq!(cache.get(&1).map(Vec::len), Some(3));
    }

    #[test]
    fn test_look_update_hit_miss_pattern() {
        let mut cache = make_cache(2);
        let results: Vec<bool> = [1u64, 2, 1, 3]
            .iter()
            .map(|&k| cache.look_update(k, |k| *k))
            .collect();
        assert_eq!(results, [false, false, true, false]);
        // The fourth request evicted 2, the least recently used key
        let keys: Vec<u64> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, [3, 1]);
    }

    #[test]
    fn test_look_update_calls_on_miss_exactly_once_per_miss() {
        let mut cache = make_cache(2);
        let mut calls = 0u32;
        for &key in &[5u64, 5, 5, 6, 5, 6] {
            cache.look_update(key, |k| {
                calls += 1;
                *k
            });
        }
        // Two distinct keys, each missing exactly once
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_iter_order_tracks_recency() {
        let mut cache = make_cache(3);
        cache.put(1u32, 'a');
        cache.put(2, 'b');
        cache.put(3, 'c');
        cache.get(&1);
        let keys: Vec<u32> = cache.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, [1, 3, 2]);
    }

    #[test]
    fn test_lru_metrics() {
        let mut cache = make_cache(2);
        cache.put(1u32, 1);
        cache.put(2, 2);
        cache.get(&1);
        cache.get(&3); // not present, not recorded by get
        cache.record_miss();
        cache.put(3, 3); // evicts 2

        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests"), Some(&2.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_segment_directly() {
        let config = LruCacheConfig::try_new(2).unwrap();
        let mut segment: LruSegment<u32, u32> =
            LruSegment::with_hasher(config, DefaultHashBuilder::default(), LruCacheMetrics::new());
        segment.put(1, 10);
        segment.put(2, 20);
        assert_eq!(segment.get(&1), Some(&10));
        segment.put(3, 30);
        assert_eq!(segment.get(&2), None);
        assert_eq!(segment.len(), 2);
    }

    #[test]
    fn test_shared_across_threads_with_mutex() {
        extern crate std;
        use std::sync::{Arc, Mutex};
        use std::thread;
        use std::vec::Vec;

        let cache = Arc::new(Mutex::new(make_cache::<u64, u64>(64)));
        let mut handles = Vec::new();
        for t in 0..4u64 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let key = t * 100 + i;
                    let mut guard = cache.lock().unwrap();
                    guard.look_update(key % 50, |k| *k);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let guard = cache.lock().unwrap();
        assert!(guard.len() <= 64);
    }

    #[test]
    fn test_borrowed_in_scoped_pool() {
        extern crate std;
        use scoped_threadpool::Pool;

        let mut pool = Pool::new(1);
        let mut cache = make_cache::<u32, &str>(2);
        cache.put(1, "a");
        pool.scoped(|scope| {
            scope.execute(|| {
                cache.put(2, "b");
            });
        });
        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
    }
}
