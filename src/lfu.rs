//! Least Frequently Used (LFU) Cache Implementation.
//!
//! The LFU cache evicts the least frequently accessed item when the cache
//! reaches capacity. This implementation tracks an exact access count for
//! each item and maintains items grouped by frequency, which protects
//! frequently accessed items from eviction.
//!
//! # Algorithm
//!
//! Entries live in per-frequency buckets addressed by an integer-keyed hash
//! map, with a running minimum frequency tracked alongside. Every operation
//! is O(1):
//!
//! - A hit moves the entry from bucket `f` to the front of bucket `f + 1`.
//!   The minimum frequency advances to `f + 1` only when bucket `f` was
//!   drained by that move and `f` was the minimum.
//! - A miss at capacity evicts the back of the minimum-frequency bucket,
//!   then inserts the new entry with frequency 1 and resets the minimum
//!   frequency to 1.
//!
//! Within a bucket, entries are ordered by recency: promotions push to the
//! front and evictions take from the back, so ties in frequency are broken
//! by evicting the least recently used of the tied entries.
//!
//! # When to Use
//!
//! LFU works well when popularity is stable over time and a small set of
//! keys absorbs most of the traffic. It adapts more slowly than LRU when
//! the popular set shifts, because accumulated counts keep old favorites
//! resident.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. For concurrent access, wrap the
//! cache in a synchronization primitive such as `Mutex` or `RwLock`.

extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

use crate::arena::EntryId;
use crate::config::LfuCacheConfig;
use crate::freq::FrequencyIndex;
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
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

/// Frequency count and arena handle stored per key in the index map.
type FrequencySlot = (usize, EntryId);

/// Internal LFU segment containing the actual cache algorithm.
///
/// The frequency index owns the entries; the key index maps each cached key
/// to its current frequency and the arena handle of its node. The recorded
/// frequency always names the bucket the handle is linked into, so each
/// bucket operation can go straight to the right chain without scanning.
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    config: LfuCacheConfig,
    freq: FrequencyIndex<(K, V)>,
    map: HashMap<K, FrequencySlot, S>,
    metrics: LfuCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuSegment<K, V, S> {
    pub(crate) fn with_hasher(
        config: LfuCacheConfig,
        hash_builder: S,
        metrics: LfuCacheMetrics,
    ) -> Self {
        let cap = config.capacity();
        let map_capacity = cap.get().next_power_of_two();
        LfuSegment {
            config,
            freq: FrequencyIndex::with_capacity(cap.get()),
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
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    #[inline]
    pub(crate) fn min_frequency(&self) -> usize {
        self.freq.min_frequency()
    }

    pub(crate) fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).map(|&(frequency, _)| frequency)
    }

    pub(crate) fn record_miss(&mut self) {
        self.metrics.record_miss();
    }

    /// Serves a hit on `key`: moves its node up one frequency bucket and
    /// records the hit. Returns the handle for value access, or `None` if
    /// the key is not cached.
    fn promote_entry<Q>(&mut self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &(frequency, id) = self.map.get(key)?;
        self.metrics.record_frequency_hit(frequency);
        let new_frequency = self.freq.promote(id, frequency);
        if let Some(slot) = self.map.get_mut(key) {
            slot.0 = new_frequency;
        }
        self.metrics.record_frequency_increment(new_frequency);
        self.metrics
            .update_frequency_gauges(self.freq.min_frequency(), self.freq.levels());
        Some(id)
    }

    /// Answers one request: hit if `key` is cached, miss otherwise.
    ///
    /// On a hit the entry's frequency increases by one and `on_miss` is
    /// never called. On a miss the least frequently used entry is evicted
    /// first when the cache is full, then `on_miss` produces the value
    /// cached for `key` at frequency 1.
    pub(crate) fn look_update<F>(&mut self, key: K, on_miss: F) -> bool
    where
        K: Clone,
        F: FnOnce(&K) -> V,
    {
        if self.promote_entry(&key).is_some() {
            return true;
        }

        self.metrics.record_miss();
        if self.map.len() >= self.cap().get() {
            if let Some((old_key, _)) = self.freq.evict_lfu() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
            }
        }
        let value = on_miss(&key);
        let id = self.freq.push_new((key.clone(), value));
        self.map.insert(key, (1, id));
        self.metrics.core.record_insertion();
        self.metrics
            .update_frequency_gauges(self.freq.min_frequency(), self.freq.levels());
        false
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.promote_entry(key)?;
        self.freq.get(id).map(|(_, v)| v)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let id = self.promote_entry(key)?;
        self.freq.get_mut(id).map(|(_, v)| v)
    }

    pub(crate) fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        // An existing key keeps its frequency; only the value changes.
        if let Some(&(_, id)) = self.map.get(&key) {
            let old = self
                .freq
                .get_mut(id)
                .map(|slot| mem::replace(slot, (key, value)));
            self.metrics.core.record_insertion();
            return old;
        }

        let mut evicted = None;
        if self.map.len() >= self.cap().get() {
            if let Some((old_key, old_value)) = self.freq.evict_lfu() {
                self.map.remove(&old_key);
                self.metrics.core.record_eviction();
                evicted = Some((old_key, old_value));
            }
        }

        let id = self.freq.push_new((key.clone(), value));
        self.map.insert(key, (1, id));
        self.metrics.core.record_insertion();
        self.metrics
            .update_frequency_gauges(self.freq.min_frequency(), self.freq.levels());
        evicted
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (frequency, id) = self.map.remove(key)?;
        let removed = self.freq.remove(id, frequency);
        self.freq.rederive_min();
        removed.map(|(_, v)| v)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.freq.clear();
    }

    /// Removes and returns the eviction candidate: the least frequently
    /// used entry, breaking frequency ties toward the least recently used.
    ///
    /// Returns `None` if the cache is empty.
    pub(crate) fn pop(&mut self) -> Option<(K, V)> {
        let (key, value) = self.freq.evict_lfu()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction();
        self.freq.rederive_min();
        self.metrics
            .update_frequency_gauges(self.freq.min_frequency(), self.freq.levels());
        Some((key, value))
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity())
            .field("len", &self.map.len())
            .field("min_frequency", &self.freq.min_frequency())
            .finish()
    }
}

/// An implementation of a Least Frequently Used (LFU) cache.
///
/// The cache tracks the frequency of access for each item and evicts the
/// least frequently used item when the cache reaches capacity. In case of a
/// tie in frequency, the least recently used item among those with the same
/// frequency is evicted.
///
/// # Examples
///
/// ```
/// use evict_rs::LfuCache;
/// use evict_rs::config::LfuCacheConfig;
///
/// let config = LfuCacheConfig::try_new(3).unwrap();
/// let mut cache = LfuCache::init(config, None);
///
/// // Add some items, each starting at frequency 1
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3);
///
/// // Access "a" multiple times to increase its frequency
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // Access "b" once
/// assert_eq!(cache.get(&"b"), Some(&2));
///
/// // Adding a new item evicts "c", the only key still at frequency 1
/// cache.put("d", 4);
/// assert_eq!(cache.get(&"c"), None);
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LfuCache<K, V> {
    /// Creates an LFU cache from its config, with optional pre-seeded
    /// metrics.
    pub fn init(config: LfuCacheConfig, metrics: Option<LfuCacheMetrics>) -> LfuCache<K, V> {
        LfuCache {
            segment: LfuSegment::with_hasher(
                config,
                DefaultHashBuilder::default(),
                metrics.unwrap_or_default(),
            ),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Creates an LFU cache with the specified config and hash builder.
    pub fn with_hasher(config: LfuCacheConfig, hash_builder: S) -> Self {
        Self {
            segment: LfuSegment::with_hasher(config, hash_builder, LfuCacheMetrics::new()),
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
    /// use evict_rs::LfuCache;
    /// use evict_rs::config::LfuCacheConfig;
    ///
    /// let config = LfuCacheConfig::try_new(2).unwrap();
    /// let mut cache = LfuCache::init(config, None);
    ///
    /// assert!(!cache.look_update(1u64, |k| *k)); // miss
    /// assert!(!cache.look_update(2, |k| *k)); // miss
    /// assert!(cache.look_update(1, |_| unreachable!())); // hit, 1 now at frequency 2
    /// assert!(!cache.look_update(3, |k| *k)); // miss, evicts 2
    /// assert_eq!(cache.frequency(&2), None);
    /// assert_eq!(cache.frequency(&3), Some(1));
    /// ```
    #[inline]
    pub fn look_update<F>(&mut self, key: K, on_miss: F) -> bool
    where
        K: Clone,
        F: FnOnce(&K) -> V,
    {
        self.segment.look_update(key, on_miss)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// Accessing an item increases its frequency count.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Accessing an item increases its frequency count.
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

    /// Removes and returns the item that would be evicted next.
    ///
    /// For LFU this is the item with the lowest frequency; among items tied
    /// at that frequency, the least recently used one is taken.
    ///
    /// # Examples
    ///
    /// ```
    /// use evict_rs::LfuCache;
    /// use evict_rs::config::LfuCacheConfig;
    ///
    /// let config = LfuCacheConfig::try_new(3).unwrap();
    /// let mut cache = LfuCache::init(config, None);
    /// cache.put("a", 1);
    /// cache.get(&"a");
    /// cache.put("b", 2);
    ///
    /// // "b" sits at frequency 1, "a" at frequency 2
    /// assert_eq!(cache.pop(), Some(("b", 2)));
    /// assert_eq!(cache.pop(), Some(("a", 1)));
    /// assert_eq!(cache.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<(K, V)> {
        self.segment.pop()
    }

    /// Returns the lowest access frequency currently cached, or 1 when the
    /// cache is empty.
    #[inline]
    pub fn min_frequency(&self) -> usize {
        self.segment.min_frequency()
    }

    /// Returns the access frequency of `key`, or `None` if it is not
    /// cached.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.frequency(key)
    }

    #[inline]
    pub fn record_miss(&mut self) {
        self.segment.record_miss();
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    fn make_cache<K: Hash + Eq, V>(cap: usize) -> LfuCache<K, V> {
        let config = LfuCacheConfig::try_new(cap).unwrap();
        LfuCache::init(config, None)
    }

    #[test]
    fn test_lfu_basic() {
        let mut cache = make_cache(3);

        assert_eq!(cache.put("a", 1), None);
        assert_eq!(cache.put("b", 2), None);
        assert_eq!(cache.put("c", 3), None);

        // Access "a" multiple times to increase its frequency
        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"a"), Some(&1));

        // Access "b" once
        assert_eq!(cache.get(&"b"), Some(&2));

        // Add a new item, should evict "c" (the only key left at frequency 1)
        let evicted = cache.put("d", 4);
        assert_eq!(evicted, Some(("c", 3)));

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"d"), Some(&4));
        assert_eq!(cache.get(&"c"), None);
    }

    #[test]
    fn test_lfu_frequency_ordering() {
        let mut cache = make_cache(2);

        cache.put("a", 1);
        cache.put("b", 2);

        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"a");
        cache.get(&"b");

        // "b" has the lower frequency and is evicted
        let evicted = cache.put("c", 3);
        assert_eq!(evicted.map(|(k, _)| k), Some("b"));

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn test_lfu_update_existing() {
        let mut cache = make_cache(2);

        cache.put("a", 1);
        cache.get(&"a"); // frequency becomes 2

        // Updating an existing key replaces the value, not the frequency
        let old_value = cache.put("a", 10);
        assert_eq!(old_value, Some(("a", 1)));
        assert_eq!(cache.frequency(&"a"), Some(2));

        cache.put("b", 2);
        cache.put("c", 3); // evicts "b" because "a" has the higher frequency

        assert_eq!(cache.get(&"a"), Some(&10));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.get(&"b"), None);
    }

    #[test]
    fn test_lfu_remove() {
        let mut cache = make_cache(3);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);

        assert_eq!(cache.get(&"a"), Some(&1));
        assert_eq!(cache.get(&"c"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lfu_clear() {
        let mut cache = make_cache(3);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert_eq!(cache.len(), 3);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.min_frequency(), 1);

        cache.put("d", 4);
        assert_eq!(cache.get(&"d"), Some(&4));
    }

    #[test]
    fn test_lfu_get_mut() {
        let mut cache = make_cache(2);

        cache.put("a", 1);
        if let Some(v) = cache.get_mut(&"a") {
            *v = 100;
        }
        assert_eq!(cache.get(&"a"), Some(&100));
        // get_mut counted as an access
        assert_eq!(cache.frequency(&"a"), Some(3));
    }

    #[test]
    fn test_lfu_complex_values() {
        let mut cache: LfuCache<u32, Vec<String>> = make_cache(2);
        cache.put(1, ["x".to_string()].to_vec());
        if let Some(v) = cache.get_mut(&1) {
            v.push("y".to_string());
        }
        assert_eq!(cache.get(&1).map(Vec::len), Some(2));
    }

    #[test]
    fn test_look_update_transitions() {
        let mut cache = make_cache(2);
        let results: Vec<bool> = [1u64, 2, 1, 3]
            .iter()
            .map(|&k| cache.look_update(k, |k| *k))
            .collect();
        assert_eq!(results, [false, false, true, false]);
        // Key 2 was the only one still at frequency 1 when 3 arrived
        assert_eq!(cache.frequency(&1), Some(2));
        assert_eq!(cache.frequency(&2), None);
        assert_eq!(cache.frequency(&3), Some(1));
    }

    #[test]
    fn test_look_update_calls_on_miss_exactly_once_per_miss() {
        let mut cache = make_cache(2);
        let mut calls = 0u32;
        for &key in &[9u64, 9, 9, 8, 9, 8] {
            cache.look_update(key, |k| {
                calls += 1;
                *k
            });
        }
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_min_frequency_tracking() {
        let mut cache = make_cache(2);
        cache.look_update(1u64, |k| *k);
        cache.look_update(2, |k| *k);
        assert_eq!(cache.min_frequency(), 1);

        // Promoting 1 leaves 2 behind in bucket 1
        cache.look_update(1, |k| *k);
        assert_eq!(cache.min_frequency(), 1);

        // Promoting 2 drains bucket 1, so the minimum advances
        cache.look_update(2, |k| *k);
        assert_eq!(cache.min_frequency(), 2);

        // A miss resets the minimum to 1 for the fresh entry
        cache.look_update(3, |k| *k);
        assert_eq!(cache.min_frequency(), 1);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_intra_bucket_tie_break_is_lru() {
        let mut cache = make_cache(3);
        cache.look_update(1u64, |k| *k);
        cache.look_update(2, |k| *k);
        cache.look_update(3, |k| *k);

        // All three are tied at frequency 1; 1 is the oldest
        cache.look_update(4, |k| *k);
        assert_eq!(cache.frequency(&1), None);

        // 2 climbs out of the tie, leaving {4, 3} at frequency 1 with 3 older
        cache.get(&2);
        cache.look_update(5, |k| *k);
        assert_eq!(cache.frequency(&3), None);
        assert_eq!(cache.frequency(&4), Some(1));
        assert_eq!(cache.frequency(&2), Some(2));
        assert_eq!(cache.frequency(&5), Some(1));
    }

    #[test]
    fn test_pop_order() {
        let mut cache = make_cache(3);
        cache.put("a", 1);
        cache.get(&"a");
        cache.put("b", 2);
        cache.put("c", 3);

        // "b" and "c" are tied at frequency 1; "b" is the older of the two
        assert_eq!(cache.pop(), Some(("b", 2)));
        assert_eq!(cache.pop(), Some(("c", 3)));
        assert_eq!(cache.pop(), Some(("a", 1)));
        assert_eq!(cache.pop(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lfu_metrics() {
        let mut cache = make_cache(2);
        cache.look_update(1u64, |k| *k);
        cache.look_update(1, |k| *k);
        cache.look_update(2, |k| *k);
        cache.look_update(3, |k| *k); // evicts 2

        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests"), Some(&4.0));
        assert_eq!(metrics.get("cache_hits"), Some(&1.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(metrics.get("min_frequency"), Some(&1.0));
        assert_eq!(metrics.get("max_frequency"), Some(&2.0));
        assert_eq!(cache.algorithm_name(), "LFU");
    }

    #[test]
    fn test_lfu_segment_directly() {
        let config = LfuCacheConfig::try_new(2).unwrap();
        let mut segment: LfuSegment<u32, u32> =
            LfuSegment::with_hasher(config, DefaultHashBuilder::default(), LfuCacheMetrics::new());
        segment.put(1, 10);
        segment.put(2, 20);
        assert_eq!(segment.get(&1), Some(&10));
        segment.put(3, 30);
        assert_eq!(segment.get(&2), None);
        assert_eq!(segment.min_frequency(), 1);
        assert_eq!(segment.len(), 2);
    }
}
