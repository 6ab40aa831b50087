//! Uniform Policy Dispatch.
//!
//! Every cache in this crate answers requests through an inherent
//! `look_update` method that is generic over its miss closure. That form
//! compiles to a direct call and is what application code should reach for.
//!
//! Drivers that compare policies side by side want to hold them behind one
//! type instead, so this module defines [`ReplacementPolicy`], a small
//! object-safe rendition of the same contract. The miss closure becomes
//! `&mut dyn FnMut` to keep the trait usable as `dyn ReplacementPolicy`.

extern crate alloc;

use crate::belady::BeladySimulator;
use crate::lfu::LfuCache;
use crate::lru::LruCache;
use core::hash::{BuildHasher, Hash};

/// One request against a replacement policy: hit or miss, with the miss
/// path supplying the value to cache.
///
/// Implementations must call `on_miss` exactly once per miss and never on a
/// hit. The offline simulator is the one exception: it replays a
/// precomputed record and never calls the closure at all.
///
/// # Examples
///
/// ```
/// use evict_rs::config::{LfuCacheConfig, LruCacheConfig};
/// use evict_rs::{LfuCache, LruCache, ReplacementPolicy};
///
/// let lru = LruCache::init(LruCacheConfig::try_new(2).unwrap(), None);
/// let lfu = LfuCache::init(LfuCacheConfig::try_new(2).unwrap(), None);
/// let mut policies: Vec<Box<dyn ReplacementPolicy<u64, u64>>> =
///     vec![Box::new(lru), Box::new(lfu)];
///
/// for policy in &mut policies {
///     let mut on_miss = |k: &u64| *k;
///     assert!(!policy.look_update(7, &mut on_miss));
///     assert!(policy.look_update(7, &mut on_miss));
/// }
/// ```
pub trait ReplacementPolicy<K, V> {
    /// Answers one request: returns true on a hit, false on a miss.
    fn look_update(&mut self, key: K, on_miss: &mut dyn FnMut(&K) -> V) -> bool;

    /// Returns the number of currently cached entries.
    fn len(&self) -> usize;

    /// Returns the maximum number of entries the policy may cache.
    fn capacity(&self) -> usize;

    /// Returns `true` if nothing is cached.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ReplacementPolicy<K, V> for LruCache<K, V, S> {
    fn look_update(&mut self, key: K, on_miss: &mut dyn FnMut(&K) -> V) -> bool {
        LruCache::look_update(self, key, |k| on_miss(k))
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.cap().get()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ReplacementPolicy<K, V> for LfuCache<K, V, S> {
    fn look_update(&mut self, key: K, on_miss: &mut dyn FnMut(&K) -> V) -> bool {
        LfuCache::look_update(self, key, |k| on_miss(k))
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        self.cap().get()
    }
}

impl<K: Hash + Eq + Ord + Clone, V> ReplacementPolicy<K, V> for BeladySimulator<K> {
    fn look_update(&mut self, key: K, on_miss: &mut dyn FnMut(&K) -> V) -> bool {
        BeladySimulator::look_update(self, key, |k| on_miss(k))
    }

    fn len(&self) -> usize {
        BeladySimulator::len(self)
    }

    fn capacity(&self) -> usize {
        self.cap().get()
    }
}
