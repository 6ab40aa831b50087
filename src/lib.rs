#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! This section provides quick code examples and API references for each
//! replacement policy.
//!
//! ## Policy Selection Guide
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                 Which Replacement Policy Should I Use?               │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  ┌────────────────┐                                                  │
//! │  │ Full request   │──Yes──▶ ┌─────────────────┐                      │
//! │  │ trace known    │         │ BeladySimulator │  (optimal baseline,  │
//! │  │ ahead of time? │         └─────────────────┘   offline only)      │
//! │  └───────┬────────┘                                                  │
//! │          │                                                           │
//! │         No — your workload is primarily...                           │
//! │          │                                                           │
//! │  ┌───────▼─────────┐        ┌──────────┐                             │
//! │  │ Recency-based?  │──Yes──▶│   LRU    │                             │
//! │  │ (recent = hot)  │        └──────────┘                             │
//! │  └───────┬─────────┘                                                 │
//! │          │                                                           │
//! │         No                                                           │
//! │          │                                                           │
//! │  ┌───────▼─────────┐        ┌──────────┐                             │
//! │  │ Frequency-based?│──Yes──▶│   LFU    │                             │
//! │  │ (popular = hot) │        └──────────┘                             │
//! │  └─────────────────┘                                                 │
//! │                                                                      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Policy | Description | Best Use Case |
//! |--------|-------------|---------------|
//! | [`LruCache`] | Least Recently Used | General purpose, recency-based access |
//! | [`LfuCache`] | Least Frequently Used | Stable popularity patterns |
//! | [`BeladySimulator`] | Belady's MIN, offline optimal | Baseline for evaluating the others |
//!
//! ## Performance Characteristics
//!
//! | Policy | look_update | Get | Put | Memory/Entry | Needs Future |
//! |--------|-------------|-----|-----|--------------|--------------|
//! | LRU    | O(1)        | O(1)| O(1)| ~48 bytes    | No           |
//! | LFU    | O(1)        | O(1)| O(1)| ~64 bytes    | No           |
//! | Belady | O(1) replay | n/a | n/a | ~48 bytes    | Whole trace  |
//!
//! The Belady simulation itself runs once at construction, in
//! O(n log capacity) for a trace of n requests.
//!
//! ## Code Examples
//!
//! ### The Request Contract
//!
//! Every policy answers a request stream through `look_update`: hit or
//! miss, with the miss path supplying the value to cache.
//!
//! ```rust
//! use evict_rs::LruCache;
//! use evict_rs::config::LruCacheConfig;
//!
//! let config = LruCacheConfig::try_new(128).unwrap();
//! let mut cache = LruCache::init(config, None);
//!
//! let mut loads = 0;
//! let mut hits = 0;
//! for block in [17u64, 3, 17, 99, 3] {
//!     if cache.look_update(block, |b| {
//!         loads += 1;
//!         *b * 2 // stand-in for the expensive fetch
//!     }) {
//!         hits += 1;
//!     }
//! }
//! assert_eq!(hits, 2);
//! assert_eq!(loads, 3); // 17, 3 and 99 each missed exactly once
//! ```
//!
//! ### LRU (Least Recently Used)
//!
//! Evicts the item that hasn't been accessed for the longest time. Simple
//! and effective for workloads with temporal locality.
//!
//! ```rust
//! use evict_rs::LruCache;
//! use evict_rs::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");      // "a" becomes most recently used
//! cache.put("c", 3);    // "b" evicted (least recently used)
//! assert!(cache.get(&"b").is_none());
//! ```
//!
//! ### LFU (Least Frequently Used)
//!
//! Tracks access frequency and evicts the least frequently accessed item,
//! breaking ties toward the least recently used. Great for workloads with
//! stable popularity patterns.
//!
//! ```rust
//! use evict_rs::LfuCache;
//! use evict_rs::config::LfuCacheConfig;
//!
//! let config = LfuCacheConfig::try_new(2).unwrap();
//! let mut cache = LfuCache::init(config, None);
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! // Access "popular" multiple times
//! for _ in 0..10 { cache.get(&"popular"); }
//!
//! cache.put("new", 3);  // "rare" evicted (lowest frequency)
//! assert!(cache.get(&"popular").is_some());
//! assert_eq!(cache.frequency(&"new"), Some(1));
//! ```
//!
//! ### Belady's MIN (Offline Optimal)
//!
//! Given the whole trace up front, always drops whichever key is needed
//! farthest in the future, sometimes by not admitting the incoming key at
//! all. No online policy can miss less, which makes it the yardstick for
//! the other two.
//!
//! ```rust
//! use evict_rs::BeladySimulator;
//! use evict_rs::config::BeladyConfig;
//!
//! let trace = vec![1u64, 2, 3, 1, 2, 4, 1];
//! let config = BeladyConfig::try_new(2).unwrap();
//! let sim = BeladySimulator::init(config, trace, None);
//!
//! // Only the first sighting of each key misses: 3 and 4 never recur,
//! // so neither is admitted over the recurring 1 and 2.
//! assert_eq!(sim.total_misses(), 4);
//! assert_eq!(sim.hits_history().len(), 7);
//! ```
//!
//! ### Uniform Dispatch
//!
//! Policies can be driven through one object-safe trait when a comparison
//! loop needs to treat them interchangeably:
//!
//! ```rust
//! use evict_rs::config::{LfuCacheConfig, LruCacheConfig};
//! use evict_rs::{LfuCache, LruCache, ReplacementPolicy};
//!
//! let mut policies: Vec<Box<dyn ReplacementPolicy<u64, u64>>> = vec![
//!     Box::new(LruCache::init(LruCacheConfig::try_new(8).unwrap(), None)),
//!     Box::new(LfuCache::init(LfuCacheConfig::try_new(8).unwrap(), None)),
//! ];
//!
//! let mut on_miss = |k: &u64| *k;
//! for policy in &mut policies {
//!     assert!(!policy.look_update(42, &mut on_miss));
//!     assert!(policy.look_update(42, &mut on_miss));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: Least Recently Used cache implementation
//! - [`lfu`]: Least Frequently Used cache implementation
//! - [`belady`]: Offline-optimal simulation (Belady's MIN)
//! - [`policy`]: Object-safe dispatch over the three policies
//! - [`config`]: Configuration structures for all policies
//! - [`error`]: Configuration error type
//! - [`metrics`]: Metrics collection for cache performance monitoring

#![no_std]

#[cfg(test)]
extern crate scoped_threadpool;

/// Slot arena with stable integer handles.
///
/// **Note**: This module is internal infrastructure and should not be used
/// directly by library consumers. Handles index a generational-free slot
/// vector; the cache implementations keep them valid. Use the high-level
/// cache types instead.
pub(crate) mod arena;

/// Doubly linked recency list built on arena handles.
///
/// This module provides the intrusive ordering structure behind the LRU
/// cache: O(1) push, unlink and relink by handle, with no raw pointers.
///
/// **Note**: This module is internal infrastructure and should not be used
/// directly by library consumers. Use the high-level cache implementations
/// instead.
pub(crate) mod list;

/// Frequency-bucketed index for the LFU cache.
///
/// Keeps one recency-ordered chain per access frequency, with bucket lookup
/// by integer frequency and a running minimum.
///
/// **Note**: This module is internal infrastructure and should not be used
/// directly by library consumers. Use the high-level cache implementations
/// instead.
pub(crate) mod freq;

/// Cache configuration structures.
///
/// Provides configuration structures for all replacement policies.
pub mod config;

/// Configuration error type.
///
/// The single failure mode in this crate: rejecting a zero capacity at
/// construction.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items
/// when the capacity is reached.
pub mod lru;

/// Least Frequently Used (LFU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least frequently used items
/// when capacity is reached. Items are tracked by their exact access
/// frequency, with frequency ties broken toward the least recently used.
pub mod lfu;

/// Offline-optimal simulation (Belady's MIN).
///
/// Provides a batch simulator that computes, for a known request trace, the
/// minimal achievable miss count and the per-position hit/miss record.
pub mod belady;

/// Uniform policy dispatch.
///
/// Provides the object-safe [`ReplacementPolicy`] trait for drivers that
/// compare policies behind one type.
pub mod policy;

/// Cache metrics system.
///
/// Provides a flexible metrics collection and reporting system for all
/// replacement policies. Each policy can track policy-specific metrics
/// while implementing a common interface.
pub mod metrics;

// Re-export cache types
pub use belady::BeladySimulator;
pub use lfu::LfuCache;
pub use lru::LruCache;

// Re-export the shared contract and error type
pub use error::ConfigError;
pub use policy::ReplacementPolicy;
