//! Cache Configuration Module
//!
//! This module provides configuration structures for all eviction policy
//! implementations. Each policy has its own dedicated configuration struct
//! with public fields.
//!
//! # Design Philosophy
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: The capacity field is a `NonZeroUsize`, so an empty
//!   cache is unrepresentable once a config exists
//! - **Checked construction**: `try_new` validates a plain `usize` capacity
//!   and rejects zero with [`ConfigError`](crate::error::ConfigError)
//!
//! # Configs
//!
//! | Config | Policy | Description |
//! |--------|--------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Least Recently Used |
//! | `LfuCacheConfig` | [`LfuCache`](crate::LfuCache) | Least Frequently Used |
//! | `BeladyConfig` | [`BeladySimulator`](crate::BeladySimulator) | Offline optimal baseline |
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LruCacheConfig;
//! use evict_rs::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Checked construction from a plain usize
//! let config = LruCacheConfig::try_new(1000).unwrap();
//!
//! // Or create the struct directly when the capacity is known non-zero
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//!
//! let cache: LruCache<u64, i32> = LruCache::init(config, None);
//! ```

pub mod belady;
pub mod lfu;
pub mod lru;

// Re-exports for convenience
pub use belady::BeladyConfig;
pub use lfu::LfuCacheConfig;
pub use lru::LruCacheConfig;
