//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Sizing Guidelines
//!
//! `capacity` is the maximum number of entries, not a byte budget. Each
//! entry carries the key (twice: once in the key index, once alongside the
//! value), the value, and two link handles. For a memory budget, divide the
//! budget by your average entry footprint:
//!
//! ```text
//! capacity ≈ memory_budget / (key_size + value_size + ~48 bytes)
//! ```
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LruCacheConfig;
//! use evict_rs::LruCache;
//!
//! let config = LruCacheConfig::try_new(10_000).unwrap();
//! let cache: LruCache<u64, Vec<u8>> = LruCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

use crate::error::ConfigError;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when the cache is full.
///
/// # Examples
///
/// ```
/// use evict_rs::config::LruCacheConfig;
/// use evict_rs::LruCache;
/// use core::num::NonZeroUsize;
///
/// let config = LruCacheConfig {
///     capacity: NonZeroUsize::new(500).unwrap(),
/// };
/// let cache: LruCache<u64, i32> = LruCache::init(config, None);
///
/// // Zero capacity is rejected at construction
/// assert!(LruCacheConfig::try_new(0).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a config from a plain capacity, rejecting zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(LruCacheConfig { capacity }),
            None => Err(ConfigError::ZeroCapacity),
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
    }

    #[test]
    fn test_lru_config_try_new() {
        let config = LruCacheConfig::try_new(16).unwrap();
        assert_eq!(config.capacity().get(), 16);
    }

    #[test]
    fn test_lru_config_rejects_zero() {
        assert_eq!(
            LruCacheConfig::try_new(0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }
}
