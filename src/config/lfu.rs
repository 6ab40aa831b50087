//! Configuration for the Least Frequently Used (LFU) cache.
//!
//! # Sizing Guidelines
//!
//! `capacity` is the maximum number of entries. LFU carries slightly more
//! state per entry than LRU (the frequency count in the key index plus the
//! bucket bookkeeping), so for a memory budget:
//!
//! ```text
//! capacity ≈ memory_budget / (key_size + value_size + ~64 bytes)
//! ```
//!
//! LFU shines when a stable popular set should survive bursts of one-off
//! requests; size the capacity to cover that popular set with some headroom.
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::LfuCacheConfig;
//! use evict_rs::LfuCache;
//!
//! let config = LfuCacheConfig::try_new(10_000).unwrap();
//! let cache: LfuCache<u64, Vec<u8>> = LfuCache::init(config, None);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

use crate::error::ConfigError;

/// Configuration for an LFU (Least Frequently Used) cache.
///
/// LFU evicts the least frequently accessed entry when the cache is full,
/// breaking frequency ties towards the least recently used.
///
/// # Examples
///
/// ```
/// use evict_rs::config::LfuCacheConfig;
/// use evict_rs::LfuCache;
/// use core::num::NonZeroUsize;
///
/// let config = LfuCacheConfig {
///     capacity: NonZeroUsize::new(500).unwrap(),
/// };
/// let cache: LfuCache<u64, i32> = LfuCache::init(config, None);
///
/// // Zero capacity is rejected at construction
/// assert!(LfuCacheConfig::try_new(0).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct LfuCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LfuCacheConfig {
    /// Creates a config from a plain capacity, rejecting zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(LfuCacheConfig { capacity }),
            None => Err(ConfigError::ZeroCapacity),
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl fmt::Debug for LfuCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_config_creation() {
        let config = LfuCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
    }

    #[test]
    fn test_lfu_config_try_new() {
        let config = LfuCacheConfig::try_new(16).unwrap();
        assert_eq!(config.capacity().get(), 16);
    }

    #[test]
    fn test_lfu_config_rejects_zero() {
        assert_eq!(
            LfuCacheConfig::try_new(0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }
}
