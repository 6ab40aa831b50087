//! Configuration for the offline-optimal simulator.
//!
//! The simulator shares the capacity rules of the online caches: zero is
//! rejected at construction, and everything else is accepted. It takes the
//! request trace separately, at
//! [`BeladySimulator::init`](crate::BeladySimulator::init).
//!
//! # Examples
//!
//! ```
//! use evict_rs::config::BeladyConfig;
//! use evict_rs::BeladySimulator;
//!
//! let config = BeladyConfig::try_new(3).unwrap();
//! let sim = BeladySimulator::init(config, vec![1u64, 2, 1, 3], None);
//! assert_eq!(sim.total_misses(), 3);
//! ```

use core::fmt;
use core::num::NonZeroUsize;

use crate::error::ConfigError;

/// Configuration for a [`BeladySimulator`](crate::BeladySimulator).
///
/// # Examples
///
/// ```
/// use evict_rs::config::BeladyConfig;
/// use core::num::NonZeroUsize;
///
/// let config = BeladyConfig {
///     capacity: NonZeroUsize::new(64).unwrap(),
/// };
/// assert_eq!(config.capacity().get(), 64);
///
/// // Zero capacity is rejected at construction
/// assert!(BeladyConfig::try_new(0).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct BeladyConfig {
    /// Maximum number of keys the simulated cache can hold.
    pub capacity: NonZeroUsize,
}

impl BeladyConfig {
    /// Creates a config from a plain capacity, rejecting zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        match NonZeroUsize::new(capacity) {
            Some(capacity) => Ok(BeladyConfig { capacity }),
            None => Err(ConfigError::ZeroCapacity),
        }
    }

    /// Returns the configured capacity.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl fmt::Debug for BeladyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeladyConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belady_config_creation() {
        let config = BeladyConfig {
            capacity: NonZeroUsize::new(8).unwrap(),
        };
        assert_eq!(config.capacity.get(), 8);
    }

    #[test]
    fn test_belady_config_rejects_zero() {
        assert_eq!(
            BeladyConfig::try_new(0).unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }
}
