extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

/// Error returned when a cache is constructed with invalid parameters.
///
/// Construction is the only fallible operation in this crate: every
/// `look_update`, `get`, or `put` call on a built cache either fully applies
/// its state transition or leaves the cache untouched, so there is nothing
/// for them to report.
///
/// # Examples
///
/// ```
/// use evict_rs::config::LruCacheConfig;
/// use evict_rs::error::ConfigError;
///
/// let err = LruCacheConfig::try_new(0).unwrap_err();
/// assert_eq!(err, ConfigError::ZeroCapacity);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested capacity was zero. A cache must be able to hold at
    /// least one entry.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "cache capacity must be greater than zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_display() {
        let err = ConfigError::ZeroCapacity;
        assert_eq!(
            format!("{err}"),
            "cache capacity must be greater than zero"
        );
    }
}
