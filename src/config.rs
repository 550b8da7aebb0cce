//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment
//! variables or a host application's own config files.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// Durations are expressed in milliseconds when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// TTL for entries stored without an explicit TTL
    #[serde(rename = "default_ttl_ms", deserialize_with = "millis")]
    pub default_ttl: Duration,
    /// Interval of the optional background sweep, None = lazy expiry only
    #[serde(rename = "cleanup_interval_ms", deserialize_with = "optional_millis")]
    pub cleanup_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds
    ///   (default: unset, 0 disables)
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfig` if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let capacity = parse_var("CACHE_CAPACITY")?.unwrap_or(defaults.capacity);
        let default_ttl = parse_var("CACHE_DEFAULT_TTL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.default_ttl);
        let cleanup_interval = parse_var::<u64>("CACHE_CLEANUP_INTERVAL_MS")?
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis);

        Ok(Self {
            capacity,
            default_ttl,
            cleanup_interval,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_ttl: Duration::from_secs(300),
            cleanup_interval: None,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig(format!("{}={:?}", name, raw))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => {
            Err(CacheError::InvalidConfig(format!("{}={:?}", name, raw)))
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

fn optional_millis<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Duration>, D::Error> {
    let ms = Option::<u64>::deserialize(deserializer)?;
    Ok(ms.filter(|&ms| ms > 0).map(Duration::from_millis))
}
