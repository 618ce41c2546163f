//! Environment variable utilities
//!
//! Parsing helpers behind `RegistryConfig::from_env()` and the kprint level.
//!
//! ```ignore
//! use sigtrap_core::env::{env_get, env_get_bool};
//!
//! let restart: bool = env_get_bool("SIGTRAP_RESTART", true);
//! let level: LogLevel = env_get("SIGTRAP_LOG_LEVEL", LogLevel::Info);
//! ```

use std::str::FromStr;

/// Get environment variable parsed as type T, or return default
///
/// Unset or unparsable values fall back to `default`.
#[inline]
pub fn env_get<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    env_get_opt(key).unwrap_or(default)
}

/// Get environment variable as optional value
#[inline]
pub fn env_get_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Get environment variable as boolean
///
/// `1/true/yes/on` are true, `0/false/no/off` are false (case-insensitive).
/// Anything else, including unset, returns the default.
#[inline]
pub fn env_get_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

// ============================================================================
// Tests
// ============================================================================
