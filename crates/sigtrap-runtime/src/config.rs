//! Registry configuration
//!
//! Library defaults with runtime environment overrides.
//!
//! # Environment Variables
//!
//! | Variable                    | Field               | Default |
//! |-----------------------------|---------------------|---------|
//! | `SIGTRAP_RESTART`           | `restart_syscalls`  | `true`  |
//! | `SIGTRAP_LOG_REGISTRATIONS` | `log_registrations` | `false` |
//!
//! # Example
//!
//! ```rust,ignore
//! use sigtrap_runtime::RegistryConfig;
//!
//! // Defaults with env overrides, then one programmatic tweak
//! let config = RegistryConfig::from_env().restart_syscalls(false);
//! sigtrap_runtime::configure(config).ok();
//! ```

use sigtrap_core::env::env_get_bool;

/// Configuration for the signal registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Install handlers with `SA_RESTART` so interrupted system calls
    /// resume instead of failing with `EINTR`
    pub restart_syscalls: bool,

    /// Log every successful registration at info level
    pub log_registrations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            restart_syscalls: true,
            log_registrations: false,
        }
    }
}

impl RegistryConfig {
    /// Library defaults, no environment lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Library defaults overridden by `SIGTRAP_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            restart_syscalls: env_get_bool("SIGTRAP_RESTART", defaults.restart_syscalls),
            log_registrations: env_get_bool(
                "SIGTRAP_LOG_REGISTRATIONS",
                defaults.log_registrations,
            ),
        }
    }

    pub fn restart_syscalls(mut self, enable: bool) -> Self {
        self.restart_syscalls = enable;
        self
    }

    pub fn log_registrations(mut self, enable: bool) -> Self {
        self.log_registrations = enable;
        self
    }
}
