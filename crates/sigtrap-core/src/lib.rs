//! # sigtrap-core
//!
//! Core types and traits for the sigtrap signal registry.
//!
//! Contains no OS calls of its own; the `sigaction`/`kill` backend lives in
//! `sigtrap-runtime`. `libc` is used only for the target's signal numbers.
//!
//! ## Modules
//!
//! - `signal` - Signal catalog and dispositions
//! - `error` - Error types
//! - `traits` - Handler type and platform backend trait
//! - `spinlock` - Internal spinlock primitive
//! - `kprint` - Kernel-style debug printing macros
//! - `env` - Environment variable utilities

pub mod signal;
pub mod error;
pub mod traits;
pub mod spinlock;
pub mod kprint;
pub mod env;

// Re-exports for convenience
pub use signal::{Disposition, ParseSignalError, Signal};
pub use error::{SignalError, SignalResult};
pub use traits::{Handler, SignalBackend, Trampoline};
pub use spinlock::SpinLock;
pub use env::{env_get, env_get_bool, env_get_opt};

pub use sigtrap_errno::{ErrorKind, SystemError};

/// Constants for the handler table
pub mod constants {
    /// Handler table slots, indexed by raw signal number (slot 0 unused)
    pub const SIGNAL_SLOTS: usize = 32;
}
