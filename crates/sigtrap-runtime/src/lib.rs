//! # sigtrap-runtime
//!
//! Process-wide signal registry for Unix.
//!
//! This crate provides:
//! - The lock-free handler table read by the signal trampoline
//! - A registry that keeps the table and the OS dispositions in step
//! - The `sigaction`/`kill` backend and the process-wide registry instance
//! - Environment-driven configuration

pub mod config;
pub mod handlers;
pub mod registry;
pub mod signal;

// Re-exports
pub use config::RegistryConfig;
pub use handlers::HandlerTable;
pub use registry::SignalRegistry;
pub use signal::{
    configure, current_disposition, handle, ignore_multiple, is_handled, registry, send,
    send_to, trap, trap_multiple, use_default_multiple, UnixSignals,
};
