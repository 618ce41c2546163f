//! # sigtrap - POSIX signal registry
//!
//! Lets a program decide, per signal, whether the OS ignores it, applies
//! its default action, or calls a Rust handler; send signals to itself or
//! other processes; and turn the `errno` left by failed system calls into
//! typed errors.
//!
//! ## Features
//!
//! - **Dispositions**: Ignore, UseDefault or Handle for every trappable signal
//! - **Shared handlers**: one closure for a whole set of signals
//! - **Signal-safe dispatch**: one atomic load and a call on delivery
//! - **Typed errno**: `ErrorKind` per POSIX code, with `strerror` text
//! - **Partial I/O**: receive/send errors carry the bytes already moved
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use sigtrap::{Disposition, Signal};
//!
//! let hits = Arc::new(AtomicUsize::new(0));
//! let h = hits.clone();
//! sigtrap::handle(Signal::Usr1, move |_sig| {
//!     h.fetch_add(1, Ordering::SeqCst);
//! })
//! .unwrap();
//!
//! sigtrap::send(Signal::Usr1).unwrap();
//! while hits.load(Ordering::SeqCst) == 0 {
//!     std::thread::yield_now();
//! }
//!
//! // Kill and Stop stay under OS control.
//! assert!(sigtrap::trap(Signal::Kill, Disposition::Ignore, None).is_err());
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      User Code                              │
//! │        handle(), trap_multiple(), ignore_multiple()         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SignalRegistry                            │
//! │      validation, registration lock, rollback, logging       │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                           │
//!                  ▼                           ▼
//!    ┌──────────────────────────┐   ┌──────────────────────────┐
//!    │      HandlerTable        │   │       UnixSignals        │
//!    │  32 atomic slots, lock-  │   │   sigaction / kill via   │
//!    │  free read by trampoline │   │   nix, errno → errors    │
//!    └──────────────────────────┘   └──────────────────────────┘
//! ```

// Re-export core types
pub use sigtrap_core::{
    Disposition,
    Handler,
    ParseSignalError,
    Signal,
    SignalBackend,
    SignalError,
    SignalResult,
};

// Re-export kprint macros for debug logging
pub use sigtrap_core::{kerror, kwarn, kinfo, kdebug, ktrace};
pub use sigtrap_core::kprint::{LogLevel, init as init_logging, set_log_level, set_flush_enabled};

// Re-export env utilities
pub use sigtrap_core::{env_get, env_get_bool, env_get_opt};

// Re-export errno types
pub use sigtrap_errno::{
    check,
    clear_last_error,
    ensure_last_operation_succeeded,
    ensure_no_receive_error,
    ensure_no_send_error,
    last_errno,
    set_last_error,
    ErrorKind,
    SystemError,
    SystemResult,
};

// Re-export runtime
pub use sigtrap_runtime::{
    configure,
    current_disposition,
    handle,
    ignore_multiple,
    is_handled,
    registry,
    send,
    send_to,
    trap,
    trap_multiple,
    use_default_multiple,
    HandlerTable,
    RegistryConfig,
    SignalRegistry,
    UnixSignals,
};
