//! # sigtrap-errno - typed POSIX errno
//!
//! Maps the raw `errno` a failing system call leaves behind into a
//! structured [`SystemError`]: a named [`ErrorKind`], the raw code, the
//! platform's `strerror` text, and an optional payload of bytes that were
//! already processed when a receive or send failed part way.
//!
//! ## Quick Start
//!
//! ```rust
//! use sigtrap_errno::{ensure_last_operation_succeeded, ErrorKind, SystemError};
//!
//! let rc = unsafe { libc::close(-1) };
//! assert_eq!(rc, -1);
//!
//! let err = ensure_last_operation_succeeded().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::BadFileDescriptor);
//! println!("close failed: {}", err);
//!
//! sigtrap_errno::clear_last_error();
//! assert!(SystemError::last_operation_error().is_none());
//! ```
//!
//! ## Mapping
//!
//! Exactly one kind per raw code. Codes without a named kind (and aliases
//! that collide on the target) resolve as documented in [`kind`]; anything
//! unrecognised is [`ErrorKind::Other`] with the raw code preserved.

pub mod kind;
mod error;
mod last;
mod convert;

// ── Public API ────────────────────────────────────────────────────

pub use kind::ErrorKind;
pub use error::SystemError;
pub use last::{
    clear_last_error, ensure_last_operation_succeeded, ensure_no_receive_error,
    ensure_no_send_error, last_errno, set_last_error,
};
pub use convert::check;

/// Convenience Result alias.
pub type SystemResult<T> = Result<T, SystemError>;
