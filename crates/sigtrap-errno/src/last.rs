//! Access to the calling thread's last-error indicator (`errno`).
//!
//! The `*_receive_*` and `*_send_*` variants capture partial I/O: after a
//! receive fails, the bytes already read are the prefix `data[..processed]`;
//! after a send fails, the bytes still unsent are the suffix
//! `data[processed..]`. `processed` is clamped to `data.len()`.

use nix::errno::Errno;

use crate::error::SystemError;

/// Raw `errno` of the calling thread.
#[inline]
pub fn last_errno() -> i32 {
    Errno::last_raw()
}

/// Reset `errno` to 0.
#[inline]
pub fn clear_last_error() {
    Errno::clear();
}

/// Overwrite `errno`.
#[inline]
pub fn set_last_error(errno: i32) {
    Errno::set_raw(errno);
}

impl SystemError {
    /// Error pending on this thread, if any.
    pub fn last_operation_error() -> Option<SystemError> {
        SystemError::from_errno(last_errno())
    }

    /// Pending error with the already-received prefix of `data` attached.
    pub fn last_receive_error(data: &[u8], processed: usize) -> Option<SystemError> {
        let end = processed.min(data.len());
        SystemError::from_errno_with_data(last_errno(), data[..end].to_vec())
    }

    /// Pending error with the still-unsent suffix of `data` attached.
    pub fn last_send_error(data: &[u8], processed: usize) -> Option<SystemError> {
        let start = processed.min(data.len());
        SystemError::from_errno_with_data(last_errno(), data[start..].to_vec())
    }
}

/// Fail with the pending error if `errno` is set.
pub fn ensure_last_operation_succeeded() -> Result<(), SystemError> {
    match SystemError::last_operation_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// [`ensure_last_operation_succeeded`] for a partially completed receive.
pub fn ensure_no_receive_error(data: &[u8], processed: usize) -> Result<(), SystemError> {
    match SystemError::last_receive_error(data, processed) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// [`ensure_last_operation_succeeded`] for a partially completed send.
pub fn ensure_no_send_error(data: &[u8], processed: usize) -> Result<(), SystemError> {
    match SystemError::last_send_error(data, processed) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
