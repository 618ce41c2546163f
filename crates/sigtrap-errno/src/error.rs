use std::error::Error;
use std::ffi::CStr;
use std::fmt;

use crate::kind::ErrorKind;

/// A failed system call, captured from `errno`.
///
/// Carries the mapped [`ErrorKind`], the raw errno it was built from, the
/// platform's `strerror` text, and an optional byte payload: data that was
/// already processed when a receive or send failed part way.
///
/// Two errors are equal when kind, errno and payload match. The description
/// is derived from the errno and does not take part.
#[derive(Clone)]
pub struct SystemError {
    kind: ErrorKind,
    errno: i32,
    description: String,
    data: Vec<u8>,
}

// ── Constructors ──────────────────────────────────────────────────

impl SystemError {
    /// Build an error for `errno`. Returns `None` for `0` (no error).
    ///
    /// ```
    /// use sigtrap_errno::{ErrorKind, SystemError};
    ///
    /// let err = SystemError::from_errno(libc::EPERM).unwrap();
    /// assert_eq!(err.kind(), ErrorKind::OperationNotPermitted);
    /// assert!(SystemError::from_errno(0).is_none());
    /// ```
    pub fn from_errno(errno: i32) -> Option<Self> {
        Self::from_errno_with_data(errno, Vec::new())
    }

    /// Same as [`from_errno`](Self::from_errno), keeping `data` as payload.
    pub fn from_errno_with_data(errno: i32, data: Vec<u8>) -> Option<Self> {
        if errno == 0 {
            return None;
        }
        Some(Self::build(errno, data))
    }

    /// Unconditional constructor. `errno == 0` still yields `Other`.
    pub(crate) fn build(errno: i32, data: Vec<u8>) -> Self {
        Self {
            kind: ErrorKind::from_errno(errno),
            errno,
            description: describe(errno),
            data,
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl SystemError {
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The raw errno this error was built from.
    #[inline]
    pub fn errno(&self) -> i32 {
        self.errno
    }

    /// Human-readable text, as `strerror(3)` reports it.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Bytes processed before the failure. Empty unless captured by a
    /// receive/send helper.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Replace the payload.
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }
}

impl PartialEq for SystemError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.errno == other.errno && self.data == other.data
    }
}

impl Eq for SystemError {}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl fmt::Debug for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("SystemError");
        d.field("kind", &self.kind)
            .field("errno", &self.errno)
            .field("description", &self.description);
        if !self.data.is_empty() {
            d.field("data_len", &self.data.len());
        }
        d.finish()
    }
}

impl Error for SystemError {}

/// `strerror_r` into an owned string.
pub(crate) fn describe(errno: i32) -> String {
    let mut buf = [0 as libc::c_char; 256];
    // Safety: buf is writable for buf.len() bytes and strerror_r
    // NUL-terminates within that bound.
    let rc = unsafe { libc::strerror_r(errno, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 && buf[0] == 0 {
        return format!("Unknown error {}", errno);
    }
    // Safety: NUL-terminated by strerror_r (or zero-initialised).
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// std formats raw OS errors as "<strerror> (os error N)".
    fn strerror(errno: i32) -> String {
        let s = std::io::Error::from_raw_os_error(errno).to_string();
        match s.rfind(" (os error") {
            Some(idx) => s[..idx].to_string(),
            None => s,
        }
    }

    #[test]
    fn zero_is_not_an_error() {
        assert!(SystemError::from_errno(0).is_none());
        assert!(SystemError::from_errno_with_data(0, vec![1, 2]).is_none());
    }

    #[test]
    fn every_named_kind_round_trips() {
        for &kind in ErrorKind::ALL {
            let errno = kind.errno().unwrap();
            let err = SystemError::from_errno(errno).unwrap();
            assert_eq!(err.errno(), errno);
            // Aliases sharing a code on this target resolve to the first kind.
            if ErrorKind::from_errno(errno) == kind {
                assert_eq!(err.kind(), kind);
            } else {
                assert_eq!(err.kind().errno(), Some(errno));
            }
        }
    }

    #[test]
    fn unrecognized_code_is_other() {
        let err = SystemError::from_errno(666).unwrap();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.errno(), 666);
        assert!(!err.description().is_empty());
    }

    #[test]
    fn description_matches_strerror() {
        for &kind in ErrorKind::ALL {
            let errno = kind.errno().unwrap();
            let err = SystemError::from_errno(errno).unwrap();
            assert_eq!(err.description(), strerror(errno), "errno {}", errno);
            assert_eq!(err.to_string(), err.description());
        }
    }

    #[test]
    fn equality_ignores_description_but_not_payload() {
        let a = SystemError::from_errno(libc::EPIPE).unwrap();
        let b = SystemError::from_errno(libc::EPIPE).unwrap();
        assert_eq!(a, b);

        let c = b.clone().with_data(vec![1]);
        assert_ne!(a, c);
        assert_eq!(c.data(), &[1]);
        assert_eq!(c.into_data(), vec![1]);
    }

    #[test]
    fn other_errors_compare_by_errno() {
        let a = SystemError::from_errno(666).unwrap();
        let b = SystemError::from_errno(667).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn debug_hides_payload_bytes() {
        let err = SystemError::from_errno_with_data(libc::EIO, vec![0; 64]).unwrap();
        let s = format!("{:?}", err);
        assert!(s.contains("InputOutputError"), "{}", s);
        assert!(s.contains("data_len: 64"), "{}", s);
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SystemError>();
    }
}
