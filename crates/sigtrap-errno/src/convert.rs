use std::io;

use nix::errno::Errno;

use crate::error::SystemError;
use crate::last::last_errno;

// ── From<Errno> ───────────────────────────────────────────────────

impl From<Errno> for SystemError {
    /// Convert a `nix` errno. `Errno::UnknownErrno` (0) becomes `Other`.
    fn from(errno: Errno) -> Self {
        SystemError::build(errno as i32, Vec::new())
    }
}

// ── io::Error interop ─────────────────────────────────────────────

impl From<SystemError> for io::Error {
    /// Wraps the `SystemError` as the source, keeping the `io::ErrorKind`
    /// std derives from the raw errno.
    fn from(err: SystemError) -> Self {
        let kind = io::Error::from_raw_os_error(err.errno()).kind();
        io::Error::new(kind, err)
    }
}

impl TryFrom<io::Error> for SystemError {
    type Error = io::Error;

    /// Only raw OS errors convert; anything else is handed back unchanged.
    fn try_from(err: io::Error) -> Result<Self, io::Error> {
        match err.raw_os_error() {
            Some(errno) if errno != 0 => Ok(SystemError::build(errno, Vec::new())),
            _ => Err(err),
        }
    }
}

// ── Return-code checks ────────────────────────────────────────────

/// Turn a libc-style return code into a `Result`.
///
/// `-1` means failure with the reason in `errno`; anything else is passed
/// through.
///
/// ```
/// use sigtrap_errno::{check, ErrorKind};
///
/// let rc = unsafe { libc::close(-1) };
/// assert_eq!(check(rc).unwrap_err().kind(), ErrorKind::BadFileDescriptor);
/// ```
#[inline]
pub fn check(rc: i32) -> Result<i32, SystemError> {
    if rc == -1 {
        Err(SystemError::build(last_errno(), Vec::new()))
    } else {
        Ok(rc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn from_nix_errno() {
        let err = SystemError::from(Errno::ESRCH);
        assert_eq!(err.kind(), ErrorKind::NoSuchProcess);
        assert_eq!(err.errno(), libc::ESRCH);
    }

    #[test]
    fn into_io_error_keeps_kind_and_source() {
        let err = SystemError::from_errno(libc::EACCES).unwrap();
        let io_err: io::Error = err.clone().into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
        let inner = io_err
            .get_ref()
            .and_then(|e| e.downcast_ref::<SystemError>())
            .unwrap();
        assert_eq!(inner, &err);
    }

    #[test]
    fn try_from_raw_os_io_error() {
        let io_err = io::Error::from_raw_os_error(libc::ECONNREFUSED);
        let err = SystemError::try_from(io_err).unwrap();
        assert_eq!(err.kind(), ErrorKind::ConnectionRefused);
    }

    #[test]
    fn try_from_custom_io_error_fails() {
        let io_err = io::Error::new(io::ErrorKind::Other, "not an os error");
        let back = SystemError::try_from(io_err).unwrap_err();
        assert_eq!(back.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn question_mark_conversion() {
        fn inner() -> Result<(), Errno> {
            Err(Errno::EINTR)
        }
        fn outer() -> Result<(), SystemError> {
            inner()?;
            Ok(())
        }
        assert_eq!(outer().unwrap_err().kind(), ErrorKind::InterruptedSystemCall);
    }

    #[test]
    fn check_passes_success_through() {
        assert_eq!(check(0), Ok(0));
        assert_eq!(check(17), Ok(17));
    }
}
