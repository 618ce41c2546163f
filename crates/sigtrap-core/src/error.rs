//! Error types for signal registration and delivery

use core::fmt;

use sigtrap_errno::SystemError;

use crate::signal::Signal;

/// Result type for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors that can occur while trapping or sending signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The signal can never be caught or ignored (`Kill`, `Stop`) or is
    /// not a signal at all (`Unknown`)
    CannotHandle(Signal),

    /// `Disposition::Handle` was requested without a handler
    InvalidTrapCombination,

    /// Attempted to send `Signal::Unknown`
    InvalidSignal,

    /// The underlying system call failed
    System(SystemError),
}

impl SignalError {
    /// The OS error behind this failure, if any.
    pub fn system_error(&self) -> Option<&SystemError> {
        match self {
            SignalError::System(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::CannotHandle(sig) => write!(f, "{} cannot be trapped or ignored", sig),
            SignalError::InvalidTrapCombination => {
                write!(f, "handle disposition requires a handler")
            }
            SignalError::InvalidSignal => write!(f, "invalid signal"),
            SignalError::System(e) => write!(f, "system error: {}", e),
        }
    }
}

impl std::error::Error for SignalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SignalError::System(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SystemError> for SignalError {
    fn from(e: SystemError) -> Self {
        SignalError::System(e)
    }
}
