//! Platform traits
//!
//! The interface between the platform-agnostic registry and the OS signal
//! API. `sigtrap-runtime` provides the Unix implementation; tests swap in
//! a recording backend.

use std::sync::Arc;

use crate::error::SignalResult;
use crate::signal::{Disposition, Signal};

/// A user signal handler.
///
/// Handlers run inside the OS signal-delivery context. Only
/// async-signal-safe work is allowed there: atomics, `write(2)` on a raw
/// fd, setting a flag. No allocation, no blocking I/O, and no lock that
/// normal code might be holding.
pub type Handler = Arc<dyn Fn(Signal) + Send + Sync + 'static>;

/// Native entry point the OS calls with the raw signal number.
pub type Trampoline = extern "C" fn(libc::c_int);

/// Platform-specific signal disposition and delivery
pub trait SignalBackend: Send + Sync {
    /// Install `disposition` for `signal`.
    ///
    /// For `Disposition::Handle` the OS must call `trampoline` on delivery.
    /// `restart` asks for interrupted system calls to be restarted.
    fn install(
        &self,
        signal: Signal,
        disposition: Disposition,
        trampoline: Trampoline,
        restart: bool,
    ) -> SignalResult<()>;

    /// Read the installed disposition without changing it.
    fn current(&self, signal: Signal) -> SignalResult<Disposition>;

    /// Ask the OS to deliver `signal` to process `pid`.
    fn send(&self, pid: i32, signal: Signal) -> SignalResult<()>;

    /// Process id of the caller.
    fn current_pid(&self) -> i32;
}
