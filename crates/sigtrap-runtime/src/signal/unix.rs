//! Unix signal backend
//!
//! Installs dispositions with `sigaction(2)` and delivers with `kill(2)`.
//! Every handled signal points at one `extern "C"` trampoline which looks
//! the user handler up in the process-wide [`HandlerTable`].

use std::ptr;
use std::sync::OnceLock;

use nix::errno::Errno;
use nix::sys::signal::{self as nix_signal, SaFlags, SigAction, SigHandler, SigSet};
use nix::unistd::{getpid, Pid};

use sigtrap_core::{Disposition, Signal, SignalBackend, SignalResult, SystemError, Trampoline};
use sigtrap_errno::check;

use crate::config::RegistryConfig;
use crate::handlers::HandlerTable;
use crate::registry::SignalRegistry;

static HANDLERS: HandlerTable = HandlerTable::new();
static REGISTRY: OnceLock<SignalRegistry<UnixSignals>> = OnceLock::new();

/// `sigaction`/`kill` backend
#[derive(Debug, Default, Clone, Copy)]
pub struct UnixSignals;

fn to_nix(signal: Signal) -> SignalResult<nix_signal::Signal> {
    Ok(nix_signal::Signal::try_from(signal.raw()).map_err(SystemError::from)?)
}

impl SignalBackend for UnixSignals {
    fn install(
        &self,
        signal: Signal,
        disposition: Disposition,
        trampoline: Trampoline,
        restart: bool,
    ) -> SignalResult<()> {
        let handler = match disposition {
            Disposition::Ignore => SigHandler::SigIgn,
            Disposition::UseDefault => SigHandler::SigDfl,
            Disposition::Handle => SigHandler::Handler(trampoline),
        };
        let flags = if restart { SaFlags::SA_RESTART } else { SaFlags::empty() };
        let action = SigAction::new(handler, flags, SigSet::empty());

        // Safety: the only handler ever installed is the trampoline, which
        // touches errno and the lock-free handler table and nothing else.
        unsafe { nix_signal::sigaction(to_nix(signal)?, &action) }.map_err(SystemError::from)?;
        Ok(())
    }

    fn current(&self, signal: Signal) -> SignalResult<Disposition> {
        // Safety: a null new action makes sigaction a pure query; `old` is
        // plain data the kernel fills in.
        let old = unsafe {
            let mut old: libc::sigaction = std::mem::zeroed();
            check(libc::sigaction(signal.raw(), ptr::null(), &mut old))?;
            old
        };
        Ok(match old.sa_sigaction {
            libc::SIG_IGN => Disposition::Ignore,
            libc::SIG_DFL => Disposition::UseDefault,
            _ => Disposition::Handle,
        })
    }

    fn send(&self, pid: i32, signal: Signal) -> SignalResult<()> {
        nix_signal::kill(Pid::from_raw(pid), to_nix(signal)?).map_err(SystemError::from)?;
        Ok(())
    }

    fn current_pid(&self) -> i32 {
        getpid().as_raw()
    }
}

/// Native entry point for every handled signal.
///
/// Keeps `errno` intact so the interrupted code sees the value it left.
extern "C" fn trampoline(signum: libc::c_int) {
    let saved = Errno::last_raw();
    HANDLERS.dispatch(signum);
    Errno::set_raw(saved);
}

fn build(config: RegistryConfig) -> SignalRegistry<UnixSignals> {
    SignalRegistry::new(UnixSignals, &HANDLERS, trampoline, config)
}

/// The process-wide registry, created from the environment on first use
/// unless [`configure`] ran earlier.
pub fn registry() -> &'static SignalRegistry<UnixSignals> {
    REGISTRY.get_or_init(|| build(RegistryConfig::from_env()))
}

/// Create the process-wide registry with `config`.
///
/// Only the first call (or first use of any other function here) decides
/// the configuration; later calls get their config back as the error.
pub fn configure(config: RegistryConfig) -> Result<(), RegistryConfig> {
    REGISTRY
        .set(build(config))
        .map_err(|rejected| rejected.config().clone())
}

/// Set the disposition of `signal`; see [`SignalRegistry::trap`].
pub fn trap(
    signal: Signal,
    disposition: Disposition,
    handler: Option<sigtrap_core::Handler>,
) -> SignalResult<()> {
    registry().trap(signal, disposition, handler)
}

/// Register `handler` for `signal`.
pub fn handle<F>(signal: Signal, handler: F) -> SignalResult<()>
where
    F: Fn(Signal) + Send + Sync + 'static,
{
    registry().handle(signal, handler)
}

/// Register one shared handler for several signals. Stops at the first
/// failure without undoing earlier registrations.
pub fn trap_multiple<F>(signals: &[Signal], handler: F) -> SignalResult<()>
where
    F: Fn(Signal) + Send + Sync + 'static,
{
    registry().trap_multiple(signals, handler)
}

pub fn ignore_multiple(signals: &[Signal]) -> SignalResult<()> {
    registry().ignore_multiple(signals)
}

pub fn use_default_multiple(signals: &[Signal]) -> SignalResult<()> {
    registry().use_default_multiple(signals)
}

/// Send `signal` to the calling process.
pub fn send(signal: Signal) -> SignalResult<()> {
    registry().send(signal)
}

/// Send `signal` to process `pid`.
pub fn send_to(signal: Signal, pid: i32) -> SignalResult<()> {
    registry().send_to(signal, pid)
}

/// Disposition the OS currently holds for `signal`.
pub fn current_disposition(signal: Signal) -> SignalResult<Disposition> {
    registry().current_disposition(signal)
}

/// Whether a handler is registered for `signal`.
pub fn is_handled(signal: Signal) -> bool {
    registry().is_handled(signal)
}
