//! Signal registry
//!
//! Pairs a [`HandlerTable`] with a [`SignalBackend`] and keeps the two in
//! step. Every mutation runs under one lock so the OS never points at the
//! trampoline while the table lacks (or holds a stale) handler.
//!
//! Per-signal state machine:
//!
//! ```text
//!            trap(Handle)              trap(Ignore)
//!  Default ───────────────► Handled ───────────────► Ignored
//!     ▲                        │  ▲                     │
//!     └──── trap(UseDefault) ──┘  └──── trap(Handle) ───┘
//! ```
//!
//! Every transition is allowed except for `Kill`, `Stop` and `Unknown`,
//! which stay at their OS-fixed behaviour.

use std::sync::Arc;

use sigtrap_core::{
    kdebug, kinfo, kwarn, Disposition, Handler, Signal, SignalBackend, SignalError,
    SignalResult, SpinLock, Trampoline,
};

use crate::config::RegistryConfig;
use crate::handlers::HandlerTable;

pub struct SignalRegistry<B: SignalBackend> {
    backend: B,
    table: &'static HandlerTable,
    trampoline: Trampoline,
    lock: SpinLock<()>,
    config: RegistryConfig,
}

impl<B: SignalBackend> SignalRegistry<B> {
    /// `trampoline` must route to `table.dispatch`.
    pub fn new(
        backend: B,
        table: &'static HandlerTable,
        trampoline: Trampoline,
        config: RegistryConfig,
    ) -> Self {
        Self {
            backend,
            table,
            trampoline,
            lock: SpinLock::new(()),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set the disposition of `signal`.
    ///
    /// `handler` is required for `Disposition::Handle` and ignored
    /// otherwise. Replaces any handler previously stored for `signal`;
    /// moving away from `Handle` drops the stored handler so it can never
    /// fire again.
    pub fn trap(
        &self,
        signal: Signal,
        disposition: Disposition,
        handler: Option<Handler>,
    ) -> SignalResult<()> {
        if !signal.is_trappable() {
            kdebug!("refusing to {} {}", disposition, signal);
            return Err(SignalError::CannotHandle(signal));
        }
        let handler = match (disposition, handler) {
            (Disposition::Handle, None) => return Err(SignalError::InvalidTrapCombination),
            (Disposition::Handle, Some(h)) => Some(h),
            (_, _) => None,
        };

        let _guard = self.lock.lock();
        let restart = self.config.restart_syscalls;

        match handler {
            Some(handler) => {
                let previous = self.table.swap(signal, Some(handler));
                if let Err(e) = self.backend.install(signal, disposition, self.trampoline, restart) {
                    self.table.swap(signal, previous);
                    kwarn!("installing {} handler failed: {}", signal, e);
                    return Err(e);
                }
            }
            None => {
                if let Err(e) = self.backend.install(signal, disposition, self.trampoline, restart) {
                    kwarn!("setting {} to {} failed: {}", signal, disposition, e);
                    return Err(e);
                }
                self.table.swap(signal, None);
            }
        }

        if self.config.log_registrations {
            kinfo!("{} -> {}", signal, disposition);
        } else {
            kdebug!("{} -> {}", signal, disposition);
        }
        Ok(())
    }

    /// Register `handler` for `signal`.
    pub fn handle<F>(&self, signal: Signal, handler: F) -> SignalResult<()>
    where
        F: Fn(Signal) + Send + Sync + 'static,
    {
        self.trap(signal, Disposition::Handle, Some(Arc::new(handler)))
    }

    /// Register one shared handler for every signal in `signals`.
    ///
    /// Best-effort: stops at the first failure, and signals registered
    /// before it stay registered.
    pub fn trap_multiple<F>(&self, signals: &[Signal], handler: F) -> SignalResult<()>
    where
        F: Fn(Signal) + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        self.apply(signals, Disposition::Handle, Some(handler))
    }

    /// Ignore every signal in `signals`. Same batch rules as `trap_multiple`.
    pub fn ignore_multiple(&self, signals: &[Signal]) -> SignalResult<()> {
        self.apply(signals, Disposition::Ignore, None)
    }

    /// Restore the default disposition for every signal in `signals`.
    /// Same batch rules as `trap_multiple`.
    pub fn use_default_multiple(&self, signals: &[Signal]) -> SignalResult<()> {
        self.apply(signals, Disposition::UseDefault, None)
    }

    fn apply(
        &self,
        signals: &[Signal],
        disposition: Disposition,
        handler: Option<Handler>,
    ) -> SignalResult<()> {
        for &signal in signals {
            self.trap(signal, disposition, handler.clone())?;
        }
        Ok(())
    }

    /// Disposition the OS currently has for `signal`.
    pub fn current_disposition(&self, signal: Signal) -> SignalResult<Disposition> {
        if signal == Signal::Unknown {
            return Err(SignalError::InvalidSignal);
        }
        self.backend.current(signal)
    }

    /// Whether a handler is stored for `signal`.
    pub fn is_handled(&self, signal: Signal) -> bool {
        self.table.contains(signal)
    }

    /// Send `signal` to the calling process.
    pub fn send(&self, signal: Signal) -> SignalResult<()> {
        self.send_to(signal, self.backend.current_pid())
    }

    /// Send `signal` to process `pid`.
    ///
    /// Fire-and-forget: success means the OS accepted the request, not
    /// that any handler has run yet.
    pub fn send_to(&self, signal: Signal, pid: i32) -> SignalResult<()> {
        if signal == Signal::Unknown {
            return Err(SignalError::InvalidSignal);
        }
        self.backend.send(pid, signal).map_err(|e| {
            kwarn!("kill({}, {}) failed: {}", pid, signal, e);
            e
        })?;
        kdebug!("sent {} to {}", signal, pid);
        Ok(())
    }

    /// Entry for the trampoline: route a raw signal number to its handler.
    #[inline]
    pub fn dispatch(&self, raw: i32) {
        self.table.dispatch(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigtrap_core::SystemError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend that records calls instead of touching the OS.
    #[derive(Default)]
    struct RecordingBackend {
        installed: Mutex<HashMap<i32, Disposition>>,
        sent: Mutex<Vec<(i32, Signal)>>,
        fail_install: Mutex<Option<Signal>>,
    }

    impl SignalBackend for RecordingBackend {
        fn install(
            &self,
            signal: Signal,
            disposition: Disposition,
            _trampoline: Trampoline,
            _restart: bool,
        ) -> SignalResult<()> {
            if *self.fail_install.lock().unwrap() == Some(signal) {
                return Err(SystemError::from_errno(libc::EINVAL).unwrap().into());
            }
            self.installed.lock().unwrap().insert(signal.raw(), disposition);
            Ok(())
        }

        fn current(&self, signal: Signal) -> SignalResult<Disposition> {
            Ok(self
                .installed
                .lock()
                .unwrap()
                .get(&signal.raw())
                .copied()
                .unwrap_or(Disposition::UseDefault))
        }

        fn send(&self, pid: i32, signal: Signal) -> SignalResult<()> {
            if pid <= 0 {
                return Err(SystemError::from_errno(libc::ESRCH).unwrap().into());
            }
            self.sent.lock().unwrap().push((pid, signal));
            Ok(())
        }

        fn current_pid(&self) -> i32 {
            4242
        }
    }

    extern "C" fn noop_trampoline(_: libc::c_int) {}

    /// Each test gets its own leaked table so they never share slots.
    fn registry() -> SignalRegistry<RecordingBackend> {
        let table: &'static HandlerTable = Box::leak(Box::new(HandlerTable::new()));
        SignalRegistry::new(
            RecordingBackend::default(),
            table,
            noop_trampoline,
            RegistryConfig::new(),
        )
    }

    fn counter() -> (Arc<AtomicUsize>, impl Fn(Signal) + Send + Sync + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move |_: Signal| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn kill_stop_unknown_cannot_be_trapped() {
        let reg = registry();
        let (_, h) = counter();
        let h: Handler = Arc::new(h);
        for sig in [Signal::Kill, Signal::Stop, Signal::Unknown] {
            for disp in [Disposition::Handle, Disposition::Ignore, Disposition::UseDefault] {
                assert_eq!(
                    reg.trap(sig, disp, Some(h.clone())),
                    Err(SignalError::CannotHandle(sig))
                );
            }
        }
        assert!(reg.backend().installed.lock().unwrap().is_empty());
    }

    #[test]
    fn handle_without_handler_is_rejected() {
        let reg = registry();
        assert_eq!(
            reg.trap(Signal::Usr1, Disposition::Handle, None),
            Err(SignalError::InvalidTrapCombination)
        );
        assert!(!reg.is_handled(Signal::Usr1));
    }

    #[test]
    fn handle_stores_then_installs() {
        let reg = registry();
        let (count, h) = counter();
        reg.handle(Signal::Usr1, h).unwrap();

        assert!(reg.is_handled(Signal::Usr1));
        assert_eq!(reg.current_disposition(Signal::Usr1), Ok(Disposition::Handle));

        reg.dispatch(Signal::Usr1.raw());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn later_handler_overwrites_earlier() {
        let reg = registry();
        let (first, h1) = counter();
        let (second, h2) = counter();
        reg.handle(Signal::Hup, h1).unwrap();
        reg.handle(Signal::Hup, h2).unwrap();

        reg.dispatch(Signal::Hup.raw());
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn leaving_handle_drops_the_handler() {
        let reg = registry();
        let (count, h) = counter();
        reg.handle(Signal::Chld, h).unwrap();
        reg.trap(Signal::Chld, Disposition::UseDefault, None).unwrap();

        assert!(!reg.is_handled(Signal::Chld));
        reg.dispatch(Signal::Chld.raw());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn non_handle_dispositions_ignore_supplied_handler() {
        let reg = registry();
        let (count, h) = counter();
        reg.trap(Signal::Term, Disposition::Ignore, Some(Arc::new(h))).unwrap();

        assert!(!reg.is_handled(Signal::Term));
        assert_eq!(reg.current_disposition(Signal::Term), Ok(Disposition::Ignore));
        reg.dispatch(Signal::Term.raw());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_install_restores_previous_handler() {
        let reg = registry();
        let (old_count, old) = counter();
        reg.handle(Signal::Usr2, old).unwrap();

        *reg.backend().fail_install.lock().unwrap() = Some(Signal::Usr2);
        let (new_count, new) = counter();
        let err = reg.handle(Signal::Usr2, new).unwrap_err();
        assert!(err.system_error().is_some());

        reg.dispatch(Signal::Usr2.raw());
        assert_eq!(old_count.load(Ordering::SeqCst), 1);
        assert_eq!(new_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failed_ignore_keeps_handler() {
        let reg = registry();
        let (count, h) = counter();
        reg.handle(Signal::Winch, h).unwrap();

        *reg.backend().fail_install.lock().unwrap() = Some(Signal::Winch);
        assert!(reg.trap(Signal::Winch, Disposition::Ignore, None).is_err());
        assert!(reg.is_handled(Signal::Winch));
        reg.dispatch(Signal::Winch.raw());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn trap_multiple_shares_one_handler() {
        let reg = registry();
        let (count, h) = counter();
        reg.trap_multiple(&[Signal::Usr1, Signal::Usr2], h).unwrap();

        reg.dispatch(Signal::Usr1.raw());
        reg.dispatch(Signal::Usr2.raw());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn batch_is_not_rolled_back() {
        let reg = registry();
        let (_, h) = counter();
        let err = reg
            .trap_multiple(&[Signal::Usr1, Signal::Kill, Signal::Usr2], h)
            .unwrap_err();

        assert_eq!(err, SignalError::CannotHandle(Signal::Kill));
        assert!(reg.is_handled(Signal::Usr1));
        assert!(!reg.is_handled(Signal::Usr2));
    }

    #[test]
    fn ignore_and_default_batches() {
        let reg = registry();
        reg.ignore_multiple(&[Signal::Usr1, Signal::Usr2]).unwrap();
        assert_eq!(reg.current_disposition(Signal::Usr1), Ok(Disposition::Ignore));
        assert_eq!(reg.current_disposition(Signal::Usr2), Ok(Disposition::Ignore));

        reg.use_default_multiple(&[Signal::Usr1]).unwrap();
        assert_eq!(reg.current_disposition(Signal::Usr1), Ok(Disposition::UseDefault));

        assert_eq!(
            reg.ignore_multiple(&[Signal::Stop]),
            Err(SignalError::CannotHandle(Signal::Stop))
        );
    }

    #[test]
    fn ignore_is_idempotent() {
        let reg = registry();
        reg.trap(Signal::Usr1, Disposition::Ignore, None).unwrap();
        let once = reg.current_disposition(Signal::Usr1);
        reg.trap(Signal::Usr1, Disposition::Ignore, None).unwrap();
        assert_eq!(reg.current_disposition(Signal::Usr1), once);
    }

    #[test]
    fn send_validates_and_targets_self_by_default() {
        let reg = registry();
        assert_eq!(reg.send(Signal::Unknown), Err(SignalError::InvalidSignal));

        reg.send(Signal::Usr1).unwrap();
        reg.send_to(Signal::Term, 77).unwrap();
        assert_eq!(
            *reg.backend().sent.lock().unwrap(),
            vec![(4242, Signal::Usr1), (77, Signal::Term)]
        );
    }

    #[test]
    fn send_surfaces_os_errors() {
        let reg = registry();
        let err = reg.send_to(Signal::Usr1, 0).unwrap_err();
        assert_eq!(
            err.system_error().map(|e| e.kind()),
            Some(sigtrap_core::ErrorKind::NoSuchProcess)
        );
    }

    #[test]
    fn racing_registrations_keep_table_and_backend_in_step() {
        let reg = registry();
        let (count, h) = counter();
        let h: Handler = Arc::new(h);

        std::thread::scope(|s| {
            for i in 0..8 {
                let reg = &reg;
                let h = h.clone();
                s.spawn(move || {
                    for n in 0..200 {
                        let result = match (i + n) % 3 {
                            0 => reg.trap(Signal::Winch, Disposition::Handle, Some(h.clone())),
                            1 => reg.trap(Signal::Winch, Disposition::Ignore, None),
                            _ => reg.trap(Signal::Winch, Disposition::UseDefault, None),
                        };
                        result.unwrap();
                    }
                });
            }
        });

        let handled = reg.current_disposition(Signal::Winch) == Ok(Disposition::Handle);
        assert_eq!(handled, reg.is_handled(Signal::Winch));
        reg.dispatch(Signal::Winch.raw());
        assert_eq!(count.load(Ordering::SeqCst), handled as usize);

        // Last writer wins.
        reg.trap(Signal::Winch, Disposition::Handle, Some(h)).unwrap();
        assert!(reg.is_handled(Signal::Winch));
        assert_eq!(reg.current_disposition(Signal::Winch), Ok(Disposition::Handle));
    }

    #[test]
    fn unknown_has_no_disposition() {
        let reg = registry();
        assert_eq!(
            reg.current_disposition(Signal::Unknown),
            Err(SignalError::InvalidSignal)
        );
    }
}
