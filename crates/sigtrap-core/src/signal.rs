//! Signal catalog and dispositions
//!
//! [`Signal`] covers the 31 classic signal numbers of the target. Variant
//! values come from `libc`, so `Signal::Usr1.raw()` is 10 on Linux and 30
//! on Darwin. Per-platform variants:
//!
//! | number | Linux    | Darwin / BSD |
//! |--------|----------|--------------|
//! | 7      | `Bus`    | `Emt`        |
//! | 16     | `StkFlt` | `Urg`        |
//! | 29     | `Io`     | `Info`       |
//! | 30     | `Pwr`    | `Usr1`       |
//!
//! Linux's `SIGPOLL` is the same number as `SIGIO` and is represented once.

use core::fmt;
use core::str::FromStr;

macro_rules! signals {
    ($( $(#[cfg($cfg:meta)])? $variant:ident => $sig:ident, )*) => {
        /// An OS signal.
        ///
        /// Building one from a raw number never fails: anything outside the
        /// catalog is [`Signal::Unknown`]. Equality and hashing follow the
        /// raw code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i32)]
        pub enum Signal {
            $( $(#[cfg($cfg)])? $variant = libc::$sig, )*
            /// Out-of-range or reserved number. Raw code `0`.
            Unknown = 0,
        }

        impl Signal {
            /// Every named signal, `Unknown` excluded.
            pub const ALL: &'static [Signal] = &[
                $( $(#[cfg($cfg)])? Signal::$variant, )*
            ];

            /// Map a raw signal number. Never fails.
            pub const fn from_raw(raw: i32) -> Signal {
                match raw {
                    $( $(#[cfg($cfg)])? libc::$sig => Signal::$variant, )*
                    _ => Signal::Unknown,
                }
            }

            /// C name, e.g. `"SIGUSR1"`. `Unknown` is `"SIGUNKNOWN"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $(#[cfg($cfg)])? Signal::$variant => stringify!($sig), )*
                    Signal::Unknown => "SIGUNKNOWN",
                }
            }
        }
    };
}

signals! {
    Hup => SIGHUP,
    Int => SIGINT,
    Quit => SIGQUIT,
    Ill => SIGILL,
    Trap => SIGTRAP,
    Abrt => SIGABRT,
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    Emt => SIGEMT,
    Fpe => SIGFPE,
    Kill => SIGKILL,
    Bus => SIGBUS,
    Segv => SIGSEGV,
    Sys => SIGSYS,
    Pipe => SIGPIPE,
    Alrm => SIGALRM,
    Term => SIGTERM,
    Urg => SIGURG,
    Stop => SIGSTOP,
    Tstp => SIGTSTP,
    Cont => SIGCONT,
    Chld => SIGCHLD,
    Ttin => SIGTTIN,
    Ttou => SIGTTOU,
    Io => SIGIO,
    Xcpu => SIGXCPU,
    Xfsz => SIGXFSZ,
    Vtalrm => SIGVTALRM,
    Prof => SIGPROF,
    Winch => SIGWINCH,
    #[cfg(any(target_os = "linux", target_os = "android"))]
    StkFlt => SIGSTKFLT,
    #[cfg(any(target_os = "linux", target_os = "android"))]
    Pwr => SIGPWR,
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    Info => SIGINFO,
    Usr1 => SIGUSR1,
    Usr2 => SIGUSR2,
}

impl Signal {
    /// Raw signal number; `0` for `Unknown`.
    #[inline]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Whether the OS lets a process catch or ignore this signal.
    ///
    /// `Kill` and `Stop` are fixed by the kernel; `Unknown` is not a signal.
    #[inline]
    pub const fn is_trappable(self) -> bool {
        !matches!(self, Signal::Kill | Signal::Stop | Signal::Unknown)
    }
}

impl From<i32> for Signal {
    fn from(raw: i32) -> Self {
        Signal::from_raw(raw)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error from parsing a [`Signal`] by name or number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSignalError(String);

impl fmt::Display for ParseSignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized signal: {:?}", self.0)
    }
}

impl std::error::Error for ParseSignalError {}

impl FromStr for Signal {
    type Err = ParseSignalError;

    /// Accepts `"SIGUSR1"`, `"USR1"`, `"usr1"` or `"10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<i32>() {
            return match Signal::from_raw(raw) {
                Signal::Unknown => Err(ParseSignalError(s.to_string())),
                sig => Ok(sig),
            };
        }

        let upper = trimmed.to_ascii_uppercase();
        let bare = upper.strip_prefix("SIG").unwrap_or(&upper);
        Signal::ALL
            .iter()
            .copied()
            .find(|sig| &sig.name()[3..] == bare)
            .ok_or_else(|| ParseSignalError(s.to_string()))
    }
}

/// What the OS does when a signal arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Disposition {
    /// Discard the signal.
    Ignore = 0,
    /// Kernel default (terminate, stop, continue, or ignore, per signal).
    UseDefault = 1,
    /// Run the registered handler.
    Handle = 2,
}

impl Disposition {
    #[inline]
    pub const fn as_raw(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disposition::Ignore => write!(f, "ignore"),
            Disposition::UseDefault => write!(f, "default"),
            Disposition::Handle => write!(f, "handle"),
        }
    }
}
