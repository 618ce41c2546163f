//! Named POSIX errno kinds.
//!
//! Each kind is bound to the target's `libc` constant, so the numeric value
//! always matches what the kernel actually reports. Codes without a named
//! kind map to [`ErrorKind::Other`].
//!
//! Aliased constants resolve to the first listed kind: on Linux and Darwin
//! `EWOULDBLOCK == EAGAIN`, so a raw `EWOULDBLOCK` reads back as
//! `ResourceTemporarilyUnavailable`. Likewise `EOPNOTSUPP == ENOTSUP` on Linux.

macro_rules! error_kinds {
    ($( $(#[cfg($cfg:meta)])? $variant:ident => $errno:ident, )*) => {
        /// Closed set of system error kinds.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $( $(#[cfg($cfg)])? $variant, )*
            /// Any errno without a named kind.
            Other,
        }

        impl ErrorKind {
            /// Every named kind, in table order. `Other` is not included.
            pub const ALL: &'static [ErrorKind] = &[
                $( $(#[cfg($cfg)])? ErrorKind::$variant, )*
            ];

            /// Map a raw errno to its kind. Never fails.
            #[allow(unreachable_patterns)]
            pub fn from_errno(errno: i32) -> ErrorKind {
                match errno {
                    $( $(#[cfg($cfg)])? libc::$errno => ErrorKind::$variant, )*
                    _ => ErrorKind::Other,
                }
            }

            /// The errno constant this kind is bound to.
            pub fn errno(self) -> Option<i32> {
                match self {
                    $( $(#[cfg($cfg)])? ErrorKind::$variant => Some(libc::$errno), )*
                    ErrorKind::Other => None,
                }
            }

            /// The C symbol, e.g. `"EAGAIN"`.
            pub fn symbol(self) -> &'static str {
                match self {
                    $( $(#[cfg($cfg)])? ErrorKind::$variant => stringify!($errno), )*
                    ErrorKind::Other => "EOTHER",
                }
            }
        }
    };
}

error_kinds! {
    // ── Process / permission ──────────────────────────────────────
    OperationNotPermitted => EPERM,
    NoSuchFileOrDirectory => ENOENT,
    NoSuchProcess => ESRCH,
    InterruptedSystemCall => EINTR,
    InputOutputError => EIO,
    DeviceNotConfigured => ENXIO,
    ArgumentListTooLong => E2BIG,
    ExecutableFormatError => ENOEXEC,
    BadFileDescriptor => EBADF,
    NoChildProcesses => ECHILD,
    ResourceDeadlockAvoided => EDEADLK,
    CannotAllocateMemory => ENOMEM,
    PermissionDenied => EACCES,
    BadAddress => EFAULT,
    BlockDeviceRequired => ENOTBLK,
    DeviceOrResourceBusy => EBUSY,
    FileExists => EEXIST,
    CrossDeviceLink => EXDEV,
    OperationNotSupportedByDevice => ENODEV,
    NotADirectory => ENOTDIR,
    IsADirectory => EISDIR,
    InvalidArgument => EINVAL,
    TooManyOpenFilesInSystem => ENFILE,
    TooManyOpenFiles => EMFILE,
    InappropriateIoctlForDevice => ENOTTY,
    TextFileBusy => ETXTBSY,
    FileTooLarge => EFBIG,
    NoSpaceLeftOnDevice => ENOSPC,
    IllegalSeek => ESPIPE,
    ReadOnlyFileSystem => EROFS,
    TooManyLinks => EMLINK,
    BrokenPipe => EPIPE,
    NumericalArgumentOutOfDomain => EDOM,
    ResultTooLarge => ERANGE,

    // ── Non-blocking / sockets ────────────────────────────────────
    ResourceTemporarilyUnavailable => EAGAIN,
    OperationWouldBlock => EWOULDBLOCK,
    OperationNowInProgress => EINPROGRESS,
    OperationAlreadyInProgress => EALREADY,
    SocketOperationOnNonSocket => ENOTSOCK,
    DestinationAddressRequired => EDESTADDRREQ,
    MessageTooLong => EMSGSIZE,
    ProtocolWrongTypeForSocket => EPROTOTYPE,
    ProtocolNotAvailable => ENOPROTOOPT,
    ProtocolNotSupported => EPROTONOSUPPORT,
    SocketTypeNotSupported => ESOCKTNOSUPPORT,
    OperationNotSupported => ENOTSUP,
    OperationNotSupportedOnSocket => EOPNOTSUPP,
    ProtocolFamilyNotSupported => EPFNOSUPPORT,
    AddressFamilyNotSupported => EAFNOSUPPORT,
    AddressAlreadyInUse => EADDRINUSE,
    CannotAssignRequestedAddress => EADDRNOTAVAIL,
    NetworkIsDown => ENETDOWN,
    NetworkIsUnreachable => ENETUNREACH,
    NetworkDroppedConnectionOnReset => ENETRESET,
    SoftwareCausedConnectionAbort => ECONNABORTED,
    ConnectionResetByPeer => ECONNRESET,
    NoBufferSpaceAvailable => ENOBUFS,
    SocketIsAlreadyConnected => EISCONN,
    SocketIsNotConnected => ENOTCONN,
    CannotSendAfterSocketShutdown => ESHUTDOWN,
    TooManyReferences => ETOOMANYREFS,
    OperationTimedOut => ETIMEDOUT,
    ConnectionRefused => ECONNREFUSED,
    HostIsDown => EHOSTDOWN,
    NoRouteToHost => EHOSTUNREACH,

    // ── Filesystem ────────────────────────────────────────────────
    TooManyLevelsOfSymbolicLinks => ELOOP,
    FileNameTooLong => ENAMETOOLONG,
    DirectoryNotEmpty => ENOTEMPTY,
    TooManyUsers => EUSERS,
    DiskQuotaExceeded => EDQUOT,
    StaleFileHandle => ESTALE,
    ObjectIsRemote => EREMOTE,
    NoLocksAvailable => ENOLCK,

    // ── Misc ──────────────────────────────────────────────────────
    FunctionNotImplemented => ENOSYS,
    ValueTooLargeForDefinedDataType => EOVERFLOW,
    OperationCanceled => ECANCELED,
    IdentifierRemoved => EIDRM,
    NoMessageOfDesiredType => ENOMSG,
    IllegalByteSequence => EILSEQ,
    BadMessage => EBADMSG,
    MultihopAttempted => EMULTIHOP,
    LinkHasBeenSevered => ENOLINK,
    ProtocolError => EPROTO,
    StateNotRecoverable => ENOTRECOVERABLE,
    PreviousOwnerDied => EOWNERDEAD,

    // ── STREAMS (not on the BSDs) ─────────────────────────────────
    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    NoDataAvailable => ENODATA,
    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    OutOfStreamsResources => ENOSR,
    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    DeviceNotAStream => ENOSTR,
    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    TimerExpired => ETIME,
}
