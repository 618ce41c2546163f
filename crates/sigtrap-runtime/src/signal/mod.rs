//! OS signal backend
//!
//! Only Unix (`sigaction`/`kill`) is supported.

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        pub use unix::*;
    } else {
        compile_error!("sigtrap supports Unix targets only");
    }
}
