//! Handler table
//!
//! Maps raw signal numbers to user handlers. Writers are serialized by the
//! registry lock; the reader is the signal trampoline, which may interrupt
//! a writer on the same thread. The read path is therefore one atomic load
//! and a call, with no lock and no allocation.
//!
//! A slot holds a leaked `Box<Handler>`. Replaced boxes are parked in
//! `retired` because a trampoline on another thread may still be running
//! the old handler. `dispatch` counts itself in `in_flight` before it loads
//! a slot; once a swap has published its new pointer and then reads the
//! count as zero, no dispatch can still hold a retired pointer and the
//! parked boxes are dropped.

use std::ptr;
use std::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

use sigtrap_core::constants::SIGNAL_SLOTS;
use sigtrap_core::{Handler, Signal, SpinLock};

pub struct HandlerTable {
    slots: [AtomicPtr<Handler>; SIGNAL_SLOTS],
    retired: SpinLock<Vec<Box<Handler>>>,
    in_flight: AtomicUsize,
}

impl HandlerTable {
    pub const fn new() -> Self {
        const EMPTY: AtomicPtr<Handler> = AtomicPtr::new(ptr::null_mut());
        Self {
            slots: [EMPTY; SIGNAL_SLOTS],
            retired: SpinLock::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Slot index for a raw signal number; `None` when out of range.
    #[inline]
    fn index(raw: i32) -> Option<usize> {
        match usize::try_from(raw) {
            Ok(idx) if idx > 0 && idx < SIGNAL_SLOTS => Some(idx),
            _ => None,
        }
    }

    /// Install `handler` for `signal` (or clear the slot with `None`) and
    /// return a clone of the handler it replaced.
    pub fn swap(&self, signal: Signal, handler: Option<Handler>) -> Option<Handler> {
        let idx = Self::index(signal.raw())?;
        let new = match handler {
            Some(h) => Box::into_raw(Box::new(h)),
            None => ptr::null_mut(),
        };
        let old = self.slots[idx].swap(new, Ordering::SeqCst);
        let previous = if old.is_null() {
            None
        } else {
            // Safety: non-null slots only ever hold pointers from
            // Box::into_raw above, and each is taken out of a slot exactly
            // once (by this swap).
            let old = unsafe { Box::from_raw(old) };
            let previous = Handler::clone(&old);
            self.retired.lock().push(old);
            Some(previous)
        };
        self.reclaim();
        previous
    }

    /// Drop retired handlers if no dispatch is running.
    ///
    /// Every retired pointer was unpublished before this load. A dispatch
    /// that could still see one incremented `in_flight` before its slot
    /// load, so a zero here means none is left.
    fn reclaim(&self) {
        if self.in_flight.load(Ordering::SeqCst) != 0 {
            return;
        }
        let drained = std::mem::take(&mut *self.retired.lock());
        drop(drained);
    }

    /// Whether a handler is stored for `signal`.
    pub fn contains(&self, signal: Signal) -> bool {
        Self::index(signal.raw())
            .map(|idx| !self.slots[idx].load(Ordering::Acquire).is_null())
            .unwrap_or(false)
    }

    /// Invoke the handler stored for `raw`, if any.
    ///
    /// Async-signal-safe as far as this table is concerned: atomics only,
    /// no allocation, no locks.
    #[inline]
    pub fn dispatch(&self, raw: i32) {
        let Some(idx) = Self::index(raw) else {
            return;
        };
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let handler = self.slots[idx].load(Ordering::SeqCst);
        if !handler.is_null() {
            // Safety: a non-null slot points to a live Box<Handler>. Once
            // swapped out it is only retired, and retired boxes are not
            // dropped while `in_flight` is non-zero.
            let handler: &Handler = unsafe { &*handler };
            (**handler)(Signal::from_raw(raw));
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// Number of replaced handlers still waiting to be dropped.
    pub fn retired_len(&self) -> usize {
        self.retired.lock().len()
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}
