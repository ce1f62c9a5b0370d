//! Mutual exclusion with a bounded wait
//!
//! ## Overview
//!
//! All mutable engine state sits behind one lock. Callers on the sampling
//! path must never hang on it: if another task stalls while holding the
//! lock, they give up after a fixed timeout and report `Timeout`.
//!
//! ```text
//! acquire_within(clock, 100 ms)
//!      │
//!      ├─ poll() ── Ok(guard) ──────────────→ return guard
//!      │     └──── WouldBlock
//!      │              │
//!      │              ├─ elapsed < timeout → spin, poll again
//!      │              └─ elapsed ≥ timeout → Err(LockTimeout)
//! ```
//!
//! The guard is RAII: the lock is released on every exit path, including
//! early `?` returns inside the critical section.
//!
//! ## Why a Spin Lock?
//!
//! `spin::Mutex` works the same on bare metal and on the host, needs no
//! allocator, and can be constructed in a `const` context. Critical sections
//! here are a few hundred float operations, so spinning is cheaper than
//! parking a thread.

use core::convert::Infallible;

use fugit::MillisDurationU64;
use spin::{Mutex, MutexGuard};

use crate::time::TimeSource;

/// Lock acquisition gave up after the bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockTimeout {
    /// How long the caller waited (ms)
    pub waited_ms: u64,
}

/// Spin mutex with a bounded-wait acquire
pub struct BoundedLock<T> {
    inner: Mutex<T>,
}

impl<T> BoundedLock<T> {
    /// Wrap a value
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Single non-blocking attempt
    pub fn poll(&self) -> nb::Result<MutexGuard<'_, T>, Infallible> {
        self.inner.try_lock().ok_or(nb::Error::WouldBlock)
    }

    /// Acquire, giving up once `timeout` has elapsed on `clock`
    ///
    /// Always makes at least one attempt, so a zero timeout behaves like
    /// `try_lock`.
    pub fn acquire_within<C: TimeSource + ?Sized>(
        &self,
        clock: &C,
        timeout: MillisDurationU64,
    ) -> Result<MutexGuard<'_, T>, LockTimeout> {
        let start = clock.now();
        loop {
            match self.poll() {
                Ok(guard) => return Ok(guard),
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(never)) => match never {},
            }

            let waited_ms = clock.now().saturating_sub(start);
            if waited_ms >= timeout.ticks() {
                return Err(LockTimeout { waited_ms });
            }
            core::hint::spin_loop();
        }
    }
}
