//! Time sources for bounded waits
//!
//! The engine only needs a monotonic millisecond counter to bound how long
//! it spins on its lock. Sources:
//! - Host monotonic clock (`std`)
//! - Any closure returning milliseconds (hardware timer, RTOS tick, test)

/// Timestamp in milliseconds since an arbitrary fixed point (usually boot)
pub type Timestamp = u64;

/// Source of monotonic time
pub trait TimeSource {
    /// Current timestamp in milliseconds; must never go backwards
    fn now(&self) -> Timestamp;
}

/// Closures are time sources, so a hardware timer can be wired in directly:
///
/// ```rust
/// use iaqguard_core::TimeSource;
///
/// let ticks = || 1_500u64;
/// assert_eq!(ticks.now(), 1_500);
/// ```
impl<F> TimeSource for F
where
    F: Fn() -> Timestamp,
{
    fn now(&self) -> Timestamp {
        self()
    }
}

/// Host monotonic clock (requires std)
///
/// Counts milliseconds since the clock was created.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}
