//! Fixed-Size Circular Buffer for Gas Reading History
//!
//! ## Overview
//!
//! Keeps the last `N` compensated gas readings without allocating. The
//! baseline tracker writes every accepted reading here; a reset clears it.
//! Diagnostics read it back to report the recent-window mean.
//!
//! A circular buffer gives constant-time operations over fixed memory:
//! - O(1) insertion (overwrites oldest when full)
//! - O(n) iteration over all readings
//! - Zero heap allocations
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<5> memory layout:
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  ← Array indices
//! └─────┴─────┴─────┴─────┴─────┘
//!    ↑                       ↑
//!    └── write_pos = 0      └── After 5 writes, wraps here
//!
//! Each slot: f32 = 4 bytes, cleared slots hold 0.0
//! Total size = 4 * N + 16 bytes (for write_pos and len)
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use iaqguard_core::buffer::CircularBuffer;
//!
//! let mut history: CircularBuffer<10> = CircularBuffer::new();
//! history.push(182_000.0);
//! history.push(185_500.0);
//!
//! assert_eq!(history.len(), 2);
//! assert_eq!(history.mean(), Some(183_750.0));
//! ```

/// Fixed-size circular buffer of `f32` readings
///
/// ## Internal Invariants
///
/// - `write_pos < N` (next write position is always valid)
/// - `len <= N` (never claim to have more items than capacity)
/// - Items are yielded in chronological order when iterating
///
/// ## Thread Safety
///
/// Not thread-safe on its own; the engine only touches it under its lock.
#[derive(Debug, Clone)]
pub struct CircularBuffer<const N: usize> {
    /// Storage; slots beyond `len` hold 0.0
    data: [f32; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid readings
    len: usize,
}

impl<const N: usize> CircularBuffer<N> {
    /// Creates a new empty circular buffer
    ///
    /// Const, so the buffer can live inside a `static` engine.
    pub const fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds a reading, overwriting the oldest one when full
    pub fn push(&mut self, value: f32) {
        self.data[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Get number of stored readings
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mean of the stored readings
    pub fn mean(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        Some(self.iter().sum::<f32>() / self.len as f32)
    }

    /// Iterate over readings from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Clear all readings and zero the slots
    pub fn clear(&mut self) {
        self.data = [0.0; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Gets a reading by its logical index (0 = oldest, len-1 = newest)
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical view:    [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N] once full
    /// ```
    fn get(&self, index: usize) -> Option<f32> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        Some(self.data[actual_index])
    }
}

/// Iterator over circular buffer contents
pub struct CircularBufferIter<'a, const N: usize> {
    buffer: &'a CircularBuffer<N>,
    index: usize,
}

impl<const N: usize> Iterator for CircularBufferIter<'_, N> {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<const N: usize> Default for CircularBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
