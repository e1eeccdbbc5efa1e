//! Reusable response-body buffers.
//!
//! [`BufferPool::acquire`] hands out a [`PooledBuffer`] guard. The buffer goes
//! back to the pool when the guard is dropped, so every exit path of a search
//! (success, bad status, read or decode failure, cancellation) releases it.

use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;
use tracing::trace;

/// Buffers that grew beyond this multiple of the pool capacity are discarded
/// instead of being kept alive.
const MAX_RETAINED_FACTOR: usize = 4;

/// Default number of idle buffers kept by a pool.
pub const DEFAULT_MAX_IDLE: usize = 16;

/// A pool of byte buffers shared by concurrent searches.
pub struct BufferPool {
    idle: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
    max_idle: usize,
}

impl BufferPool {
    /// Create a pool whose new buffers start with `capacity` bytes reserved
    /// and which keeps at most `max_idle` buffers around.
    #[must_use]
    pub fn new(capacity: usize, max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            capacity,
            max_idle,
        }
    }

    /// Take a cleared buffer from the pool, allocating one if none is idle.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(self.capacity));
        PooledBuffer { buf, pool: self }
    }

    /// Number of idle buffers currently held.
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, mut buf: Vec<u8>) {
        if buf.capacity() > self.capacity.saturating_mul(MAX_RETAINED_FACTOR) {
            trace!(capacity = buf.capacity(), "dropping oversized response buffer");
            return;
        }
        buf.clear();
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(buf);
        }
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("idle", &self.idle_count())
            .field("capacity", &self.capacity)
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

/// A buffer on loan from a [`BufferPool`].
pub struct PooledBuffer<'a> {
    buf: Vec<u8>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.buf.len())
            .finish_non_exhaustive()
    }
}
