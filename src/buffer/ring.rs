//! Fixed-capacity circular byte queue.
//!
//! The producer appends at the tail, the consumer removes from the head.
//! No locking happens here; callers provide the exclusion (see
//! [`crate::sync`]).

/// Circular byte buffer over caller-supplied storage.
///
/// The capacity is the length of the storage slice and never changes.
/// A full buffer rejects further bytes; nothing already queued is
/// overwritten.
#[derive(Debug)]
pub struct RingBuffer<'a> {
    /// Backing storage
    storage: &'a mut [u8],
    /// Read index
    head: usize,
    /// Write index
    tail: usize,
    /// Number of valid bytes
    len: usize,
}

impl<'a> RingBuffer<'a> {
    /// Create an empty ring buffer over `storage`.
    #[must_use]
    pub const fn new(storage: &'a mut [u8]) -> Self {
        Self {
            storage,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Create a ring buffer over an externally mapped memory region.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` bytes for `'a`,
    /// and nothing else may access the region while the buffer lives.
    #[must_use]
    pub unsafe fn from_raw_parts(ptr: *mut u8, len: usize) -> Self {
        // SAFETY: caller guarantees the region is valid and exclusively ours
        Self::new(unsafe { core::slice::from_raw_parts_mut(ptr, len) })
    }

    /// Total number of bytes the buffer can hold
    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of bytes currently queued
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Alias for [`len`](Self::len)
    #[inline(always)]
    #[must_use]
    pub const fn occupancy(&self) -> usize {
        self.len
    }

    /// Check if no bytes are queued
    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if the buffer is at capacity
    #[inline(always)]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Number of bytes that can still be appended
    #[inline(always)]
    #[must_use]
    pub fn free(&self) -> usize {
        self.capacity() - self.len
    }

    /// Append a byte at the tail.
    ///
    /// Returns `false` and leaves the buffer untouched when it is full.
    pub fn push_back(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.storage[self.tail] = byte;
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
        true
    }

    /// Remove and return the oldest byte, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.storage[self.head];
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        Some(byte)
    }

    /// Peek at the byte `index` positions after the head.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        if index >= self.len {
            return None;
        }
        Some(self.storage[(self.head + index) % self.capacity()])
    }

    /// Discard up to `count` bytes from the head.
    ///
    /// Discarding everything (or more) is equivalent to [`flush`](Self::flush).
    pub fn dump_front(&mut self, count: usize) {
        if count >= self.len {
            self.flush();
        } else {
            self.head = (self.head + count) % self.capacity();
            self.len -= count;
        }
    }

    /// Discard all queued bytes.
    pub fn flush(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

// =============================================================================
// Tests
// =============================================================================
