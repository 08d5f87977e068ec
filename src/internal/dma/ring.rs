//! Circular DMA receive buffer and its software read cursor.

use core::cell::UnsafeCell;

/// Fixed-capacity byte region written by the RX DMA engine.
///
/// The CPU only ever reads it, through volatile loads, so the region can be
/// shared by reference while the engine writes behind the compiler's back.
pub struct DmaRing<const N: usize> {
    buffer: UnsafeCell<[u8; N]>,
}

impl<const N: usize> DmaRing<N> {
    /// Create a zeroed ring (const, suitable for static initialization)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: UnsafeCell::new([0; N]),
        }
    }

    /// Base address handed to the DMA engine
    #[inline(always)]
    pub fn dma_ptr(&self) -> *mut u8 {
        self.buffer.get().cast()
    }

    /// Read the byte at `index` (wrapped into the ring)
    #[inline(always)]
    pub fn read(&self, index: usize) -> u8 {
        // SAFETY: index is reduced modulo N so the pointer stays inside the
        // array; volatile because the DMA engine writes without the CPU.
        unsafe { core::ptr::read_volatile(self.dma_ptr().add(index % N)) }
    }
}

impl<const N: usize> Default for DmaRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: the CPU side only performs volatile reads; the sole writer is the
// DMA engine, which is outside the Rust memory model.
unsafe impl<const N: usize> Sync for DmaRing<N> {}

/// Read cursor into a [`DmaRing`] with wraparound index.
///
/// Always in `[0, N)`; names the next unread position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RingCursor<const N: usize> {
    current: usize,
}

impl<const N: usize> RingCursor<N> {
    /// Create a cursor at position 0
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// Get the current index
    #[inline(always)]
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Advance the current index by one, wrapping around
    #[inline(always)]
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % N;
    }

    /// Bytes between the cursor and the DMA write head.
    ///
    /// `head` is `N - remaining_capacity`. A head of `N` (counter read as 0
    /// just before reload) is the same position as 0.
    #[inline(always)]
    #[must_use]
    pub const fn pending(&self, head: usize) -> usize {
        (head % N + N - self.current) % N
    }
}

// =============================================================================
// Tests
// =============================================================================
