//! Bounded byte FIFO between the ingestion loop and the receiver.

use embedded_hal::delay::DelayNs;
use heapless::Deque;

use crate::error::{TransportError, TransportResult};
use crate::internal::constants::QUEUE_POLL_INTERVAL_US;
#[cfg(feature = "async")]
use crate::sync::AtomicWaker;
use crate::sync::CriticalSectionCell;

/// Bounded, strictly ordered byte queue.
///
/// Holds at most `N` bytes. Blocking operations poll in
/// [`QUEUE_POLL_INTERVAL_US`] steps and give up after their timeout, so no
/// call waits forever.
pub struct ByteQueue<const N: usize> {
    bytes: CriticalSectionCell<Deque<u8, N>>,
    #[cfg(feature = "async")]
    rx_waker: AtomicWaker,
}

impl<const N: usize> ByteQueue<N> {
    /// Create an empty queue (const, suitable for static initialization)
    pub const fn new() -> Self {
        Self {
            bytes: CriticalSectionCell::new(Deque::new()),
            #[cfg(feature = "async")]
            rx_waker: AtomicWaker::new(),
        }
    }

    /// Maximum number of queued bytes
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Current occupancy
    pub fn len(&self) -> usize {
        self.bytes.with_ref(Deque::len)
    }

    /// Check if no bytes are queued
    pub fn is_empty(&self) -> bool {
        self.bytes.with_ref(Deque::is_empty)
    }

    /// Check if the queue is at capacity
    pub fn is_full(&self) -> bool {
        self.bytes.with_ref(Deque::is_full)
    }

    /// Append a byte without waiting
    pub fn try_push(&self, byte: u8) -> TransportResult<()> {
        self.bytes
            .with(|q| q.push_back(byte))
            .map_err(|_| TransportError::QueueFull)?;

        #[cfg(feature = "async")]
        self.rx_waker.wake();

        Ok(())
    }

    /// Remove the oldest byte without waiting
    pub fn try_pop(&self) -> Option<u8> {
        self.bytes.with(Deque::pop_front)
    }

    /// Append a byte, waiting up to `timeout_ms` for space
    pub fn push<D: DelayNs>(&self, byte: u8, timeout_ms: u32, delay: &mut D) -> TransportResult<()> {
        let timeout_us = timeout_ms.saturating_mul(1_000);
        let mut elapsed = 0u32;
        loop {
            match self.try_push(byte) {
                Ok(()) => return Ok(()),
                Err(e) if elapsed >= timeout_us => return Err(e),
                Err(_) => {}
            }
            delay.delay_us(QUEUE_POLL_INTERVAL_US);
            elapsed = elapsed.saturating_add(QUEUE_POLL_INTERVAL_US);
        }
    }

    /// Remove the oldest byte, waiting up to `timeout_ms` for one to arrive
    pub fn pop<D: DelayNs>(&self, timeout_ms: u32, delay: &mut D) -> TransportResult<u8> {
        let timeout_us = timeout_ms.saturating_mul(1_000);
        let mut elapsed = 0u32;
        loop {
            if let Some(byte) = self.try_pop() {
                return Ok(byte);
            }
            if elapsed >= timeout_us {
                return Err(TransportError::QueueEmpty);
            }
            delay.delay_us(QUEUE_POLL_INTERVAL_US);
            elapsed = elapsed.saturating_add(QUEUE_POLL_INTERVAL_US);
        }
    }

    /// Register the waker woken by the next successful push
    #[cfg(feature = "async")]
    pub(crate) fn register_rx_waker(&self, waker: &core::task::Waker) {
        self.rx_waker.register(waker);
    }
}

impl<const N: usize> Default for ByteQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
