//! Ingestion: moves bytes landed by RX DMA into the byte queue.

use embedded_hal::delay::DelayNs;

use super::queue::ByteQueue;
use crate::hal::DmaRx;
use crate::internal::dma::{DmaRing, RingCursor};

/// Outcome of one ingestion pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IngestStats {
    /// Bytes moved into the queue
    pub accepted: usize,
    /// Bytes dropped because the queue stayed full
    pub dropped: usize,
}

impl IngestStats {
    /// Whether the pass found no new bytes at all
    #[inline(always)]
    pub const fn is_idle(&self) -> bool {
        self.accepted == 0 && self.dropped == 0
    }
}

/// Producer side of the transport.
///
/// The only writer of the byte queue and the only owner of the ring's read
/// cursor. Not `Clone`: exactly one ingestion path exists per transport.
///
/// The DMA counter cannot tell a full lap from no progress, so a pass must
/// run before `N` bytes land; anything beyond that is overwritten unseen.
pub struct Ingestor<'a, R: DmaRx, const N: usize> {
    rx: R,
    ring: &'a DmaRing<N>,
    queue: &'a ByteQueue<N>,
    cursor: RingCursor<N>,
    push_timeout_ms: u32,
    idle_poll_us: u32,
    dropped: u32,
}

impl<'a, R: DmaRx, const N: usize> Ingestor<'a, R, N> {
    pub(super) fn new(
        rx: R,
        ring: &'a DmaRing<N>,
        queue: &'a ByteQueue<N>,
        push_timeout_ms: u32,
        idle_poll_us: u32,
    ) -> Self {
        Self {
            rx,
            ring,
            queue,
            cursor: RingCursor::new(),
            push_timeout_ms,
            idle_poll_us,
            dropped: 0,
        }
    }

    /// Next unread position in the DMA ring
    #[inline(always)]
    pub fn read_position(&self) -> usize {
        self.cursor.current_index()
    }

    /// Total bytes dropped since the transport was opened
    #[inline(always)]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Bytes the DMA engine has landed that this ingestor has not read yet
    pub fn pending(&self) -> usize {
        let head = N - self.rx.remaining_capacity().min(N);
        self.cursor.pending(head)
    }

    /// One ingestion pass with bounded waits.
    ///
    /// Each new byte gets up to the configured push timeout to find queue
    /// space; on expiry it is dropped and the pass continues. The cursor
    /// advances past every byte either way.
    pub fn poll<D: DelayNs>(&mut self, delay: &mut D) -> IngestStats {
        let timeout_ms = self.push_timeout_ms;
        self.drain(|queue, byte| queue.push(byte, timeout_ms, delay).is_ok())
    }

    /// One ingestion pass that never waits.
    ///
    /// Meant for the DMA half-transfer, transfer-complete or idle-line
    /// interrupt, replacing the polling loop with an event-driven one.
    pub fn on_dma_event(&mut self) -> IngestStats {
        self.drain(|queue, byte| queue.try_push(byte).is_ok())
    }

    /// Run the ingestion loop forever.
    ///
    /// Sleeps for the configured idle interval whenever a pass finds
    /// nothing, instead of spinning on the DMA counter.
    pub fn run<D: DelayNs>(&mut self, mut delay: D) -> ! {
        loop {
            if self.poll(&mut delay).is_idle() {
                delay.delay_us(self.idle_poll_us);
            }
        }
    }

    fn drain<F>(&mut self, mut push: F) -> IngestStats
    where
        F: FnMut(&ByteQueue<N>, u8) -> bool,
    {
        let mut stats = IngestStats::default();
        let available = self.pending();

        for _ in 0..available {
            let byte = self.ring.read(self.cursor.current_index());
            if push(self.queue, byte) {
                stats.accepted += 1;
            } else {
                stats.dropped += 1;
            }
            self.cursor.advance();
        }

        if stats.dropped > 0 {
            self.dropped = self.dropped.saturating_add(stats.dropped as u32);
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "ingest: queue full, dropped {} byte(s) ({} total)",
                stats.dropped,
                self.dropped
            );
        }

        stats
    }
}

// =============================================================================
// Tests
// =============================================================================
