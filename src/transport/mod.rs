//! Byte transport between a DMA-driven UART and the protocol stack.
//!
//! [`Transport`] owns the circular DMA receive buffer and the bounded byte
//! queue. [`Transport::open`] starts reception and splits it into three
//! parts that can be moved into different execution contexts:
//!
//! - [`Ingestor`]: moves bytes landed by DMA into the queue (task or ISR)
//! - [`Receiver`]: drains the queue for the feed loop
//! - [`Sender`]: blocking DMA transmit for the output adapter
//!
//! ```text
//! UART RX DMA -> DmaRing -> Ingestor -> ByteQueue -> Receiver -> stack feed()
//! stack output -> OutputAdapter -> Sender -> UART TX DMA
//! ```
//!
//! # Example
//!
//! ```ignore
//! static mut TRANSPORT: Transport<200> = Transport::new();
//!
//! let transport = unsafe { &mut *core::ptr::addr_of_mut!(TRANSPORT) };
//! let (mut ingestor, receiver, sender) = transport.open(uart_rx, uart_tx, &config)?;
//!
//! spawner.spawn(move || ingestor.run(delay));
//! ```

mod ingest;
mod queue;
mod rx;
mod tx;

pub use ingest::{IngestStats, Ingestor};
pub use queue::ByteQueue;
pub use rx::Receiver;
pub use tx::Sender;

use crate::config::BridgeConfig;
use crate::error::{TransportError, TransportResult};
use crate::hal::{DmaRx, DmaTx};
use crate::internal::constants::DEFAULT_RING_SIZE;
use crate::internal::dma::DmaRing;

/// Owned transport state: DMA ring plus byte queue of the same capacity.
///
/// Create once (typically in a `static`) and keep for the program lifetime.
pub struct Transport<const N: usize> {
    ring: DmaRing<N>,
    queue: ByteQueue<N>,
}

impl<const N: usize> Transport<N> {
    /// Create a new transport (const, suitable for static initialization)
    pub const fn new() -> Self {
        const { assert!(N > 0, "transport capacity must be non-zero") };
        Self {
            ring: DmaRing::new(),
            queue: ByteQueue::new(),
        }
    }

    /// Ring and queue capacity in bytes
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Start circular DMA reception and split into producer, consumer and
    /// transmit parts.
    ///
    /// The parts borrow the transport, so it cannot be reopened while any of
    /// them is alive.
    ///
    /// # Errors
    ///
    /// [`TransportError::ReceiveStartFailed`] if the DMA engine refused to start.
    pub fn open<R: DmaRx, T: DmaTx>(
        &mut self,
        mut rx: R,
        tx: T,
        config: &BridgeConfig,
    ) -> TransportResult<(Ingestor<'_, R, N>, Receiver<'_, N>, Sender<T>)> {
        while self.queue.try_pop().is_some() {}

        rx.start_receive(self.ring.dma_ptr(), N)
            .map_err(|_| TransportError::ReceiveStartFailed)?;

        #[cfg(feature = "defmt")]
        defmt::info!("transport: DMA reception started ({} byte ring)", N);

        let Self { ring, queue } = self;
        let ring: &DmaRing<N> = ring;
        let queue: &ByteQueue<N> = queue;

        Ok((
            Ingestor::new(
                rx,
                ring,
                queue,
                config.push_timeout_ms,
                config.ingest_idle_poll_us,
            ),
            Receiver::new(queue, config.pop_timeout_ms),
            Sender::new(tx, config.tx_poll_interval_ms, config.tx_timeout_ms),
        ))
    }
}

impl<const N: usize> Default for Transport<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport sized like the sensor node's UART4 link (200 byte ring).
pub type TransportDefault = Transport<DEFAULT_RING_SIZE>;

// =============================================================================
// Tests
// =============================================================================
