//! Transmit API: blocking DMA transmit with half-duplex tolerance.

use embedded_hal::delay::DelayNs;

use crate::error::{TransportError, TransportResult};
use crate::hal::{DmaTx, TxState};

/// Transmit side of the transport.
pub struct Sender<T: DmaTx> {
    tx: T,
    poll_interval_ms: u32,
    timeout_ms: Option<u32>,
}

impl<T: DmaTx> Sender<T> {
    pub(crate) fn new(tx: T, poll_interval_ms: u32, timeout_ms: Option<u32>) -> Self {
        Self {
            tx,
            poll_interval_ms,
            timeout_ms,
        }
    }

    /// Current transmitter state
    #[inline]
    pub fn state(&self) -> TxState {
        self.tx.transmit_state()
    }

    /// Transmit `data` and wait until the transmitter lets go of it.
    ///
    /// Waits while the driver reports [`TxState::Busy`]; both
    /// [`TxState::Ready`] and [`TxState::BusyReceiving`] end the wait, so an
    /// inbound transfer in progress never stalls an outbound one.
    ///
    /// # Errors
    ///
    /// - [`TransportError::TransmitFailed`] if the engine refused the request
    ///   (typically a prior outbound transfer still active). Returned
    ///   immediately; retrying is the caller's decision.
    /// - [`TransportError::TransmitTimeout`] if a ceiling is configured and
    ///   the transfer outlives it.
    pub fn send<D: DelayNs>(&mut self, data: &[u8], delay: &mut D) -> TransportResult<()> {
        self.tx.start_transmit(data)?;

        let mut elapsed = 0u32;
        while !self.tx.transmit_state().is_tx_idle() {
            if self.timeout_ms.is_some_and(|timeout| elapsed >= timeout) {
                return Err(TransportError::TransmitTimeout);
            }
            delay.delay_ms(self.poll_interval_ms);
            elapsed = elapsed.saturating_add(self.poll_interval_ms.max(1));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
