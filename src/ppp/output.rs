//! Output callback: the stack's outbound bytes go to the UART.

use embedded_hal::delay::DelayNs;

use crate::hal::DmaTx;
use crate::internal::constants::OUTPUT_ERROR_CODE;
use crate::transport::Sender;

/// Serves the stack's output callback with a blocking [`Sender`].
///
/// Runs in whatever context the stack calls it from and blocks for the
/// duration of the transmission.
pub struct OutputAdapter<T: DmaTx, D: DelayNs> {
    sender: Sender<T>,
    delay: D,
}

impl<T: DmaTx, D: DelayNs> OutputAdapter<T, D> {
    /// Wrap a sender and the delay it polls with
    pub fn new(sender: Sender<T>, delay: D) -> Self {
        Self { sender, delay }
    }

    /// Transmit `data` on behalf of the stack.
    ///
    /// Returns the number of bytes written (always all of them), 0 for an
    /// empty write, or [`OUTPUT_ERROR_CODE`] if the transmit failed. A
    /// failed write is never reported as its own length: when `data` is
    /// exactly [`OUTPUT_ERROR_CODE`] bytes long the failure returns 0.
    /// Failed writes are not retried here; PPP's own retransmission covers
    /// them.
    pub fn output(&mut self, data: &[u8]) -> u32 {
        if data.is_empty() {
            return 0;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("ppp: output {} bytes", data.len());

        match self.sender.send(data, &mut self.delay) {
            Ok(()) => data.len() as u32,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ppp: output of {} bytes failed: {}", data.len(), _e);
                failure_code(data.len())
            }
        }
    }

    /// The wrapped sender
    pub fn sender(&self) -> &Sender<T> {
        &self.sender
    }
}

fn failure_code(len: usize) -> u32 {
    if len == OUTPUT_ERROR_CODE as usize { 0 } else { OUTPUT_ERROR_CODE }
}

// =============================================================================
// Tests
// =============================================================================
