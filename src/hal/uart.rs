//! UART DMA engine abstraction
//!
//! The bridge never touches peripheral registers. A board crate implements
//! [`DmaRx`] and [`DmaTx`] on top of its HAL (for STM32 parts typically the
//! UART handle plus its RX/TX DMA streams) and hands both halves to
//! [`Transport::open`](crate::Transport::open).
//!
//! The two halves are separate traits because the ingestion task and the
//! transmit path run concurrently and touch independent hardware directions.

use crate::error::TransportResult;

/// Transmitter state as reported by the UART driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxState {
    /// Peripheral idle in both directions
    Ready,
    /// An outbound transfer is still in progress
    Busy,
    /// Transmitter idle, reception in progress
    ///
    /// With a circular RX DMA this is the steady state once a transmit has
    /// drained, so a sender must accept it as completion.
    BusyReceiving,
}

impl TxState {
    /// Whether the transmitter has finished with the caller's buffer
    #[inline(always)]
    pub const fn is_tx_idle(self) -> bool {
        matches!(self, TxState::Ready | TxState::BusyReceiving)
    }
}

/// Receive half of a UART driven by a circular DMA stream
pub trait DmaRx {
    /// Start circular reception into `buffer[..len]`.
    ///
    /// The DMA engine owns write access to the region from this call on and
    /// wraps back to its start after `len` bytes.
    fn start_receive(&mut self, buffer: *mut u8, len: usize) -> TransportResult<()>;

    /// Bytes left before the DMA engine wraps (the NDTR down-counter).
    ///
    /// Counts down from `len` and reloads to `len` on wrap.
    fn remaining_capacity(&self) -> usize;
}

/// Transmit half of a UART driven by a DMA stream
pub trait DmaTx {
    /// Start transmitting `data`.
    ///
    /// Fails with [`TransportError::TransmitFailed`](crate::TransportError::TransmitFailed)
    /// when a previous outbound transfer is still active.
    fn start_transmit(&mut self, data: &[u8]) -> TransportResult<()>;

    /// Current transmitter state
    fn transmit_state(&self) -> TxState;
}

impl<T: DmaRx + ?Sized> DmaRx for &mut T {
    fn start_receive(&mut self, buffer: *mut u8, len: usize) -> TransportResult<()> {
        T::start_receive(self, buffer, len)
    }

    fn remaining_capacity(&self) -> usize {
        T::remaining_capacity(self)
    }
}

impl<T: DmaTx + ?Sized> DmaTx for &mut T {
    fn start_transmit(&mut self, data: &[u8]) -> TransportResult<()> {
        T::start_transmit(self, data)
    }

    fn transmit_state(&self) -> TxState {
        T::transmit_state(self)
    }
}
