//! Internal DMA buffer management.
//!
//! - [`ring`]: circular RX buffer written by the UART DMA engine and the
//!   software cursor that tracks what has been consumed

pub(crate) mod ring;

pub(crate) use ring::{DmaRing, RingCursor};
