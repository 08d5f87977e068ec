//! Hardware Abstraction Layer
//!
//! The bridge reaches the UART only through the traits in [`uart`]; board
//! crates implement them over their own HAL. No register access lives here.
//!
//! # Modules
//!
//! - [`uart`]: DMA-driven UART receive and transmit halves
//!
//! # Delay Integration
//!
//! All types that wait use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL or RTOS (e.g., a wrapper
//! around `osDelay` or `embassy_time::Delay`).

pub mod uart;

pub use uart::{DmaRx, DmaTx, TxState};
