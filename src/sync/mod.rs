//! Synchronization Support
//!
//! Interrupt-safe primitives shared by the transport and the link monitor:
//!
//! - [`CriticalSectionCell`]: ISR-safe interior mutability
//! - [`AtomicWaker`]: waker storage for the async receive and link-change paths
//!
//! # Feature Flags
//!
//! - `async`: enables [`AtomicWaker`]
//!
//! # Example
//!
//! ```ignore
//! use ph_pppos_uart::sync::CriticalSectionCell;
//!
//! static OVERRUNS: CriticalSectionCell<u32> = CriticalSectionCell::new(0);
//!
//! #[interrupt]
//! fn UART4() {
//!     OVERRUNS.with(|n| *n += 1);
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
