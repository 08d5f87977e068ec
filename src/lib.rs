//! PPP over UART/DMA Bridge
//!
//! A `no_std`, `no_alloc` byte transport that connects a DMA-driven UART to a
//! point-to-point protocol stack (lwIP `pppos` on the sensor node), plus the
//! supervisory logic that brings the PPP link up and reports its status.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **HAL Layer** ([`hal`]): DMA receive/transmit traits implemented by the board crate
//! 2. **Transport Layer** ([`transport`]): circular DMA ring, byte queue, receive and send
//! 3. **PPP Layer** ([`ppp`]): output adapter, feed loop, link monitor and supervisor
//!
//! ```text
//!            +-----------+   Ingestor   +-----------+  FeedLoop   +-----------+
//!  UART RX ->|  DmaRing  |------------->| ByteQueue |------------>| PppLink   |
//!            +-----------+              +-----------+             |  (stack)  |
//!  UART TX <----------- Sender <----------- OutputAdapter <-------|           |
//!                                                                 +-----------+
//!                                  LinkMonitor <-- status callback ---'
//! ```
//!
//! Byte order is preserved end to end. The only loss path is a full queue:
//! the ingestion loop drops a byte once its push timeout expires and counts it.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for public types
//! - `async`: Enable async receive and link-change futures with wakers
//!
//! # Example
//!
//! ```ignore
//! use ph_pppos_uart::{BridgeConfig, FeedLoop, LinkMonitor, LinkSupervisor, OutputAdapter, Transport};
//!
//! static mut TRANSPORT: Transport<200> = Transport::new();
//! static MONITOR: LinkMonitor = LinkMonitor::new();
//!
//! let config = BridgeConfig::new();
//! let transport = unsafe { &mut *core::ptr::addr_of_mut!(TRANSPORT) };
//! let (ingestor, receiver, sender) = transport.open(uart_rx, uart_tx, &config)?;
//!
//! spawn(move || ingestor.run(Delay));
//! let output = OutputAdapter::new(sender, Delay);
//!
//! // `Lwip` implements `PppStack`; its links are cheap `Clone` handles
//! let (link, outcome) = LinkSupervisor::new(&MONITOR, &config).establish(
//!     &Lwip,
//!     output,
//!     |link| {
//!         let feed = FeedLoop::new(receiver, link.clone(), Delay, &config);
//!         spawn(move || feed.run());
//!     },
//!     &mut Delay,
//! );
//! ```
//!
//! # Memory Requirements
//!
//! With the default 200 byte ring: 400 bytes of transport state (ring plus
//! queue) and a 2 KB feed scratch buffer.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod config;
pub mod error;
pub mod hal;
pub mod ppp;
pub mod sync;
pub mod transport;

// Internal implementation details (pub(crate) only)
mod internal;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::BridgeConfig;
pub use error::{Error, LinkError, LinkResult, Result, TransportError, TransportResult};
pub use hal::{DmaRx, DmaTx, TxState};
pub use ppp::{
    ConnectError, ConnectOutcome, FeedLoop, LinkAddresses, LinkMonitor, LinkStatus,
    LinkSupervisor, OutputAdapter, PppLink, PppPhase, PppStack, StatusSink,
};
pub use transport::{
    ByteQueue, IngestStats, Ingestor, Receiver, Sender, Transport, TransportDefault,
};

#[cfg(feature = "async")]
pub use ppp::LinkChange;

/// Shared bridge constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on bridge types.
pub mod constants {
    pub use crate::internal::constants::{
        // Link timing
        CONNECT_ATTEMPTS,
        CONNECT_HOLDOFF_S,
        CONNECT_POLL_INTERVAL_MS,
        // Sizes
        DEFAULT_FEED_CHUNK,
        DEFAULT_RING_SIZE,
        FEED_INTERVAL_MS,
        // Transport timing
        INGEST_IDLE_POLL_US,
        // Protocol glue
        MAX_OBSERVERS,
        OUTPUT_ERROR_CODE,
        QUEUE_POLL_INTERVAL_US,
        RX_POP_TIMEOUT_MS,
        RX_PUSH_TIMEOUT_MS,
        TX_POLL_INTERVAL_MS,
    };
}
