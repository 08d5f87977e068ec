//! Centralized Constants
//!
//! Single source of truth for the sizes, timeouts and polling intervals used
//! by the transport and the link supervisor.
//!
//! # Organization
//!
//! - **Buffer sizes**: DMA ring and feed scratch dimensions
//! - **Transport timing**: queue push/pop timeouts, TX completion polling
//! - **Link timing**: feed interval, connect wait ceiling
//! - **Protocol glue**: output adapter error code, observer slots
//!
//! All timing values are in the unit named by the suffix and are applied
//! through `embedded_hal::delay::DelayNs`.

// =============================================================================
// Buffer Sizes
// =============================================================================

/// Default DMA ring (and byte queue) capacity in bytes
pub const DEFAULT_RING_SIZE: usize = 200;

/// Default scratch buffer size for one feed-loop poll
pub const DEFAULT_FEED_CHUNK: usize = 2048;

// =============================================================================
// Transport Timing
// =============================================================================

/// How long the ingestion loop waits for queue space before dropping a byte
pub const RX_PUSH_TIMEOUT_MS: u32 = 100;

/// How long `recv` waits for each byte it already saw queued
pub const RX_POP_TIMEOUT_MS: u32 = 100;

/// Granularity of the queue's bounded waits in microseconds
pub const QUEUE_POLL_INTERVAL_US: u32 = 1_000;

/// Sleep between transmit-state checks while a send is in flight
pub const TX_POLL_INTERVAL_MS: u32 = 1;

/// Sleep between ingestion passes that found no new bytes
pub const INGEST_IDLE_POLL_US: u32 = 100;

// =============================================================================
// Link Timing
// =============================================================================

/// Sleep after every feed-loop poll (bounds added receive latency)
pub const FEED_INTERVAL_MS: u32 = 10;

/// Number of phase checks while waiting for the link to come up
pub const CONNECT_ATTEMPTS: u32 = 40;

/// Sleep before each phase check (40 x 500 ms = 20 s ceiling)
pub const CONNECT_POLL_INTERVAL_MS: u32 = 500;

/// Holdoff passed to the stack's connect request, in seconds
pub const CONNECT_HOLDOFF_S: u16 = 0;

// =============================================================================
// Protocol Glue
// =============================================================================

/// Value returned to the stack by the output adapter when a send fails.
///
/// The stack treats any return value other than the requested length as a
/// failed write. A failed write of exactly this many bytes returns 0 instead.
pub const OUTPUT_ERROR_CODE: u32 = 0x05;

/// Maximum number of link status observers
pub const MAX_OBSERVERS: usize = 4;

// =============================================================================
// Tests
// =============================================================================
