//! Configuration types for the PPP-over-UART bridge

use crate::internal::constants::{
    CONNECT_ATTEMPTS, CONNECT_HOLDOFF_S, CONNECT_POLL_INTERVAL_MS, FEED_INTERVAL_MS,
    INGEST_IDLE_POLL_US, RX_POP_TIMEOUT_MS, RX_PUSH_TIMEOUT_MS, TX_POLL_INTERVAL_MS,
};

/// Complete bridge configuration
///
/// Every delay the transport and supervisor use lives here. Defaults match
/// the values the bridge was tuned with on the sensor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Ingestion push timeout; a byte is dropped once this expires
    pub push_timeout_ms: u32,
    /// Per-byte pop timeout used by `recv`
    pub pop_timeout_ms: u32,
    /// Sleep between transmit-state checks
    pub tx_poll_interval_ms: u32,
    /// Optional ceiling on waiting for transmit completion (`None` = unbounded)
    pub tx_timeout_ms: Option<u32>,
    /// Sleep between ingestion passes that found nothing new
    pub ingest_idle_poll_us: u32,
    /// Sleep after every feed-loop poll
    pub feed_interval_ms: u32,
    /// Number of phase checks in the connect wait
    pub connect_attempts: u32,
    /// Sleep before each phase check
    pub connect_poll_interval_ms: u32,
    /// Holdoff handed to the stack's connect request, in seconds
    pub connect_holdoff_s: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            push_timeout_ms: RX_PUSH_TIMEOUT_MS,
            pop_timeout_ms: RX_POP_TIMEOUT_MS,
            tx_poll_interval_ms: TX_POLL_INTERVAL_MS,
            tx_timeout_ms: None,
            ingest_idle_poll_us: INGEST_IDLE_POLL_US,
            feed_interval_ms: FEED_INTERVAL_MS,
            connect_attempts: CONNECT_ATTEMPTS,
            connect_poll_interval_ms: CONNECT_POLL_INTERVAL_MS,
            connect_holdoff_s: CONNECT_HOLDOFF_S,
        }
    }

    /// Upper bound of the connect wait in milliseconds
    #[must_use]
    pub const fn connect_ceiling_ms(&self) -> u64 {
        self.connect_attempts as u64 * self.connect_poll_interval_ms as u64
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the ingestion push timeout
    #[must_use]
    pub const fn with_push_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.push_timeout_ms = timeout_ms;
        self
    }

    /// Set the per-byte pop timeout
    #[must_use]
    pub const fn with_pop_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.pop_timeout_ms = timeout_ms;
        self
    }

    /// Set the transmit-state polling interval
    #[must_use]
    pub const fn with_tx_poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.tx_poll_interval_ms = interval_ms;
        self
    }

    /// Bound the wait for transmit completion
    #[must_use]
    pub const fn with_tx_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.tx_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the idle sleep between empty ingestion passes
    #[must_use]
    pub const fn with_ingest_idle_poll_us(mut self, interval_us: u32) -> Self {
        self.ingest_idle_poll_us = interval_us;
        self
    }

    /// Set the feed-loop interval
    #[must_use]
    pub const fn with_feed_interval_ms(mut self, interval_ms: u32) -> Self {
        self.feed_interval_ms = interval_ms;
        self
    }

    /// Set the connect wait as `attempts` checks spaced `interval_ms` apart
    #[must_use]
    pub const fn with_connect_wait(mut self, attempts: u32, interval_ms: u32) -> Self {
        self.connect_attempts = attempts;
        self.connect_poll_interval_ms = interval_ms;
        self
    }

    /// Set the connect holdoff
    #[must_use]
    pub const fn with_connect_holdoff_s(mut self, holdoff_s: u16) -> Self {
        self.connect_holdoff_s = holdoff_s;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
