//! Feed loop: drains the receive queue into the stack.

use embedded_hal::delay::DelayNs;

use super::PppLink;
use crate::config::BridgeConfig;
use crate::internal::constants::DEFAULT_FEED_CHUNK;
use crate::transport::Receiver;

/// Pumps received bytes into [`PppLink::feed`].
///
/// Owns the only [`Receiver`], so exactly one call path drains the queue.
/// Each poll forwards whatever was queued as a single chunk of at most
/// `CHUNK` bytes.
pub struct FeedLoop<'a, L: PppLink, D: DelayNs, const N: usize, const CHUNK: usize = { DEFAULT_FEED_CHUNK }> {
    receiver: Receiver<'a, N>,
    link: L,
    delay: D,
    interval_ms: u32,
    scratch: [u8; CHUNK],
}

impl<'a, L: PppLink, D: DelayNs, const N: usize, const CHUNK: usize> FeedLoop<'a, L, D, N, CHUNK> {
    /// Create a feed loop sleeping `config.feed_interval_ms` between polls
    pub fn new(receiver: Receiver<'a, N>, link: L, delay: D, config: &BridgeConfig) -> Self {
        Self {
            receiver,
            link,
            delay,
            interval_ms: config.feed_interval_ms,
            scratch: [0; CHUNK],
        }
    }

    /// One receive and at most one feed call, without sleeping.
    ///
    /// Returns the number of bytes forwarded.
    pub fn poll_once(&mut self) -> usize {
        let len = self.receiver.recv(&mut self.scratch, &mut self.delay);
        if len > 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("ppp: feed {} bytes", len);

            self.link.feed(&self.scratch[..len]);
        }
        len
    }

    /// Poll forever, sleeping the feed interval after every poll
    pub fn run(mut self) -> ! {
        loop {
            self.poll_once();
            self.delay.delay_ms(self.interval_ms);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
