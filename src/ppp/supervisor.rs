//! Link bring-up with a bounded wait.

use embedded_hal::delay::DelayNs;

use super::monitor::LinkMonitor;
use super::output::OutputAdapter;
use super::status::LinkStatus;
use super::{ConnectError, PppLink, PppStack};
use crate::config::BridgeConfig;
use crate::error::{LinkError, LinkResult};
use crate::hal::DmaTx;

/// How a connect attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectOutcome {
    /// The stack reached the running phase
    Connected,
    /// The ceiling passed without the link coming up
    TimedOut,
    /// The request was refused, or the stack reported a failure while waiting
    Failed(LinkStatus),
}

impl ConnectOutcome {
    /// Whether the link came up
    pub const fn is_connected(self) -> bool {
        matches!(self, ConnectOutcome::Connected)
    }

    /// Convert into a result for `?` propagation
    pub const fn into_result(self) -> LinkResult<()> {
        match self {
            ConnectOutcome::Connected => Ok(()),
            ConnectOutcome::TimedOut => Err(LinkError::ConnectTimeout),
            ConnectOutcome::Failed(status) => Err(LinkError::LinkFailed(status)),
        }
    }
}

/// Brings the link up and waits, within a ceiling, for it to run.
///
/// Performs no reconnection: once [`connect`](Self::connect) returns, later
/// failures are only visible through the [`LinkMonitor`].
pub struct LinkSupervisor<'a> {
    monitor: &'a LinkMonitor,
    attempts: u32,
    poll_interval_ms: u32,
    holdoff_s: u16,
}

impl<'a> LinkSupervisor<'a> {
    /// Create a supervisor reading status from `monitor`
    pub fn new(monitor: &'a LinkMonitor, config: &BridgeConfig) -> Self {
        Self {
            monitor,
            attempts: config.connect_attempts,
            poll_interval_ms: config.connect_poll_interval_ms,
            holdoff_s: config.connect_holdoff_s,
        }
    }

    /// Create a session on `stack` and bring it up.
    ///
    /// The session is created with `output` as its output callback and this
    /// supervisor's monitor as its status callback, then handed to
    /// `start_feed` and brought up as in [`connect`](Self::connect). The
    /// handle is returned whatever the outcome, so the caller can retry or
    /// keep it for later use.
    pub fn establish<S, T, D, F, W>(
        &self,
        stack: &S,
        output: OutputAdapter<T, D>,
        start_feed: F,
        delay: &mut W,
    ) -> (S::Link, ConnectOutcome)
    where
        S: PppStack<'a, T, D>,
        T: DmaTx,
        D: DelayNs,
        F: FnOnce(&S::Link),
        W: DelayNs,
    {
        let link = stack.create(output, self.monitor);

        #[cfg(feature = "defmt")]
        defmt::debug!("ppp: session created");

        let outcome = self.connect(&link, || start_feed(&link), delay);
        (link, outcome)
    }

    /// Bring the link up.
    ///
    /// Makes `link` the default interface, calls `start_feed` so received
    /// bytes reach the stack during negotiation, then issues the connect
    /// request and polls the phase up to the configured number of times.
    /// Every poll sleeps first, so the last check lands on the ceiling.
    ///
    /// A failure status reported after the request ends the wait early.
    /// Statuses from before the request are ignored.
    pub fn connect<L, F, D>(&self, link: &L, start_feed: F, delay: &mut D) -> ConnectOutcome
    where
        L: PppLink + ?Sized,
        F: FnOnce(),
        D: DelayNs,
    {
        link.set_default();
        start_feed();

        let since = self.monitor.generation();
        match link.connect(self.holdoff_s) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("ppp: connect requested");
            }
            Err(ConnectError::AlreadyConnected) => {
                #[cfg(feature = "defmt")]
                defmt::info!("ppp: already connected");
            }
            Err(ConnectError::Rejected(code)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ppp: connect rejected ({})", code);
                return ConnectOutcome::Failed(LinkStatus::Unknown(code));
            }
        }

        for _ in 0..self.attempts {
            delay.delay_ms(self.poll_interval_ms);

            if let (generation, Some(status)) = self.monitor.snapshot()
                && generation != since
                && status.is_error()
            {
                #[cfg(feature = "defmt")]
                defmt::warn!("ppp: connect failed: {}", status.as_str());
                return ConnectOutcome::Failed(status);
            }

            if link.phase().is_running() {
                #[cfg(feature = "defmt")]
                defmt::info!("ppp: connected");
                return ConnectOutcome::Connected;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("ppp: link not up after {} ms", self.ceiling_ms());
        ConnectOutcome::TimedOut
    }

    /// Longest time [`connect`](Self::connect) waits, in milliseconds
    pub fn ceiling_ms(&self) -> u64 {
        u64::from(self.attempts) * u64::from(self.poll_interval_ms)
    }
}

// =============================================================================
// Tests
// =============================================================================
