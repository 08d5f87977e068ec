//! Glue between the byte transport and a PPP protocol stack.
//!
//! The stack itself (lwIP's `pppos` in the sensor node) is an external
//! collaborator. [`PppStack::create`] makes a session handle and
//! [`PppLink`] drives it. In the other direction the stack calls into this
//! crate through the two callbacks bound at creation:
//!
//! - the output callback, served by [`OutputAdapter::output`]
//! - the status callback, served by a [`StatusSink`] (normally [`LinkMonitor`])
//!
//! [`FeedLoop`] pumps received bytes into the stack and [`LinkSupervisor`]
//! brings the link up with a bounded wait.
//!
//! # Example
//!
//! ```ignore
//! static MONITOR: LinkMonitor = LinkMonitor::new();
//!
//! impl<'a> PppStack<'a, UartTx, Delay> for Lwip {
//!     type Link = LwipLink<'a>;
//!
//!     fn create(&self, output: OutputAdapter<UartTx, Delay>, status: &'a dyn StatusSink) -> LwipLink<'a> {
//!         // pppos_create() with trampolines into `output` and `status`
//!         LwipLink::new(output, status)
//!     }
//! }
//!
//! let supervisor = LinkSupervisor::new(&MONITOR, &config);
//! let (link, outcome) = supervisor.establish(&Lwip, output, |link| spawn_feed_task(link), &mut delay);
//! ```

use embedded_hal::delay::DelayNs;

use crate::hal::DmaTx;

mod feed;
mod monitor;
mod output;
mod status;
mod supervisor;

pub use feed::FeedLoop;
pub use monitor::{LinkMonitor, Observer};
#[cfg(feature = "async")]
pub use monitor::LinkChange;
pub use output::OutputAdapter;
pub use status::{LinkAddresses, LinkStatus, PppPhase};
pub use supervisor::{ConnectOutcome, LinkSupervisor};

/// Reason a connect request did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// A session is already open; the request is a no-op
    AlreadyConnected,
    /// The stack refused the request with this error code
    Rejected(i32),
}

/// Operations this crate needs from the PPP stack.
///
/// Methods take `&self`: the feed loop and the supervisor share one stack
/// handle, and the implementation is expected to serialize access the way
/// the stack requires (lwIP's TCPIP core lock, for example).
pub trait PppLink {
    /// Hand received bytes to the stack's input path, in order, in one call
    fn feed(&self, data: &[u8]);

    /// Make this link the default network interface
    fn set_default(&self);

    /// Ask the stack to start negotiating after `holdoff_s` seconds
    fn connect(&self, holdoff_s: u16) -> Result<(), ConnectError>;

    /// Current phase of the PPP state machine
    fn phase(&self) -> PppPhase;
}

impl<L: PppLink + ?Sized> PppLink for &L {
    fn feed(&self, data: &[u8]) {
        (**self).feed(data);
    }

    fn set_default(&self) {
        (**self).set_default();
    }

    fn connect(&self, holdoff_s: u16) -> Result<(), ConnectError> {
        (**self).connect(holdoff_s)
    }

    fn phase(&self) -> PppPhase {
        (**self).phase()
    }
}

/// Factory for PPP session handles.
///
/// `create` corresponds to `pppos_create`: the returned handle sends its
/// outbound bytes through `output` and reports link status to `status` for
/// as long as it lives.
pub trait PppStack<'a, T: DmaTx, D: DelayNs> {
    /// Session handle driven by the supervisor and the feed loop
    type Link: PppLink;

    /// Create a session bound to the output and status callbacks
    fn create(&self, output: OutputAdapter<T, D>, status: &'a dyn StatusSink) -> Self::Link;
}

/// Receiver of the stack's status callback.
pub trait StatusSink {
    /// Raw status code as passed to the callback (0 means the link is up)
    fn on_status(&self, code: i32);

    /// Link came up with these negotiated addresses.
    ///
    /// Call instead of `on_status(0)` when the addresses are at hand.
    fn on_link_up(&self, addresses: LinkAddresses) {
        let _ = addresses;
        self.on_status(LinkStatus::None.code());
    }
}
