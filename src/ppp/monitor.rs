//! Queryable link state fed by the stack's status callback.

use heapless::Vec;

use super::StatusSink;
use super::status::{LinkAddresses, LinkStatus};
use crate::error::{LinkError, LinkResult};
use crate::internal::constants::MAX_OBSERVERS;
#[cfg(feature = "async")]
use crate::sync::AtomicWaker;
use crate::sync::CriticalSectionCell;

/// Observer callback, invoked with every reported status
pub type Observer = fn(LinkStatus);

struct MonitorState {
    status: Option<LinkStatus>,
    addresses: Option<LinkAddresses>,
    generation: u32,
    observers: Vec<Observer, MAX_OBSERVERS>,
}

/// Latest link status plus change notification.
///
/// Every report through [`StatusSink`] bumps [`generation`](Self::generation),
/// so a reader can tell "reported again" from "unchanged". Observers are
/// called after the state is updated, outside the critical section, in the
/// context of whoever reported the status (usually the stack's thread).
pub struct LinkMonitor {
    state: CriticalSectionCell<MonitorState>,
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl LinkMonitor {
    /// Create a monitor with no status reported yet
    pub const fn new() -> Self {
        Self {
            state: CriticalSectionCell::new(MonitorState {
                status: None,
                addresses: None,
                generation: 0,
                observers: Vec::new(),
            }),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// Last reported status, `None` before the first report
    pub fn status(&self) -> Option<LinkStatus> {
        self.state.with_ref(|s| s.status)
    }

    /// Addresses of the current session, if the link is up
    pub fn addresses(&self) -> Option<LinkAddresses> {
        self.state.with_ref(|s| s.addresses)
    }

    /// Number of reports so far
    pub fn generation(&self) -> u32 {
        self.state.with_ref(|s| s.generation)
    }

    /// Whether the last report said the link is up
    pub fn is_up(&self) -> bool {
        self.status() == Some(LinkStatus::None)
    }

    /// Status and generation read together, consistent with each other
    pub fn snapshot(&self) -> (u32, Option<LinkStatus>) {
        self.state.with_ref(|s| (s.generation, s.status))
    }

    /// Register an observer for every subsequent report.
    ///
    /// # Errors
    ///
    /// [`LinkError::TooManyObservers`] once all slots are taken.
    pub fn subscribe(&self, observer: Observer) -> LinkResult<()> {
        self.state
            .with(|s| s.observers.push(observer))
            .map_err(|_| LinkError::TooManyObservers)
    }

    /// Resolve once a report newer than `since` arrives.
    ///
    /// Yields the new generation and status.
    #[cfg(feature = "async")]
    pub fn wait_for_change(&self, since: u32) -> LinkChange<'_> {
        LinkChange {
            monitor: self,
            since,
        }
    }

    fn record(&self, status: LinkStatus, addresses: Option<LinkAddresses>) {
        let observers = self.state.with(|s| {
            s.status = Some(status);
            // A bare "up" report keeps addresses delivered by on_link_up
            s.addresses = if status.is_error() {
                None
            } else {
                addresses.or(s.addresses)
            };
            s.generation = s.generation.wrapping_add(1);
            s.observers.clone()
        });

        #[cfg(feature = "defmt")]
        if status.is_error() {
            defmt::warn!("ppp: link status {} ({})", status.as_str(), status.code());
        } else {
            defmt::info!("ppp: link up");
        }

        for observer in &observers {
            observer(status);
        }

        #[cfg(feature = "async")]
        self.waker.wake();
    }
}

impl StatusSink for LinkMonitor {
    fn on_status(&self, code: i32) {
        self.record(LinkStatus::from_code(code), None);
    }

    fn on_link_up(&self, addresses: LinkAddresses) {
        #[cfg(feature = "defmt")]
        defmt::info!("ppp: {}", addresses);

        self.record(LinkStatus::None, Some(addresses));
    }
}

impl Default for LinkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`LinkMonitor::wait_for_change`]
#[cfg(feature = "async")]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct LinkChange<'a> {
    monitor: &'a LinkMonitor,
    since: u32,
}

#[cfg(feature = "async")]
impl core::future::Future for LinkChange<'_> {
    type Output = (u32, LinkStatus);

    fn poll(
        self: core::pin::Pin<&mut Self>,
        cx: &mut core::task::Context<'_>,
    ) -> core::task::Poll<Self::Output> {
        use core::task::Poll;

        let (monitor, since) = (self.monitor, self.since);
        let changed = || match monitor.snapshot() {
            (generation, Some(status)) if generation != since => Some((generation, status)),
            _ => None,
        };

        if let Some(change) = changed() {
            return Poll::Ready(change);
        }
        monitor.waker.register(cx.waker());
        match changed() {
            Some(change) => Poll::Ready(change),
            None => Poll::Pending,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
