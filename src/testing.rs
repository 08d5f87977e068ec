//! Testing utilities and mock implementations
//!
//! Mocks for the UART DMA halves, the PPP stack and the delay provider, so
//! the bridge can be exercised on the host without hardware.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, AtomicPtr, AtomicUsize, Ordering};
use core::task::{Context, Poll, Waker};
use std::boxed::Box;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::task::Wake;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::error::{TransportError, TransportResult};
use crate::hal::{DmaRx, DmaTx, TxState};
use crate::internal::constants::TX_POLL_INTERVAL_MS;
use crate::ppp::{ConnectError, OutputAdapter, PppLink, PppPhase, PppStack, StatusSink};
use crate::transport::Sender;

// =============================================================================
// Delays
// =============================================================================

/// Delay that records requested time instead of sleeping
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: Cell<u64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total requested delay in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    /// Total requested delay in whole milliseconds
    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }

    pub fn reset(&self) {
        self.total_ns.set(0);
    }

    fn add(&self, ns: u64) {
        self.total_ns.set(self.total_ns.get() + ns);
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.add(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.add(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.add(u64::from(ms) * 1_000_000);
    }
}

impl DelayNs for &MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.add(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.add(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.add(u64::from(ms) * 1_000_000);
    }
}

/// Delay that really sleeps, for threaded tests
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

// =============================================================================
// Mock DMA Receive
// =============================================================================

const NO_OVERRIDE: usize = usize::MAX;

#[derive(Debug)]
struct RxShared {
    buffer: AtomicPtr<u8>,
    len: AtomicUsize,
    started: AtomicBool,
    write_pos: AtomicUsize,
    remaining_override: AtomicUsize,
}

/// Simulated circular DMA receive channel
///
/// Bytes are written into the buffer handed to `start_receive` through a
/// [`MockDmaHandle`], and the remaining-count register follows them the way
/// circular-mode hardware does (reloading to the full length on wrap).
#[derive(Debug)]
pub struct MockDmaRx {
    shared: Arc<RxShared>,
    fail: bool,
}

impl MockDmaRx {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(RxShared {
                buffer: AtomicPtr::new(core::ptr::null_mut()),
                len: AtomicUsize::new(0),
                started: AtomicBool::new(false),
                write_pos: AtomicUsize::new(0),
                remaining_override: AtomicUsize::new(NO_OVERRIDE),
            }),
            fail: false,
        }
    }

    /// Refuse to start reception
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Handle playing the DMA engine's role
    pub fn handle(&self) -> MockDmaHandle {
        MockDmaHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for MockDmaRx {
    fn default() -> Self {
        Self::new()
    }
}

impl DmaRx for MockDmaRx {
    fn start_receive(&mut self, buffer: *mut u8, len: usize) -> TransportResult<()> {
        if self.fail {
            return Err(TransportError::ReceiveStartFailed);
        }
        self.shared.buffer.store(buffer, Ordering::SeqCst);
        self.shared.len.store(len, Ordering::SeqCst);
        self.shared.write_pos.store(0, Ordering::SeqCst);
        self.shared.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn remaining_capacity(&self) -> usize {
        let overridden = self.shared.remaining_override.load(Ordering::SeqCst);
        if overridden != NO_OVERRIDE {
            return overridden;
        }
        let len = self.shared.len.load(Ordering::SeqCst);
        if len == 0 {
            return 0;
        }
        len - self.shared.write_pos.load(Ordering::SeqCst) % len
    }
}

/// Writes bytes into the ring the way the DMA engine would
#[derive(Debug, Clone)]
pub struct MockDmaHandle {
    shared: Arc<RxShared>,
}

impl MockDmaHandle {
    /// Land `bytes` at the current write position, wrapping around the ring
    pub fn deposit(&self, bytes: &[u8]) {
        let ptr = self.shared.buffer.load(Ordering::SeqCst);
        let len = self.shared.len.load(Ordering::SeqCst);
        assert!(!ptr.is_null() && len > 0, "reception not started");

        let pos = self.shared.write_pos.load(Ordering::SeqCst);
        for (i, &byte) in bytes.iter().enumerate() {
            // SAFETY: index is reduced modulo the length given to start_receive
            unsafe { ptr.add((pos + i) % len).write_volatile(byte) };
        }
        self.shared.write_pos.store(pos + bytes.len(), Ordering::SeqCst);
        self.shared.remaining_override.store(NO_OVERRIDE, Ordering::SeqCst);
    }

    /// Force the remaining-count register to read `remaining` until the next deposit
    pub fn set_remaining(&self, remaining: usize) {
        self.shared.remaining_override.store(remaining, Ordering::SeqCst);
    }

    /// Length passed to `start_receive`, if reception was started
    pub fn started_len(&self) -> Option<usize> {
        self.shared
            .started
            .load(Ordering::SeqCst)
            .then(|| self.shared.len.load(Ordering::SeqCst))
    }
}

// =============================================================================
// Mock DMA Transmit
// =============================================================================

#[derive(Debug)]
struct TxInner {
    script: VecDeque<TxState>,
    idle_state: TxState,
    fail: bool,
    transmitted: Vec<Vec<u8>>,
}

/// Transmit channel with a scripted state sequence
///
/// Each `transmit_state` call consumes one scripted state; once the script
/// runs out the idle state (default [`TxState::Ready`]) is reported. Clones
/// share state, so a test can keep one and hand the other to a `Sender`.
#[derive(Debug, Clone)]
pub struct MockDmaTx {
    inner: Rc<RefCell<TxInner>>,
}

impl MockDmaTx {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(TxInner {
                script: VecDeque::new(),
                idle_state: TxState::Ready,
                fail: false,
                transmitted: Vec::new(),
            })),
        }
    }

    pub fn with_states(self, states: &[TxState]) -> Self {
        self.inner.borrow_mut().script.extend(states.iter().copied());
        self
    }

    pub fn with_idle_state(self, state: TxState) -> Self {
        self.inner.borrow_mut().idle_state = state;
        self
    }

    /// Refuse every transmit request
    pub fn failing(self) -> Self {
        self.inner.borrow_mut().fail = true;
        self
    }

    /// Payloads accepted so far
    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().transmitted.clone()
    }
}

impl Default for MockDmaTx {
    fn default() -> Self {
        Self::new()
    }
}

impl DmaTx for MockDmaTx {
    fn start_transmit(&mut self, data: &[u8]) -> TransportResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail {
            return Err(TransportError::TransmitFailed);
        }
        inner.transmitted.push(data.to_vec());
        Ok(())
    }

    fn transmit_state(&self) -> TxState {
        let mut inner = self.inner.borrow_mut();
        let idle = inner.idle_state;
        inner.script.pop_front().unwrap_or(idle)
    }
}

/// Sender with default polling and no timeout
pub fn sender<T: DmaTx>(tx: T) -> Sender<T> {
    Sender::new(tx, TX_POLL_INTERVAL_MS, None)
}

// =============================================================================
// Mock PPP Stack
// =============================================================================

/// PPP stack double: records feeds and connect calls, scripts phases
pub struct MockPppLink<'a> {
    fed: RefCell<Vec<Vec<u8>>>,
    phases: RefCell<VecDeque<PppPhase>>,
    idle_phase: Cell<PppPhase>,
    phase_polls: Cell<usize>,
    connect_result: Cell<Result<(), ConnectError>>,
    connect_calls: Cell<usize>,
    set_default_calls: Cell<usize>,
    last_holdoff: Cell<Option<u16>>,
    on_connect: RefCell<Option<Box<dyn FnOnce() + 'a>>>,
}

impl<'a> MockPppLink<'a> {
    pub fn new() -> Self {
        Self {
            fed: RefCell::new(Vec::new()),
            phases: RefCell::new(VecDeque::new()),
            idle_phase: Cell::new(PppPhase::Dead),
            phase_polls: Cell::new(0),
            connect_result: Cell::new(Ok(())),
            connect_calls: Cell::new(0),
            set_default_calls: Cell::new(0),
            last_holdoff: Cell::new(None),
            on_connect: RefCell::new(None),
        }
    }

    /// Report `phase` on every poll
    pub fn with_phase(self, phase: PppPhase) -> Self {
        self.idle_phase.set(phase);
        self
    }

    /// Report `phases` one per poll, then keep reporting the last one
    pub fn with_phases(self, phases: &[PppPhase]) -> Self {
        self.phases.borrow_mut().extend(phases.iter().copied());
        if let Some(&last) = phases.last() {
            self.idle_phase.set(last);
        }
        self
    }

    pub fn with_connect_result(self, result: Result<(), ConnectError>) -> Self {
        self.connect_result.set(result);
        self
    }

    /// Run `hook` inside the connect request, like a stack reporting status synchronously
    pub fn on_connect(self, hook: impl FnOnce() + 'a) -> Self {
        *self.on_connect.borrow_mut() = Some(Box::new(hook));
        self
    }

    pub fn fed(&self) -> Vec<Vec<u8>> {
        self.fed.borrow().clone()
    }

    pub fn phase_polls(&self) -> usize {
        self.phase_polls.get()
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.get()
    }

    pub fn set_default_calls(&self) -> usize {
        self.set_default_calls.get()
    }

    pub fn last_holdoff(&self) -> Option<u16> {
        self.last_holdoff.get()
    }
}

impl Default for MockPppLink<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl PppLink for MockPppLink<'_> {
    fn feed(&self, data: &[u8]) {
        self.fed.borrow_mut().push(data.to_vec());
    }

    fn set_default(&self) {
        self.set_default_calls.set(self.set_default_calls.get() + 1);
    }

    fn connect(&self, holdoff_s: u16) -> Result<(), ConnectError> {
        self.connect_calls.set(self.connect_calls.get() + 1);
        self.last_holdoff.set(Some(holdoff_s));
        let hook = self.on_connect.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        self.connect_result.get()
    }

    fn phase(&self) -> PppPhase {
        self.phase_polls.set(self.phase_polls.get() + 1);
        let next = self.phases.borrow_mut().pop_front();
        next.unwrap_or_else(|| self.idle_phase.get())
    }
}

/// Stack double whose sessions use the callbacks they were created with
#[derive(Debug, Default)]
pub struct MockPppStack {
    created: Cell<usize>,
}

impl MockPppStack {
    /// Frame a session sends when asked to connect (LCP Configure-Request)
    pub const CONFIGURE_REQUEST: [u8; 8] = [0x7E, 0xFF, 0x03, 0xC0, 0x21, 0x01, 0x01, 0x7E];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.created.get()
    }
}

impl<'a, T: DmaTx, D: DelayNs> PppStack<'a, T, D> for MockPppStack {
    type Link = MockStackLink<'a, T, D>;

    fn create(&self, output: OutputAdapter<T, D>, status: &'a dyn StatusSink) -> Self::Link {
        self.created.set(self.created.get() + 1);
        MockStackLink {
            output: RefCell::new(output),
            status,
            phase: Cell::new(PppPhase::Dead),
            fed: RefCell::new(Vec::new()),
        }
    }
}

/// Session created by [`MockPppStack`].
///
/// Connecting sends [`MockPppStack::CONFIGURE_REQUEST`]. If the write goes
/// through the session runs and reports up, otherwise it reports a lost
/// connection.
pub struct MockStackLink<'a, T: DmaTx, D: DelayNs> {
    output: RefCell<OutputAdapter<T, D>>,
    status: &'a dyn StatusSink,
    phase: Cell<PppPhase>,
    fed: RefCell<Vec<Vec<u8>>>,
}

impl<T: DmaTx, D: DelayNs> MockStackLink<'_, T, D> {
    /// Call the output callback as the stack would
    pub fn transmit(&self, data: &[u8]) -> u32 {
        self.output.borrow_mut().output(data)
    }

    /// Call the status callback as the stack would
    pub fn report(&self, code: i32) {
        self.status.on_status(code);
    }

    /// Phase without counting a poll
    pub fn current_phase(&self) -> PppPhase {
        self.phase.get()
    }

    pub fn fed(&self) -> Vec<Vec<u8>> {
        self.fed.borrow().clone()
    }
}

impl<T: DmaTx, D: DelayNs> PppLink for MockStackLink<'_, T, D> {
    fn feed(&self, data: &[u8]) {
        self.fed.borrow_mut().push(data.to_vec());
    }

    fn set_default(&self) {}

    fn connect(&self, _holdoff_s: u16) -> Result<(), ConnectError> {
        let request = MockPppStack::CONFIGURE_REQUEST;
        if self.transmit(&request) == request.len() as u32 {
            self.phase.set(PppPhase::Running);
            self.report(0);
        } else {
            self.report(6);
        }
        Ok(())
    }

    fn phase(&self) -> PppPhase {
        self.phase.get()
    }
}

// =============================================================================
// Wakers and Polling
// =============================================================================

#[derive(Debug, Default)]
struct WakeCount(AtomicUsize);

impl Wake for WakeCount {
    fn wake(self: Arc<Self>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Waker source counting how often it was woken
#[derive(Debug, Default, Clone)]
pub struct WakeCounter {
    inner: Arc<WakeCount>,
}

impl WakeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A waker that increments this counter (clones of it compare `will_wake`-equal)
    pub fn waker(&self) -> Waker {
        Waker::from(Arc::clone(&self.inner))
    }

    pub fn count(&self) -> usize {
        self.inner.0.load(Ordering::SeqCst)
    }
}

/// Poll a future once, `None` while pending
pub fn poll_once<F: Future>(fut: Pin<&mut F>, waker: &Waker) -> Option<F::Output> {
    let mut cx = Context::from_waker(waker);
    match fut.poll(&mut cx) {
        Poll::Ready(output) => Some(output),
        Poll::Pending => None,
    }
}
