//! Receive API: drains whatever the ingestion loop has queued.

use embedded_hal::delay::DelayNs;

use super::queue::ByteQueue;

/// Consumer side of the transport.
///
/// Not `Clone`, and `recv` takes `&mut self`: one call path drains the queue
/// at a time, so a logical message is never split between two consumers.
pub struct Receiver<'a, const N: usize> {
    queue: &'a ByteQueue<N>,
    pop_timeout_ms: u32,
}

impl<'a, const N: usize> Receiver<'a, N> {
    pub(crate) fn new(queue: &'a ByteQueue<N>, pop_timeout_ms: u32) -> Self {
        Self {
            queue,
            pop_timeout_ms,
        }
    }

    /// Bytes currently queued
    #[inline]
    pub fn available(&self) -> usize {
        self.queue.len()
    }

    /// Drain queued bytes into `buf`, oldest first.
    ///
    /// Takes what is there when the call starts (and anything that lands
    /// while draining), up to `buf.len()`. Never waits for more data to
    /// arrive: an empty queue returns 0 immediately, so callers poll.
    pub fn recv<D: DelayNs>(&mut self, buf: &mut [u8], delay: &mut D) -> usize {
        let mut len = 0;
        while len < buf.len() && !self.queue.is_empty() {
            match self.queue.pop(self.pop_timeout_ms, delay) {
                Ok(byte) => {
                    buf[len] = byte;
                    len += 1;
                }
                Err(_) => break,
            }
        }
        len
    }

    /// Wait until at least one byte is queued, then drain like [`recv`](Self::recv).
    #[cfg(feature = "async")]
    pub async fn recv_async(&mut self, buf: &mut [u8]) -> usize {
        use core::future::poll_fn;
        use core::task::Poll;

        if buf.is_empty() {
            return 0;
        }

        poll_fn(|cx| {
            if self.queue.is_empty() {
                self.queue.register_rx_waker(cx.waker());
                // Re-check to close the race with a push between the two calls
                if self.queue.is_empty() {
                    return Poll::Pending;
                }
            }

            let mut len = 0;
            while len < buf.len() {
                match self.queue.try_pop() {
                    Some(byte) => {
                        buf[len] = byte;
                        len += 1;
                    }
                    None => break,
                }
            }
            Poll::Ready(len)
        })
        .await
    }
}

// =============================================================================
// Tests
// =============================================================================
