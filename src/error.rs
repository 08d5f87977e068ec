//! Error types for the PPP-over-UART bridge
//!
//! Errors are organized by domain for better diagnostics:
//! - [`TransportError`]: DMA, queue and transmit failures on the byte path
//! - [`LinkError`]: connection request and status monitoring failures
//!
//! The unified [`Error`] enum wraps both domain errors. None of these are
//! fatal: the transport drops or reports, it never panics.

use crate::ppp::LinkStatus;

// =============================================================================
// Transport Errors
// =============================================================================

/// Byte-path errors
///
/// These errors occur between the UART DMA engine and the byte queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Queue stayed full for the whole push timeout
    QueueFull,
    /// Queue stayed empty for the whole pop timeout
    QueueEmpty,
    /// The DMA engine refused to start circular reception
    ReceiveStartFailed,
    /// The DMA engine refused the transmit request (prior transfer active)
    TransmitFailed,
    /// Transmission did not complete within the configured ceiling
    TransmitTimeout,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportError::QueueFull => "queue full",
            TransportError::QueueEmpty => "queue empty",
            TransportError::ReceiveStartFailed => "failed to start DMA reception",
            TransportError::TransmitFailed => "failed to start DMA transmission",
            TransportError::TransmitTimeout => "transmission timed out",
        }
    }
}

// =============================================================================
// Link Errors
// =============================================================================

/// Link supervision errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// All observer slots of the link monitor are taken
    TooManyObservers,
    /// The link did not reach the running phase within the connect ceiling
    ConnectTimeout,
    /// The stack refused the connect request or reported a failure status
    LinkFailed(LinkStatus),
}

impl core::fmt::Display for LinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkError::LinkFailed(status) => write!(f, "{}: {status}", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl LinkError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LinkError::TooManyObservers => "too many link observers",
            LinkError::ConnectTimeout => "link did not come up in time",
            LinkError::LinkFailed(_) => "link failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match result {
///     Err(Error::Transport(TransportError::TransmitFailed)) => { /* retry later */ }
///     Err(Error::Link(LinkError::TooManyObservers)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Transport error
    Transport(TransportError),
    /// Link error
    Link(LinkError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport: {e}"),
            Error::Link(e) => write!(f, "link: {e}"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Error::Link(e)
    }
}

/// Result type alias for bridge operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for transport operations
pub type TransportResult<T> = core::result::Result<T, TransportError>;

/// Result type alias for link operations
pub type LinkResult<T> = core::result::Result<T, LinkError>;

// =============================================================================
// Unit Tests
// =============================================================================
