//! Link status codes and PPP phases reported by the protocol stack.

use core::net::Ipv4Addr;

// =============================================================================
// Link Status
// =============================================================================

/// Link status reported through the stack's status callback
///
/// Codes follow the lwIP `PPPERR_*` numbering. Unknown codes are kept
/// rather than rejected so newer stack revisions still report something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// No error: the link is up
    None,
    /// Invalid parameter
    Param,
    /// Unable to open the PPP session
    OpenFailed,
    /// Invalid I/O device for PPP
    DeviceError,
    /// Unable to allocate resources
    AllocFailed,
    /// User interrupt
    UserAbort,
    /// Connection lost
    ConnectLost,
    /// Failed authentication challenge
    AuthFailed,
    /// Failed to meet protocol
    ProtocolFailed,
    /// Peer stopped answering echo requests
    PeerDead,
    /// Idle timeout
    IdleTimeout,
    /// Maximum connect time reached
    ConnectTimeout,
    /// Loopback detected
    LoopbackDetected,
    /// Code this crate does not know
    Unknown(i32),
}

impl LinkStatus {
    /// Map a raw status code
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => LinkStatus::None,
            1 => LinkStatus::Param,
            2 => LinkStatus::OpenFailed,
            3 => LinkStatus::DeviceError,
            4 => LinkStatus::AllocFailed,
            5 => LinkStatus::UserAbort,
            6 => LinkStatus::ConnectLost,
            7 => LinkStatus::AuthFailed,
            8 => LinkStatus::ProtocolFailed,
            9 => LinkStatus::PeerDead,
            10 => LinkStatus::IdleTimeout,
            11 => LinkStatus::ConnectTimeout,
            12 => LinkStatus::LoopbackDetected,
            other => LinkStatus::Unknown(other),
        }
    }

    /// Raw status code
    pub const fn code(self) -> i32 {
        match self {
            LinkStatus::None => 0,
            LinkStatus::Param => 1,
            LinkStatus::OpenFailed => 2,
            LinkStatus::DeviceError => 3,
            LinkStatus::AllocFailed => 4,
            LinkStatus::UserAbort => 5,
            LinkStatus::ConnectLost => 6,
            LinkStatus::AuthFailed => 7,
            LinkStatus::ProtocolFailed => 8,
            LinkStatus::PeerDead => 9,
            LinkStatus::IdleTimeout => 10,
            LinkStatus::ConnectTimeout => 11,
            LinkStatus::LoopbackDetected => 12,
            LinkStatus::Unknown(code) => code,
        }
    }

    /// Whether this status reports a failure (anything but [`LinkStatus::None`])
    #[inline(always)]
    pub const fn is_error(self) -> bool {
        !matches!(self, LinkStatus::None)
    }

    /// Returns a human-readable description
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::None => "link up",
            LinkStatus::Param => "invalid parameter",
            LinkStatus::OpenFailed => "unable to open PPP session",
            LinkStatus::DeviceError => "invalid I/O device",
            LinkStatus::AllocFailed => "unable to allocate resources",
            LinkStatus::UserAbort => "user interrupt",
            LinkStatus::ConnectLost => "connection lost",
            LinkStatus::AuthFailed => "authentication failed",
            LinkStatus::ProtocolFailed => "failed to meet protocol",
            LinkStatus::PeerDead => "peer dead",
            LinkStatus::IdleTimeout => "idle timeout",
            LinkStatus::ConnectTimeout => "connect time exceeded",
            LinkStatus::LoopbackDetected => "loopback detected",
            LinkStatus::Unknown(_) => "unknown status",
        }
    }
}

impl core::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinkStatus::Unknown(code) => write!(f, "{} ({code})", self.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

// =============================================================================
// PPP Phase
// =============================================================================

/// Internal phase of the PPP state machine, in lwIP order.
///
/// Ordered so that `phase >= PppPhase::Running` reads like the stack's own
/// "link is up" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PppPhase {
    /// Session torn down or never opened
    #[default]
    Dead = 0,
    /// Multilink master
    Master = 1,
    /// Waiting out the connect holdoff
    Holdoff = 2,
    /// Initializing
    Initialize = 3,
    /// Serial connection being established
    SerialConn = 4,
    /// Dormant (demand dialing)
    Dormant = 5,
    /// LCP negotiation
    Establish = 6,
    /// Authentication
    Authenticate = 7,
    /// Callback control
    Callback = 8,
    /// Network control protocols (IPCP)
    Network = 9,
    /// Link up, IP traffic flowing
    Running = 10,
    /// Terminating
    Terminate = 11,
    /// Disconnecting
    Disconnect = 12,
}

impl PppPhase {
    /// Map a raw phase value; unknown values read as [`PppPhase::Dead`]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            1 => PppPhase::Master,
            2 => PppPhase::Holdoff,
            3 => PppPhase::Initialize,
            4 => PppPhase::SerialConn,
            5 => PppPhase::Dormant,
            6 => PppPhase::Establish,
            7 => PppPhase::Authenticate,
            8 => PppPhase::Callback,
            9 => PppPhase::Network,
            10 => PppPhase::Running,
            11 => PppPhase::Terminate,
            12 => PppPhase::Disconnect,
            _ => PppPhase::Dead,
        }
    }

    /// Whether the stack has reached (or passed) the running phase
    #[inline(always)]
    pub fn is_running(self) -> bool {
        self >= PppPhase::Running
    }
}

// =============================================================================
// Link Addresses
// =============================================================================

/// IPv4 parameters negotiated by IPCP, reported when the link comes up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAddresses {
    /// Our address
    pub local: Ipv4Addr,
    /// Peer (gateway) address
    pub peer: Ipv4Addr,
    /// Netmask
    pub netmask: Ipv4Addr,
}

impl LinkAddresses {
    /// Create from the three negotiated addresses
    pub const fn new(local: Ipv4Addr, peer: Ipv4Addr, netmask: Ipv4Addr) -> Self {
        Self {
            local,
            peer,
            netmask,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LinkAddresses {
    fn format(&self, f: defmt::Formatter) {
        let (l, p, m) = (self.local.octets(), self.peer.octets(), self.netmask.octets());
        defmt::write!(
            f,
            "local {}.{}.{}.{} peer {}.{}.{}.{} netmask {}.{}.{}.{}",
            l[0], l[1], l[2], l[3], p[0], p[1], p[2], p[3], m[0], m[1], m[2], m[3]
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
