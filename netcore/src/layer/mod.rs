//! The process logic of protocol layers.
//!
//! ## Layering
//!
//! Each protocol layer is split into two parts; the packet logic contained in `wire` and the
//! processing part in this module. The state of a layer (a neighbor cache, a routing table) is
//! open to modification by the user program between calls, similar to reconfiguration on the OS
//! level with utilities such as `arp` or `ip route`.
//!
//! * [`arp`] keeps the mapping from IPv4 next hops to hardware addresses, and the requests that
//!   are still waiting for an answer.
//! * [`eth`] contains the Ethernet interface. It turns outgoing datagrams into frames, resolving
//!   their next hop on the way, and incoming frames into datagrams.
//! * [`ip`] contains the routing table and a router that forwards datagrams between several
//!   interfaces.
//!
//! ## Errors
//!
//! The data path does not fail. Frames that can not be parsed, datagrams without a route and
//! datagrams whose time to live ran out are dropped, which is what any link might do to them as
//! well. Only reconfiguration reports an [`Error`].
//!
//! [`arp`]: arp/index.html
//! [`eth`]: eth/index.html
//! [`ip`]: ip/index.html
//! [`Error`]: enum.Error.html
use core::fmt;

pub mod arp;
pub mod eth;
pub mod ip;

/// The result type of reconfiguring a layer.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by layer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The operation was not permitted.
    ///
    /// Returned for arguments outside their domain, such as a prefix length larger than the
    /// address or an interface index that does not exist.
    Illegal,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Illegal => write!(f, "illegal operation"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

