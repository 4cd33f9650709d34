//! The ethernet layer.
//!
//! This is tasked with putting IPv4 datagrams into an Ethernet framing addressed to their next
//! hop, and with taking datagrams out of the frames received from the link. Resolving the next
//! hop to a hardware address is done on the fly with ARP: datagrams towards an unknown neighbor
//! are held back, a request is broadcast, and the datagrams are released once the answer arrives.
//!
//! The [`Interface`] does not own a device. Frames it wants to send are queued and the driver
//! takes them out with [`pop_frame`], frames received by the driver are handed to
//! [`recv_frame`]. Time only moves when the driver calls [`tick`].
//!
//! A [`QueuedInterface`] additionally keeps the datagrams it received, for a router to pick up.
//!
//! [`Interface`]: struct.Interface.html
//! [`QueuedInterface`]: struct.QueuedInterface.html
//! [`pop_frame`]: struct.Interface.html#method.pop_frame
//! [`recv_frame`]: struct.Interface.html#method.recv_frame
//! [`tick`]: struct.Interface.html#method.tick
use crate::layer::arp::NeighborCache;
use crate::time::Duration;

mod interface;
mod queued;

pub use interface::Interface;
pub use queued::QueuedInterface;

/// Timing configuration of an interface.
///
/// The defaults are the usual values for ARP on an Ethernet link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config {
    /// How long a resolved neighbor is remembered after it was last heard from.
    pub entry_lifetime: Duration,

    /// How long to wait for an answer before repeating a request.
    pub request_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            entry_lifetime: NeighborCache::ENTRY_LIFETIME,
            request_interval: NeighborCache::SILENT_TIME,
        }
    }
}
