use alloc::collections::VecDeque;

use super::{Config, Interface};
use crate::layer::arp::NeighborCache;
use crate::time::Instant;
use crate::wire::{EthernetAddress, EthernetFrame, Ipv4Address, Ipv4Datagram};

/// An interface that keeps the datagrams it receives.
///
/// Instead of returning decoded datagrams to the caller of `recv_frame` they are stored in a
/// queue, in arrival order, until someone takes them out. This is the form in which a [`Router`]
/// owns its interfaces.
///
/// [`Router`]: ../ip/struct.Router.html
#[derive(Debug, Clone)]
pub struct QueuedInterface {
    inner: Interface,
    datagrams_in: VecDeque<Ipv4Datagram>,
}

impl QueuedInterface {
    /// Create an interface with the default timing configuration.
    pub fn new(ethernet_addr: EthernetAddress, ip_addr: Ipv4Address) -> Self {
        QueuedInterface::from(Interface::new(ethernet_addr, ip_addr))
    }

    /// Create an interface with a custom timing configuration.
    pub fn with_config(ethernet_addr: EthernetAddress, ip_addr: Ipv4Address, config: Config)
        -> Self
    {
        QueuedInterface::from(Interface::with_config(ethernet_addr, ip_addr, config))
    }

    /// Process a frame received from the link, keeping a contained datagram.
    pub fn recv_frame(&mut self, frame: &EthernetFrame) {
        if let Some(datagram) = self.inner.recv_frame(frame) {
            self.datagrams_in.push_back(datagram);
        }
    }

    /// The received datagrams, oldest first.
    pub fn datagrams_in(&self) -> &VecDeque<Ipv4Datagram> {
        &self.datagrams_in
    }

    /// Take the oldest received datagram.
    pub fn pop_datagram(&mut self) -> Option<Ipv4Datagram> {
        self.datagrams_in.pop_front()
    }

    /// Send an IPv4 datagram towards `next_hop`.
    ///
    /// See [`Interface::send_datagram`](struct.Interface.html#method.send_datagram).
    pub fn send_datagram(&mut self, datagram: Ipv4Datagram, next_hop: Ipv4Address) {
        self.inner.send_datagram(datagram, next_hop)
    }

    /// Advance the clock by `elapsed_ms` milliseconds.
    pub fn tick(&mut self, elapsed_ms: u64) {
        self.inner.tick(elapsed_ms)
    }

    /// Take the oldest frame that is ready for transmission.
    pub fn pop_frame(&mut self) -> Option<EthernetFrame> {
        self.inner.pop_frame()
    }

    /// The frames waiting to be transmitted, oldest first.
    pub fn frames_out(&self) -> &VecDeque<EthernetFrame> {
        self.inner.frames_out()
    }

    /// The hardware address of the interface.
    pub fn ethernet_addr(&self) -> EthernetAddress {
        self.inner.ethernet_addr()
    }

    /// The IPv4 address of the interface.
    pub fn ip_addr(&self) -> Ipv4Address {
        self.inner.ip_addr()
    }

    /// The time accumulated from all calls to `tick`.
    pub fn now(&self) -> Instant {
        self.inner.now()
    }

    /// Inspect the neighbor cache.
    pub fn neighbors(&self) -> &NeighborCache {
        self.inner.neighbors()
    }

    /// The wrapped interface.
    pub fn inner(&self) -> &Interface {
        &self.inner
    }

    /// The wrapped interface, mutably.
    ///
    /// Frames received through it directly are not queued.
    pub fn inner_mut(&mut self) -> &mut Interface {
        &mut self.inner
    }

    /// Unwrap the interface, dropping all queued datagrams.
    pub fn into_inner(self) -> Interface {
        self.inner
    }
}

impl From<Interface> for QueuedInterface {
    fn from(inner: Interface) -> Self {
        QueuedInterface {
            inner,
            datagrams_in: VecDeque::new(),
        }
    }
}
