use alloc::vec::Vec;

use super::{Route, Routes};
use crate::layer::eth::QueuedInterface;
use crate::layer::{Error, Result};
use crate::wire::{Ipv4Address, Ipv4Datagram};

/// A router forwarding datagrams between the interfaces it owns.
///
/// Interfaces are identified by the index returned from [`add_interface`], routes refer to them
/// by that index. The driver feeds received frames into the interfaces, calls [`route`], and then
/// transmits the frames the interfaces produced.
///
/// ```rust
/// use netcore::layer::eth::QueuedInterface;
/// use netcore::layer::ip::Router;
/// use netcore::wire::{EthernetAddress, Ipv4Address};
///
/// let mut router = Router::new();
/// let uplink = router.add_interface(QueuedInterface::new(
///     EthernetAddress([0x02, 0, 0, 0, 0, 1]), Ipv4Address::new(192, 168, 0, 2)));
/// let lan = router.add_interface(QueuedInterface::new(
///     EthernetAddress([0x02, 0, 0, 0, 0, 2]), Ipv4Address::new(10, 0, 0, 1)));
///
/// router.add_route(Ipv4Address::new(0, 0, 0, 0), 0, Some(Ipv4Address::new(192, 168, 0, 1)), uplink)?;
/// router.add_route(Ipv4Address::new(10, 0, 0, 0), 8, None, lan)?;
/// router.route();
/// # Ok::<(), netcore::layer::Error>(())
/// ```
///
/// [`add_interface`]: #method.add_interface
/// [`route`]: #method.route
#[derive(Debug, Default, Clone)]
pub struct Router {
    interfaces: Vec<QueuedInterface>,
    routes: Routes,
}

impl Router {
    /// Create a router without interfaces and routes.
    pub fn new() -> Self {
        Router::default()
    }

    /// Take ownership of an interface, returning its index.
    pub fn add_interface(&mut self, interface: QueuedInterface) -> usize {
        self.interfaces.push(interface);
        self.interfaces.len() - 1
    }

    /// Access an interface by index.
    pub fn interface(&self, index: usize) -> Option<&QueuedInterface> {
        self.interfaces.get(index)
    }

    /// Access an interface mutably by index.
    pub fn interface_mut(&mut self, index: usize) -> Option<&mut QueuedInterface> {
        self.interfaces.get_mut(index)
    }

    /// All interfaces, in index order.
    pub fn interfaces(&self) -> &[QueuedInterface] {
        &self.interfaces
    }

    /// All interfaces mutably, in index order.
    pub fn interfaces_mut(&mut self) -> &mut [QueuedInterface] {
        &mut self.interfaces
    }

    /// The routing table.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Add a route to the routing table.
    ///
    /// Datagrams whose destination agrees with `prefix` in the top `prefix_len` bits are sent out
    /// on the interface with index `interface`, towards `next_hop` or, when that is `None`,
    /// directly to their destination. Fails with `Error::Illegal` if `prefix_len` exceeds 32.
    ///
    /// The interface does not need to exist yet.
    pub fn add_route(
        &mut self,
        prefix: Ipv4Address,
        prefix_len: u8,
        next_hop: Option<Ipv4Address>,
        interface: usize,
    ) -> Result<()> {
        let route = Route::new(prefix, prefix_len, next_hop, interface)?;
        self.routes.add_route(route);
        Ok(())
    }

    /// Forward a single datagram.
    ///
    /// Datagrams without a matching route and those whose time to live is one or less are
    /// dropped, which is not an error. The only error is a matching route that names an interface
    /// which does not exist, the datagram is dropped as well then.
    pub fn route_one_datagram(&mut self, mut datagram: Ipv4Datagram) -> Result<()> {
        let dst_addr = datagram.dst_addr();
        let route = match self.routes.lookup(dst_addr) {
            Some(route) => *route,
            None => {
                net_debug!("ip: no matching route for {}", dst_addr);
                return Ok(());
            },
        };

        if !datagram.decrement_hop_limit() {
            net_debug!("ip: TTL expired for {}", dst_addr);
            return Ok(());
        }

        let next_hop = route.next_hop_for(dst_addr);
        let interface = match self.interfaces.get_mut(route.interface) {
            Some(interface) => interface,
            None => {
                net_debug!("ip: route {} names a missing interface", route);
                return Err(Error::Illegal);
            },
        };

        net_debug!("ip: forwarding {} to {} on interface {}", dst_addr, next_hop, route.interface);
        interface.send_datagram(datagram, next_hop);
        Ok(())
    }

    /// Forward every datagram that the interfaces received.
    ///
    /// Interfaces are drained in index order, each queue in arrival order. Dropped datagrams are
    /// not retried.
    pub fn route(&mut self) {
        for index in 0..self.interfaces.len() {
            while let Some(datagram) = self.interfaces[index].pop_datagram() {
                // Dropping on a dangling route is all that can be done here.
                let _ = self.route_one_datagram(datagram);
            }
        }
    }
}
