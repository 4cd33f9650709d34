//! CIDR, relevant rfc1519, rfc4632.
//!
use alloc::vec::Vec;
use core::fmt;

use crate::layer::{Error, Result};
use crate::wire::{Ipv4Address, Ipv4Cidr};

/// A prefix of addresses that should be routed via an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    /// The network routed through this route.
    ///
    /// Host bits of the address, those outside the prefix, are ignored when matching.
    pub net: Ipv4Cidr,

    /// Next hop for this network.
    ///
    /// `None` for a directly attached network, where the destination of the datagram itself is
    /// the next hop.
    pub next_hop: Option<Ipv4Address>,

    /// The index of the interface to send matching datagrams out on.
    pub interface: usize,
}

impl Route {
    /// Create a route, or fail with `Error::Illegal` if the prefix is longer than 32 bits.
    pub fn new(
        prefix: Ipv4Address,
        prefix_len: u8,
        next_hop: Option<Ipv4Address>,
        interface: usize,
    ) -> Result<Self> {
        let net = Ipv4Cidr::new(prefix, prefix_len).ok_or(Error::Illegal)?;
        Ok(Route { net, next_hop, interface })
    }

    /// Check if the destination address falls into the routed network.
    pub fn matches(&self, dst_addr: Ipv4Address) -> bool {
        self.net.contains_addr(&dst_addr)
    }

    /// The address a datagram towards `dst_addr` is handed to.
    pub fn next_hop_for(&self, dst_addr: Ipv4Address) -> Ipv4Address {
        self.next_hop.unwrap_or(dst_addr)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.next_hop {
            Some(next_hop) => write!(f, "{} => {} on interface {}", self.net, next_hop, self.interface),
            None => write!(f, "{} => (direct) on interface {}", self.net, self.interface),
        }
    }
}

/// A routing table.
///
/// # Examples
///
/// ```rust
/// use netcore::layer::ip::{Route, Routes};
/// use netcore::wire::Ipv4Address;
///
/// let mut routes = Routes::new();
/// routes.add_route(Route::new(Ipv4Address::new(0, 0, 0, 0), 0, Some(Ipv4Address::new(10, 0, 0, 1)), 0)?);
/// routes.add_route(Route::new(Ipv4Address::new(10, 0, 0, 0), 8, None, 1)?);
///
/// let route = routes.lookup(Ipv4Address::new(10, 1, 2, 3)).unwrap();
/// assert_eq!(route.interface, 1);
/// # Ok::<(), netcore::layer::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Routes {
    storage: Vec<Route>,
}

impl Routes {
    /// Creates an empty routing table.
    pub fn new() -> Self {
        Routes::default()
    }

    /// Append a route to the table.
    ///
    /// Duplicate and overlapping routes are accepted, they are resolved at lookup.
    pub fn add_route(&mut self, route: Route) {
        net_debug!("ip: adding route {}", route);
        self.storage.push(route);
    }

    /// Find the route to use for a destination address.
    ///
    /// The route with the longest matching prefix is chosen. Among routes of equal length the one
    /// added first is kept.
    pub fn lookup(&self, dst_addr: Ipv4Address) -> Option<&Route> {
        // The rules say to find the subnet with longest prefix.
        let mut best_match: Option<&Route> = None;
        for route in self.storage.iter() {
            // Ignored routes with mismatching net.
            if !route.matches(dst_addr) {
                continue;
            }

            let best = best_match.get_or_insert(route);
            // Prefer the more specific route, ties keep the earlier one.
            if best.net.prefix_len() < route.net.prefix_len() {
                *best = route;
            }
        }
        best_match
    }

    /// Iterate over all routes, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item=&Route> + '_ {
        self.storage.iter()
    }

    /// The number of routes.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if the table has no routes at all.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}
