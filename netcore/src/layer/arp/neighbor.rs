// Heads up! Before working on this file you should read, at least,
// the parts of RFC 1122 that discuss ARP.
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::time::{Duration, Instant};
use crate::wire::{EthernetAddress, Ipv4Address};

/// A cached neighbor.
///
/// Translates from a protocol address to a hardware address, and remembers the last time the
/// mapping was confirmed by traffic from that neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Neighbor {
    protocol_addr: Ipv4Address,
    hardware_addr: EthernetAddress,
    refreshed_at:  Instant,
}

/// A neighbor cache backed by a map.
///
/// Holds two tables. The resolved neighbors, and the addresses for which a request has been
/// broadcast but not yet answered. An address is never in both at the same time: a response
/// moves it from the second to the first.
///
/// Nothing in the cache expires by itself. The owner decides when to call [`expire`] and
/// [`due_requests`], passing its own notion of the current time.
///
/// ```rust
/// use netcore::layer::arp::NeighborCache;
/// use netcore::time::Instant;
/// use netcore::wire::{EthernetAddress, Ipv4Address};
///
/// let mut cache = NeighborCache::new();
/// let peer = Ipv4Address::new(10, 0, 0, 2);
/// cache.fill(peer, EthernetAddress([0x02, 0, 0, 0, 0, 2]), Instant::ZERO);
/// assert!(cache.lookup(peer).is_some());
/// ```
///
/// [`expire`]: #method.expire
/// [`due_requests`]: #method.due_requests
#[derive(Debug, Default, Clone)]
pub struct Cache {
    entries:  BTreeMap<Ipv4Address, Neighbor>,
    requests: BTreeMap<Ipv4Address, Instant>,
}

impl Cache {
    /// Minimum delay between discovery requests for the same address, in milliseconds.
    pub const SILENT_TIME: Duration = Duration::from_millis(5_000);

    /// Neighbor entry lifetime, in milliseconds.
    pub const ENTRY_LIFETIME: Duration = Duration::from_millis(30_000);

    /// Create an empty cache.
    pub fn new() -> Self {
        Cache::default()
    }

    /// Add or refresh an entry containing a MAC address.
    ///
    /// Any outstanding request for the address is considered answered and removed.
    pub fn fill(
        &mut self,
        protocol_addr: Ipv4Address,
        hardware_addr: EthernetAddress,
        timestamp: Instant,
    ) {
        let neighbor = Neighbor {
            protocol_addr,
            hardware_addr,
            refreshed_at: timestamp,
        };

        if let Some(old) = self.entries.insert(protocol_addr, neighbor) {
            net_trace!("arp: refreshed {} at {} (was {})",
                protocol_addr, hardware_addr, old.hardware_addr);
        } else {
            net_debug!("arp: learned {} at {}", protocol_addr, hardware_addr);
        }

        self.requests.remove(&protocol_addr);
    }

    /// Look up the hardware address of a neighbor.
    pub fn lookup(&self, protocol_addr: Ipv4Address) -> Option<EthernetAddress> {
        self.entries.get(&protocol_addr).map(|neighbor| neighbor.hardware_addr)
    }

    /// Get the full entry of a neighbor.
    pub fn neighbor(&self, protocol_addr: Ipv4Address) -> Option<&Neighbor> {
        self.entries.get(&protocol_addr)
    }

    /// Record that a request for the address is about to be sent.
    ///
    /// Returns `false` and changes nothing if a request is already outstanding, in which case no
    /// new request should go out.
    pub fn requesting(&mut self, protocol_addr: Ipv4Address, timestamp: Instant) -> bool {
        debug_assert!(!self.entries.contains_key(&protocol_addr));
        if self.requests.contains_key(&protocol_addr) {
            return false;
        }

        self.requests.insert(protocol_addr, timestamp);
        true
    }

    /// Check if a request for the address is outstanding.
    pub fn is_requesting(&self, protocol_addr: Ipv4Address) -> bool {
        self.requests.contains_key(&protocol_addr)
    }

    /// The time the last request for an address was sent.
    pub fn requested_at(&self, protocol_addr: Ipv4Address) -> Option<Instant> {
        self.requests.get(&protocol_addr).copied()
    }

    /// Remove all entries that have not been refreshed for at least `lifetime`.
    ///
    /// Returns the number of evicted entries.
    pub fn expire(&mut self, now: Instant, lifetime: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, neighbor| {
            let alive = now.since(neighbor.refreshed_at) < lifetime;
            if !alive {
                net_debug!("arp: evicted {} at {}",
                    neighbor.protocol_addr, neighbor.hardware_addr);
            }
            alive
        });
        before - self.entries.len()
    }

    /// Collect the outstanding requests that were last sent at least `interval` ago.
    ///
    /// Each returned address has its request time reset to `now`, the caller is expected to
    /// repeat the request. The requests themselves stay outstanding until answered.
    pub fn due_requests(&mut self, now: Instant, interval: Duration) -> Vec<Ipv4Address> {
        let mut due = Vec::new();
        for (&protocol_addr, requested_at) in self.requests.iter_mut() {
            if now.since(*requested_at) >= interval {
                *requested_at = now;
                due.push(protocol_addr);
            }
        }
        due
    }

    /// Iterate over all resolved neighbors, in order of their protocol address.
    pub fn iter(&self) -> impl Iterator<Item=&Neighbor> + '_ {
        self.entries.values()
    }

    /// The number of resolved neighbors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no resolved neighbors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of outstanding requests.
    pub fn pending_requests(&self) -> usize {
        self.requests.len()
    }
}

impl Neighbor {
    /// The protocol address of the neighbor.
    pub fn protocol_addr(&self) -> Ipv4Address {
        self.protocol_addr
    }

    /// The hardware address the neighbor announced.
    pub fn hardware_addr(&self) -> EthernetAddress {
        self.hardware_addr
    }

    /// The last time the neighbor was heard from.
    pub fn refreshed_at(&self) -> Instant {
        self.refreshed_at
    }

    /// If the entry is still valid at `ts` given its `lifetime`.
    pub fn is_alive(&self, ts: Instant, lifetime: Duration) -> bool {
        ts.since(self.refreshed_at) < lifetime
    }
}
