use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::Config;
use crate::layer::arp::NeighborCache;
use crate::time::Instant;
use crate::wire::{ArpOperation, ArpRepr};
use crate::wire::{EthernetAddress, EthernetFrame, EthernetProtocol, EthernetRepr};
use crate::wire::{Ipv4Address, Ipv4Datagram};

/// An Ethernet interface that resolves next hops with ARP.
///
/// Has a fixed hardware and IPv4 address. Outgoing datagrams are framed and queued for the
/// driver, which collects them with [`pop_frame`]. Datagrams towards a next hop whose hardware
/// address is not yet known wait inside the interface until an ARP message from that neighbor
/// arrives.
///
/// [`pop_frame`]: #method.pop_frame
#[derive(Debug, Clone)]
pub struct Interface {
    ethernet_addr: EthernetAddress,
    ip_addr: Ipv4Address,
    config: Config,
    now: Instant,
    neighbors: NeighborCache,
    /// Datagrams waiting for their next hop to be resolved, in send order.
    waiting: VecDeque<(Ipv4Address, Ipv4Datagram)>,
    frames_out: VecDeque<EthernetFrame>,
}

impl Interface {
    /// Create an interface with the default timing configuration.
    pub fn new(ethernet_addr: EthernetAddress, ip_addr: Ipv4Address) -> Self {
        Interface::with_config(ethernet_addr, ip_addr, Config::default())
    }

    /// Create an interface with a custom timing configuration.
    pub fn with_config(ethernet_addr: EthernetAddress, ip_addr: Ipv4Address, config: Config)
        -> Self
    {
        net_debug!("eth: interface has Ethernet address {} and IP address {}",
            ethernet_addr, ip_addr);

        Interface {
            ethernet_addr,
            ip_addr,
            config,
            now: Instant::ZERO,
            neighbors: NeighborCache::new(),
            waiting: VecDeque::new(),
            frames_out: VecDeque::new(),
        }
    }

    /// The hardware address of the interface.
    pub fn ethernet_addr(&self) -> EthernetAddress {
        self.ethernet_addr
    }

    /// The IPv4 address of the interface.
    pub fn ip_addr(&self) -> Ipv4Address {
        self.ip_addr
    }

    /// The timing configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// The time accumulated from all calls to `tick`.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Inspect the neighbor cache.
    pub fn neighbors(&self) -> &NeighborCache {
        &self.neighbors
    }

    /// The frames waiting to be transmitted, oldest first.
    pub fn frames_out(&self) -> &VecDeque<EthernetFrame> {
        &self.frames_out
    }

    /// Take the oldest frame that is ready for transmission.
    pub fn pop_frame(&mut self) -> Option<EthernetFrame> {
        self.frames_out.pop_front()
    }

    /// The number of datagrams waiting for address resolution.
    pub fn pending_datagram_count(&self) -> usize {
        self.waiting.len()
    }

    /// Send an IPv4 datagram towards `next_hop`.
    ///
    /// The next hop is typically a router or default gateway, but may also be the destination
    /// itself when it is on the same link. If its hardware address is known the frame is queued
    /// right away. Otherwise the datagram waits and a request is broadcast, unless one for the
    /// same address is already outstanding.
    pub fn send_datagram(&mut self, datagram: Ipv4Datagram, next_hop: Ipv4Address) {
        if let Some(hardware_addr) = self.neighbors.lookup(next_hop) {
            let frame = EthernetFrame::new(EthernetRepr {
                src_addr: self.ethernet_addr,
                dst_addr: hardware_addr,
                ethertype: EthernetProtocol::Ipv4,
            }, datagram.serialize());
            self.frames_out.push_back(frame);
            return;
        }

        self.waiting.push_back((next_hop, datagram));
        if self.neighbors.requesting(next_hop, self.now) {
            net_debug!("eth: resolving {}", next_hop);
            self.broadcast_request(next_hop);
        }
    }

    /// Process a frame received from the link.
    ///
    /// Returns the datagram contained in an IPv4 frame. ARP messages are consumed: any of them
    /// teaches the interface the sender's addresses, and a request for our own address is
    /// answered. Frames addressed to another station and frames that fail to parse are dropped.
    pub fn recv_frame(&mut self, frame: &EthernetFrame) -> Option<Ipv4Datagram> {
        let dst_addr = frame.dst_addr();
        if dst_addr != self.ethernet_addr && !dst_addr.is_broadcast() {
            return None;
        }

        match frame.ethertype() {
            EthernetProtocol::Ipv4 => match Ipv4Datagram::parse(frame.payload()) {
                Ok(datagram) => Some(datagram),
                Err(err) => {
                    net_debug!("eth: dropped IPv4 frame from {}: {}", frame.src_addr(), err);
                    None
                },
            },
            EthernetProtocol::Arp => {
                match ArpRepr::parse_bytes(frame.payload()) {
                    Ok(arp) => self.recv_arp(arp),
                    Err(err) => {
                        net_debug!("eth: dropped ARP frame from {}: {}", frame.src_addr(), err);
                    },
                }
                None
            },
            _ => None,
        }
    }

    /// Advance the clock by `elapsed_ms` milliseconds.
    ///
    /// Forgets neighbors that were not heard from for the entry lifetime and repeats requests
    /// that went unanswered for the request interval.
    pub fn tick(&mut self, elapsed_ms: u64) {
        self.now.advance(elapsed_ms);

        self.neighbors.expire(self.now, self.config.entry_lifetime);

        for protocol_addr in self.neighbors.due_requests(self.now, self.config.request_interval) {
            net_debug!("eth: repeating request for {}", protocol_addr);
            self.broadcast_request(protocol_addr);
        }
    }

    fn recv_arp(&mut self, arp: ArpRepr) {
        let source_hardware_addr = arp.source_hardware_addr();
        let source_protocol_addr = arp.source_protocol_addr();

        if arp.operation() == ArpOperation::Request && arp.target_protocol_addr() == self.ip_addr {
            let reply = ArpRepr::EthernetIpv4 {
                operation: ArpOperation::Reply,
                source_hardware_addr: self.ethernet_addr,
                source_protocol_addr: self.ip_addr,
                target_hardware_addr: source_hardware_addr,
                target_protocol_addr: source_protocol_addr,
            };
            self.frames_out.push_back(EthernetFrame::new(EthernetRepr {
                src_addr: self.ethernet_addr,
                dst_addr: source_hardware_addr,
                ethertype: EthernetProtocol::Arp,
            }, reply.serialize()));
        }

        self.neighbors.fill(source_protocol_addr, source_hardware_addr, self.now);
        self.flush(source_protocol_addr);
    }

    /// Send all waiting datagrams for a now resolved neighbor, in their original order.
    fn flush(&mut self, protocol_addr: Ipv4Address) {
        let (ready, waiting): (Vec<_>, Vec<_>) = self.waiting
            .drain(..)
            .partition(|(next_hop, _)| *next_hop == protocol_addr);
        self.waiting.extend(waiting);

        for (next_hop, datagram) in ready {
            self.send_datagram(datagram, next_hop);
        }
    }

    fn broadcast_request(&mut self, protocol_addr: Ipv4Address) {
        let request = ArpRepr::request(self.ethernet_addr, self.ip_addr, protocol_addr);
        self.frames_out.push_back(EthernetFrame::new(EthernetRepr {
            src_addr: self.ethernet_addr,
            dst_addr: EthernetAddress::BROADCAST,
            ethertype: EthernetProtocol::Arp,
        }, request.serialize()));
    }
}
