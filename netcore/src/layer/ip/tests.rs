use super::*;
use crate::layer::eth::QueuedInterface;
use crate::layer::Error;
use crate::wire::{ArpOperation, ArpRepr};
use crate::wire::{EthernetAddress, EthernetFrame, EthernetProtocol, EthernetRepr};
use crate::wire::{IpProtocol, Ipv4Address, Ipv4Datagram, Ipv4Repr};

const MAC_ADDR_UPLINK: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 1]);
const IP_ADDR_UPLINK: Ipv4Address = Ipv4Address::new(192, 168, 0, 2);
const MAC_ADDR_LAN: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 0, 2]);
const IP_ADDR_LAN: Ipv4Address = Ipv4Address::new(10, 0, 0, 1);

const MAC_ADDR_GATEWAY: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 1, 1]);
const IP_ADDR_GATEWAY: Ipv4Address = Ipv4Address::new(192, 168, 0, 1);
const MAC_ADDR_HOST: EthernetAddress = EthernetAddress([0x02, 0, 0, 0, 1, 2]);
const IP_ADDR_HOST: Ipv4Address = Ipv4Address::new(10, 1, 2, 3);

const IP_ADDR_REMOTE: Ipv4Address = Ipv4Address::new(8, 8, 8, 8);

const UPLINK: usize = 0;
const LAN: usize = 1;

/// A router with a default route via the gateway on the uplink and the 10/8 network directly
/// attached to the lan interface.
fn router() -> Router {
    let mut router = Router::new();
    assert_eq!(router.add_interface(QueuedInterface::new(MAC_ADDR_UPLINK, IP_ADDR_UPLINK)), UPLINK);
    assert_eq!(router.add_interface(QueuedInterface::new(MAC_ADDR_LAN, IP_ADDR_LAN)), LAN);
    router.add_route(Ipv4Address::new(0, 0, 0, 0), 0, Some(IP_ADDR_GATEWAY), UPLINK).unwrap();
    router.add_route(Ipv4Address::new(10, 0, 0, 0), 8, None, LAN).unwrap();
    router
}

/// Let an interface know the hardware address of a neighbor.
fn introduce(
    router: &mut Router,
    index: usize,
    neighbor: (EthernetAddress, Ipv4Address),
) {
    let iface = router.interface_mut(index).unwrap();
    let arp = ArpRepr::EthernetIpv4 {
        operation: ArpOperation::Reply,
        source_hardware_addr: neighbor.0,
        source_protocol_addr: neighbor.1,
        target_hardware_addr: iface.ethernet_addr(),
        target_protocol_addr: iface.ip_addr(),
    };
    let frame = EthernetFrame::new(EthernetRepr {
        src_addr: neighbor.0,
        dst_addr: iface.ethernet_addr(),
        ethertype: EthernetProtocol::Arp,
    }, arp.serialize());
    iface.recv_frame(&frame);
    assert!(iface.datagrams_in().is_empty());
}

fn datagram(src_addr: Ipv4Address, dst_addr: Ipv4Address, hop_limit: u8) -> Ipv4Datagram {
    let repr = Ipv4Repr::new(src_addr, dst_addr, IpProtocol::Tcp, hop_limit);
    Ipv4Datagram::new(repr, vec![0xaa, 0x00, 0x00, 0xff]).unwrap()
}

fn deliver(router: &mut Router, index: usize, datagram: &Ipv4Datagram) {
    let iface = router.interface_mut(index).unwrap();
    let frame = EthernetFrame::new(EthernetRepr {
        src_addr: MAC_ADDR_GATEWAY,
        dst_addr: iface.ethernet_addr(),
        ethertype: EthernetProtocol::Ipv4,
    }, datagram.serialize());
    iface.recv_frame(&frame);
}

fn forwarded(router: &mut Router, index: usize, dst_addr: EthernetAddress) -> Ipv4Datagram {
    let frame = router.interface_mut(index).unwrap().pop_frame()
        .expect("A frame was forwarded");
    assert_eq!(frame.dst_addr(), dst_addr);
    assert_eq!(frame.ethertype(), EthernetProtocol::Ipv4);
    Ipv4Datagram::parse(frame.payload()).unwrap()
}

fn assert_silent(router: &Router) {
    for iface in router.interfaces() {
        assert!(iface.frames_out().is_empty());
    }
}

#[test]
fn longest_prefix_direct() {
    let mut router = router();
    introduce(&mut router, LAN, (MAC_ADDR_HOST, IP_ADDR_HOST));

    router.route_one_datagram(datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 64)).unwrap();

    let out = forwarded(&mut router, LAN, MAC_ADDR_HOST);
    assert_eq!(out.dst_addr(), IP_ADDR_HOST);
    assert_eq!(out.hop_limit(), 63);
    assert_eq!(out.payload(), &[0xaa, 0x00, 0x00, 0xff]);
    assert_silent(&router);
}

#[test]
fn default_route_via_gateway() {
    let mut router = router();

    router.route_one_datagram(datagram(IP_ADDR_HOST, IP_ADDR_REMOTE, 10)).unwrap();

    // Resolves the gateway, not the final destination.
    let uplink = router.interface_mut(UPLINK).unwrap();
    let request = uplink.pop_frame().unwrap();
    assert_eq!(request.dst_addr(), EthernetAddress::BROADCAST);
    let arp = ArpRepr::parse_bytes(request.payload()).unwrap();
    assert_eq!(arp.target_protocol_addr(), IP_ADDR_GATEWAY);
    assert!(uplink.neighbors().is_requesting(IP_ADDR_GATEWAY));
    assert!(router.interface(LAN).unwrap().frames_out().is_empty());

    introduce(&mut router, UPLINK, (MAC_ADDR_GATEWAY, IP_ADDR_GATEWAY));
    let out = forwarded(&mut router, UPLINK, MAC_ADDR_GATEWAY);
    assert_eq!(out.dst_addr(), IP_ADDR_REMOTE);
    assert_eq!(out.hop_limit(), 9);
}

#[test]
fn ttl_expired() {
    let mut router = router();
    introduce(&mut router, LAN, (MAC_ADDR_HOST, IP_ADDR_HOST));

    router.route_one_datagram(datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 1)).unwrap();
    router.route_one_datagram(datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 0)).unwrap();
    assert_silent(&router);

    router.route_one_datagram(datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 2)).unwrap();
    assert_eq!(forwarded(&mut router, LAN, MAC_ADDR_HOST).hop_limit(), 1);
}

#[test]
fn no_route() {
    let mut router = Router::new();
    router.add_interface(QueuedInterface::new(MAC_ADDR_LAN, IP_ADDR_LAN));
    router.add_route(Ipv4Address::new(10, 0, 0, 0), 8, None, 0).unwrap();

    router.route_one_datagram(datagram(IP_ADDR_HOST, IP_ADDR_REMOTE, 64)).unwrap();
    assert_silent(&router);
    assert_eq!(router.interface(0).unwrap().neighbors().pending_requests(), 0);
}

#[test]
fn tie_keeps_first_route() {
    let mut router = router();
    router.add_route(Ipv4Address::new(10, 0, 0, 0), 8, Some(IP_ADDR_GATEWAY), UPLINK).unwrap();
    introduce(&mut router, LAN, (MAC_ADDR_HOST, IP_ADDR_HOST));

    router.route_one_datagram(datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 64)).unwrap();
    forwarded(&mut router, LAN, MAC_ADDR_HOST);
    assert_silent(&router);
}

#[test]
fn more_specific_added_later() {
    let mut router = router();
    router.add_route(Ipv4Address::new(10, 1, 2, 0), 24, Some(IP_ADDR_GATEWAY), UPLINK).unwrap();
    introduce(&mut router, UPLINK, (MAC_ADDR_GATEWAY, IP_ADDR_GATEWAY));

    router.route_one_datagram(datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 64)).unwrap();
    let out = forwarded(&mut router, UPLINK, MAC_ADDR_GATEWAY);
    assert_eq!(out.dst_addr(), IP_ADDR_HOST);
    assert_silent(&router);
}

#[test]
fn route_drains_all_interfaces() {
    let mut router = router();
    introduce(&mut router, LAN, (MAC_ADDR_HOST, IP_ADDR_HOST));
    introduce(&mut router, UPLINK, (MAC_ADDR_GATEWAY, IP_ADDR_GATEWAY));

    let inbound_1 = datagram(IP_ADDR_REMOTE, IP_ADDR_HOST, 64);
    let inbound_2 = datagram(IP_ADDR_REMOTE, Ipv4Address::new(10, 1, 2, 3), 32);
    let outbound = datagram(IP_ADDR_HOST, IP_ADDR_REMOTE, 64);
    let expired = datagram(IP_ADDR_HOST, IP_ADDR_REMOTE, 1);

    deliver(&mut router, UPLINK, &inbound_1);
    deliver(&mut router, UPLINK, &inbound_2);
    deliver(&mut router, LAN, &expired);
    deliver(&mut router, LAN, &outbound);
    assert_eq!(router.interface(UPLINK).unwrap().datagrams_in().len(), 2);
    assert_eq!(router.interface(LAN).unwrap().datagrams_in().len(), 2);

    router.route();

    for iface in router.interfaces() {
        assert!(iface.datagrams_in().is_empty());
    }

    let first = forwarded(&mut router, LAN, MAC_ADDR_HOST);
    assert_eq!(first.hop_limit(), 63);
    let second = forwarded(&mut router, LAN, MAC_ADDR_HOST);
    assert_eq!(second.hop_limit(), 31);
    let third = forwarded(&mut router, UPLINK, MAC_ADDR_GATEWAY);
    assert_eq!(third.src_addr(), IP_ADDR_HOST);
    assert_eq!(third.hop_limit(), 63);
    assert_silent(&router);

    // Nothing left to do.
    router.route();
    assert_silent(&router);
}

#[test]
fn forwarding_keeps_header() {
    let mut router = router();
    introduce(&mut router, LAN, (MAC_ADDR_HOST, IP_ADDR_HOST));

    let repr = Ipv4Repr {
        dscp: 46,
        ecn: 1,
        ident: 0xbeef,
        dont_frag: false,
        more_frags: true,
        frag_offset: 185,
        ..Ipv4Repr::new(IP_ADDR_REMOTE, IP_ADDR_HOST, IpProtocol::Udp, 64)
    };
    // Router alert.
    let options = vec![0x94, 0x04, 0x00, 0x00];
    let fragment = Ipv4Datagram::with_options(repr, options, b"fragment".to_vec()).unwrap();
    let sent = fragment.serialize();

    deliver(&mut router, UPLINK, &fragment);
    router.route();

    let frame = router.interface_mut(LAN).unwrap().pop_frame().unwrap();
    assert_eq!(frame.dst_addr(), MAC_ADDR_HOST);
    let received = frame.payload();
    assert_eq!(received.len(), sent.len());
    for (index, (before, after)) in sent.iter().zip(received).enumerate() {
        match index {
            // Time to live, then the checksum.
            8 => assert_eq!(*after, before - 1),
            10 | 11 => {},
            _ => assert_eq!(before, after, "byte {} changed", index),
        }
    }
    assert_ne!(received[10..12], sent[10..12]);

    let out = Ipv4Datagram::parse(received).unwrap();
    assert_eq!(out.options(), fragment.options());
    assert_eq!(out.repr(), Ipv4Repr { hop_limit: 63, ..fragment.repr() });
    assert_silent(&router);
}

#[test]
fn missing_interface() {
    let mut router = router();
    router.add_route(Ipv4Address::new(172, 16, 0, 0), 12, None, 7).unwrap();

    assert_eq!(
        router.route_one_datagram(datagram(IP_ADDR_HOST, Ipv4Address::new(172, 16, 0, 1), 64)),
        Err(Error::Illegal));
    assert_silent(&router);
}

#[test]
fn illegal_prefix() {
    let mut router = router();
    assert_eq!(router.add_route(IP_ADDR_HOST, 33, None, LAN), Err(Error::Illegal));
    assert_eq!(router.routes().len(), 2);
}
