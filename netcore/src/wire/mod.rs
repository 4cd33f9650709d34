/*! Low-level packet access and construction.

The `wire` module deals with the packet *representation*, on three levels:

 * Functions to extract fields from sequences of octets, and to insert fields into sequences of
   octets. This happens in the lowercase, dynamically sized structures such as [`ethernet_frame`],
   [`arp_packet`] or [`ipv4_packet`].
 * A compact, high-level representation of header data that can be parsed from and emitted into
   a sequence of octets. This is the `Repr` family, e.g. [`ArpRepr`] or [`Ipv4Repr`].
 * Owned frames and datagrams, a `Repr` together with the payload bytes, which are what the
   interfaces and the router queue. These are [`EthernetFrame`] and [`Ipv4Datagram`].

The lowercase views guarantee that, if `new_checked()` succeeded, then no field accessor will
panic. In the `Repr` family, `parse()` never panics on a checked view. Owned datagrams re-emit
every header field they parsed, IPv4 options included.

[`ethernet_frame`]: struct.ethernet_frame.html
[`arp_packet`]: struct.arp_packet.html
[`ipv4_packet`]: struct.ipv4_packet.html
[`ArpRepr`]: enum.ArpRepr.html
[`Ipv4Repr`]: struct.Ipv4Repr.html
[`EthernetFrame`]: struct.EthernetFrame.html
[`Ipv4Datagram`]: struct.Ipv4Datagram.html

# Examples

To serialize a datagram and then parse it back:

```rust
use netcore::wire::*;

let repr = Ipv4Repr::new(
    Ipv4Address::new(10, 0, 0, 1),
    Ipv4Address::new(10, 0, 0, 2),
    IpProtocol::Tcp,
    64);
let datagram = Ipv4Datagram::new(repr, vec![1, 2, 3]).expect("fits into a datagram");

let bytes = datagram.serialize();
let parsed = Ipv4Datagram::parse(&bytes).expect("malformed packet");
assert_eq!(datagram, parsed);
```
*/
// Copyright (C) 2016 whitequark@whitequark.org
// Copyright (C) 2019 Andreas Molzer <andreas.molzer@tum.de>
//
// in large parts from `smoltcp` originally distributed under 0-clause BSD
//
// Applies to files in this folder unless otherwise noted.

// FIXME: Most fields should be self-explanatory, enable once all accessors are documented.
#![allow(missing_docs)]

mod field {
    pub(crate) type Field = ::core::ops::Range<usize>;
    pub(crate) type Rest  = ::core::ops::RangeFrom<usize>;
}

mod error;
pub(crate) mod arp;
mod ethernet;
mod ipv4;

pub use self::error::{
    Error,
    Result};

pub use self::ethernet::{
    ethernet as ethernet_frame,
    EtherType as EthernetProtocol,
    Address as EthernetAddress,
    Frame as EthernetFrame,
    Repr as EthernetRepr};

pub use self::arp::{
    arp as arp_packet,
    Hardware as ArpHardware,
    Operation as ArpOperation,
    Repr as ArpRepr};

pub use self::ipv4::{
    ipv4 as ipv4_packet,
    Address as Ipv4Address,
    Cidr as Ipv4Cidr,
    Datagram as Ipv4Datagram,
    Protocol as IpProtocol,
    Repr as Ipv4Repr};
