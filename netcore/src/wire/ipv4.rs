use core::fmt;
use alloc::vec;
use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result};
use super::field::Field;

/// The size of a header without options.
pub const HEADER_LEN: usize = field::OPTIONS.start;

/// The largest header, with forty bytes of options.
pub const MAX_HEADER_LEN: usize = 60;

enum_with_unknown! {
    /// The protocol of the datagram payload.
    pub enum Protocol(u8) {
        Icmp = 0x01,
        Tcp  = 0x06,
        Udp  = 0x11
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Protocol::Icmp => f.write_str("ICMP"),
            Protocol::Tcp => f.write_str("TCP"),
            Protocol::Udp => f.write_str("UDP"),
            Protocol::Unknown(other) => write!(f, "protocol {}", other),
        }
    }
}

/// An IPv4 address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 4]);

impl Address {
    /// `0.0.0.0`.
    pub const UNSPECIFIED: Address = Address([0x00; 4]);

    /// `255.255.255.255`.
    pub const BROADCAST: Address = Address([0xff; 4]);

    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Address {
        Address([a, b, c, d])
    }

    /// Read an address from the first four bytes of `data`.
    ///
    /// # Panics
    /// When `data` holds fewer than four bytes.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut octets = [0; 4];
        octets.copy_from_slice(&data[..4]);
        Address(octets)
    }

    /// The address from its value as a number, as it is compared against a prefix.
    pub fn from_bits(bits: u32) -> Address {
        Address(bits.to_be_bytes())
    }

    pub fn to_bits(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "std")]
impl From<std::net::Ipv4Addr> for Address {
    fn from(addr: std::net::Ipv4Addr) -> Address {
        Address(addr.octets())
    }
}

#[cfg(feature = "std")]
impl From<Address> for std::net::Ipv4Addr {
    fn from(addr: Address) -> std::net::Ipv4Addr {
        addr.0.into()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

/// An address prefix, the leading `prefix_len` bits of `address`.
///
/// The remaining host bits of the address are kept as given and play no role in matching.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Cidr {
    address:    Address,
    prefix_len: u8,
}

impl Cidr {
    /// A prefix, or `None` if `prefix_len` is larger than 32.
    pub fn new(address: Address, prefix_len: u8) -> Option<Cidr> {
        if prefix_len > 32 {
            return None;
        }
        Some(Cidr { address, prefix_len })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// If `addr` agrees with the prefix in its leading `prefix_len` bits.
    pub fn contains_addr(&self, addr: &Address) -> bool {
        // Shifting a u32 by 32 overflows, the empty prefix matches everything anyways.
        if self.prefix_len == 0 {
            return true;
        }

        let differing = self.address.to_bits() ^ addr.to_bits();
        differing >> (32 - u32::from(self.prefix_len)) == 0
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

pub(crate) mod checksum {
    use byteorder::{ByteOrder, NetworkEndian};

    /// The ones' complement sum of the 16-bit words in `data`, before the final complement.
    ///
    /// An odd trailing byte is padded with a zero.
    pub(crate) fn data(data: &[u8]) -> u16 {
        let mut words = data.chunks_exact(2);
        let mut sum: u32 = words.by_ref().map(|word| u32::from(NetworkEndian::read_u16(word))).sum();
        if let [last] = *words.remainder() {
            sum += u32::from(last) << 8;
        }

        while sum > 0xffff {
            sum = (sum & 0xffff) + (sum >> 16);
        }
        sum as u16
    }
}

byte_wrapper! {
    /// The octets of an IPv4 datagram, header first.
    #[derive(Debug, PartialEq, Eq)]
    pub struct ipv4([u8]);
}

mod field {
    use crate::wire::field::*;

    pub(crate) const VER_IHL:  usize = 0;
    pub(crate) const TOS:      usize = 1;
    pub(crate) const LENGTH:   Field = 2..4;
    pub(crate) const IDENT:    Field = 4..6;
    pub(crate) const FLG_OFF:  Field = 6..8;
    pub(crate) const TTL:      usize = 8;
    pub(crate) const PROTOCOL: usize = 9;
    pub(crate) const CHECKSUM: Field = 10..12;
    pub(crate) const SRC_ADDR: Field = 12..16;
    pub(crate) const DST_ADDR: Field = 16..20;
    pub(crate) const OPTIONS:  Rest  = 20..;
}

const FLAG_DONT_FRAG: u16 = 0x4000;
const FLAG_MORE_FRAGS: u16 = 0x2000;
const OFFSET_MASK: u16 = 0x1fff;

impl ipv4 {
    /// View a byte slice as a datagram, without any length check.
    pub fn new_unchecked(data: &[u8]) -> &ipv4 {
        Self::__from_macro_new_unchecked(data)
    }

    /// View a mutable byte slice as a datagram, without any length check.
    pub fn new_unchecked_mut(data: &mut [u8]) -> &mut ipv4 {
        Self::__from_macro_new_unchecked_mut(data)
    }

    /// View a byte slice as a datagram if its length fields are consistent with it.
    ///
    /// The header must fit within the total length, and the total length within `data`. Bytes
    /// after the total length are allowed, links pad short frames.
    pub fn new_checked(data: &[u8]) -> Result<&ipv4> {
        if data.len() < HEADER_LEN {
            return Err(Error::Truncated);
        }

        let packet = Self::new_unchecked(data);
        let header_len = packet.header_len();
        let total_len = usize::from(packet.total_len());
        if header_len < HEADER_LEN || header_len > total_len {
            Err(Error::Malformed)
        } else if data.len() < total_len {
            Err(Error::Truncated)
        } else {
            Ok(packet)
        }
    }

    pub fn version(&self) -> u8 {
        self.0[field::VER_IHL] >> 4
    }

    /// The header length in bytes, options included.
    pub fn header_len(&self) -> usize {
        usize::from(self.0[field::VER_IHL] & 0x0f) * 4
    }

    pub fn dscp(&self) -> u8 {
        self.0[field::TOS] >> 2
    }

    pub fn ecn(&self) -> u8 {
        self.0[field::TOS] & 0x03
    }

    pub fn total_len(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::LENGTH])
    }

    pub fn ident(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::IDENT])
    }

    fn flags_and_offset(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::FLG_OFF])
    }

    pub fn dont_frag(&self) -> bool {
        self.flags_and_offset() & FLAG_DONT_FRAG != 0
    }

    pub fn more_frags(&self) -> bool {
        self.flags_and_offset() & FLAG_MORE_FRAGS != 0
    }

    /// The fragment offset, in units of eight bytes.
    pub fn frag_offset(&self) -> u16 {
        self.flags_and_offset() & OFFSET_MASK
    }

    pub fn hop_limit(&self) -> u8 {
        self.0[field::TTL]
    }

    pub fn protocol(&self) -> Protocol {
        Protocol::from(self.0[field::PROTOCOL])
    }

    pub fn checksum(&self) -> u16 {
        NetworkEndian::read_u16(&self.0[field::CHECKSUM])
    }

    pub fn src_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::SRC_ADDR])
    }

    pub fn dst_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::DST_ADDR])
    }

    /// The option bytes between the fixed header and the payload.
    pub fn options(&self) -> &[u8] {
        &self.0[HEADER_LEN..self.header_len()]
    }

    /// The payload, up to the total length.
    pub fn payload(&self) -> &[u8] {
        &self.0[self.header_len()..usize::from(self.total_len())]
    }

    /// If the header, options included, sums to zero.
    pub fn verify_checksum(&self) -> bool {
        checksum::data(&self.0[..self.header_len()]) == 0xffff
    }

    /// Set version 4 and the header length in bytes, which must be a multiple of four.
    pub fn set_version_and_header_len(&mut self, header_len: usize) {
        debug_assert!(header_len % 4 == 0 && header_len <= MAX_HEADER_LEN);
        self.0[field::VER_IHL] = 0x40 | (header_len / 4) as u8;
    }

    pub fn set_tos(&mut self, dscp: u8, ecn: u8) {
        self.0[field::TOS] = (dscp << 2) | (ecn & 0x03);
    }

    pub fn set_total_len(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::LENGTH], value)
    }

    pub fn set_ident(&mut self, value: u16) {
        NetworkEndian::write_u16(&mut self.0[field::IDENT], value)
    }

    /// Set both flags and the fragment offset, in units of eight bytes.
    pub fn set_fragmentation(&mut self, dont_frag: bool, more_frags: bool, frag_offset: u16) {
        let mut raw = frag_offset & OFFSET_MASK;
        if dont_frag {
            raw |= FLAG_DONT_FRAG;
        }
        if more_frags {
            raw |= FLAG_MORE_FRAGS;
        }
        NetworkEndian::write_u16(&mut self.0[field::FLG_OFF], raw)
    }

    pub fn set_hop_limit(&mut self, value: u8) {
        self.0[field::TTL] = value
    }

    pub fn set_protocol(&mut self, value: Protocol) {
        self.0[field::PROTOCOL] = value.into()
    }

    pub fn set_src_addr(&mut self, value: Address) {
        self.0[field::SRC_ADDR].copy_from_slice(value.as_bytes())
    }

    pub fn set_dst_addr(&mut self, value: Address) {
        self.0[field::DST_ADDR].copy_from_slice(value.as_bytes())
    }

    pub fn options_mut(&mut self) -> &mut [u8] {
        let header_len = self.header_len();
        &mut self.0[HEADER_LEN..header_len]
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        let range: Field = self.header_len()..usize::from(self.total_len());
        &mut self.0[range]
    }

    /// Recompute the checksum over the header as it currently is.
    pub fn fill_checksum(&mut self) {
        let header_len = self.header_len();
        NetworkEndian::write_u16(&mut self.0[field::CHECKSUM], 0);
        let checksum = !checksum::data(&self.0[..header_len]);
        NetworkEndian::write_u16(&mut self.0[field::CHECKSUM], checksum);
    }
}

/// The fixed header fields of a datagram.
///
/// Everything but the checksum and the length fields, which follow from the rest. Options are
/// kept with the owned [`Datagram`].
///
/// [`Datagram`]: struct.Datagram.html
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    pub src_addr:    Address,
    pub dst_addr:    Address,
    pub protocol:    Protocol,
    pub payload_len: usize,
    pub hop_limit:   u8,
    pub dscp:        u8,
    pub ecn:         u8,
    pub ident:       u16,
    pub dont_frag:   bool,
    pub more_frags:  bool,
    /// In units of eight bytes.
    pub frag_offset: u16,
}

impl Repr {
    /// An unfragmented header with default service, marked as not to be fragmented.
    ///
    /// The payload length is filled in by [`Datagram::new`].
    ///
    /// [`Datagram::new`]: struct.Datagram.html#method.new
    pub fn new(src_addr: Address, dst_addr: Address, protocol: Protocol, hop_limit: u8) -> Repr {
        Repr {
            src_addr,
            dst_addr,
            protocol,
            payload_len: 0,
            hop_limit,
            dscp: 0,
            ecn: 0,
            ident: 0,
            dont_frag: true,
            more_frags: false,
            frag_offset: 0,
        }
    }

    /// Read the header of a datagram that passed `new_checked`.
    ///
    /// Fails for any version other than 4 and on a checksum mismatch. Fragments are accepted
    /// like any other datagram, and so is any time to live.
    pub fn parse(packet: &ipv4) -> Result<Repr> {
        if packet.version() != 4 {
            return Err(Error::Malformed);
        }
        if !packet.verify_checksum() {
            return Err(Error::WrongChecksum);
        }

        Ok(Repr {
            src_addr:    packet.src_addr(),
            dst_addr:    packet.dst_addr(),
            protocol:    packet.protocol(),
            payload_len: packet.payload().len(),
            hop_limit:   packet.hop_limit(),
            dscp:        packet.dscp(),
            ecn:         packet.ecn(),
            ident:       packet.ident(),
            dont_frag:   packet.dont_frag(),
            more_frags:  packet.more_frags(),
            frag_offset: packet.frag_offset(),
        })
    }

    /// Write the header, with the checksum computed over `options` as well.
    ///
    /// The buffer must hold the header, `options` and `payload_len` bytes, in total no more than
    /// 65535. The option length must be a multiple of four.
    pub fn emit(&self, packet: &mut ipv4, options: &[u8]) {
        let header_len = HEADER_LEN + options.len();
        debug_assert!(header_len + self.payload_len <= usize::from(u16::max_value()));

        packet.set_version_and_header_len(header_len);
        packet.set_tos(self.dscp, self.ecn);
        packet.set_total_len((header_len + self.payload_len) as u16);
        packet.set_ident(self.ident);
        packet.set_fragmentation(self.dont_frag, self.more_frags, self.frag_offset);
        packet.set_hop_limit(self.hop_limit);
        packet.set_protocol(self.protocol);
        packet.set_src_addr(self.src_addr);
        packet.set_dst_addr(self.dst_addr);
        packet.options_mut().copy_from_slice(options);
        packet.fill_checksum();
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv4 {} -> {} {} ttl={} len={}",
            self.src_addr, self.dst_addr, self.protocol, self.hop_limit, self.payload_len)?;
        if self.more_frags || self.frag_offset != 0 {
            write!(f, " frag id={} off={}", self.ident, self.frag_offset)?;
        }
        Ok(())
    }
}

/// An owned IPv4 datagram: header fields, options and payload.
///
/// This is what interfaces deliver and what the router forwards. Serializing a parsed datagram
/// reproduces the received bytes, up to any padding that followed the total length. Changing the
/// time to live changes only that field and the checksum.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Datagram {
    repr: Repr,
    options: Vec<u8>,
    payload: Vec<u8>,
}

impl Datagram {
    /// A datagram without options.
    ///
    /// The `payload_len` of `repr` is replaced by the length of `payload`. Fails with
    /// `Error::Oversized` if the datagram would be longer than 65535 bytes.
    pub fn new(repr: Repr, payload: Vec<u8>) -> Result<Self> {
        Datagram::with_options(repr, Vec::new(), payload)
    }

    /// A datagram carrying header options.
    ///
    /// Options must be padded to a multiple of four bytes, `Error::Malformed` otherwise. More
    /// than forty bytes of options, or a total length above 65535, is `Error::Oversized`.
    pub fn with_options(mut repr: Repr, options: Vec<u8>, payload: Vec<u8>) -> Result<Self> {
        if options.len() % 4 != 0 {
            return Err(Error::Malformed);
        }
        let header_len = HEADER_LEN + options.len();
        if header_len > MAX_HEADER_LEN
            || header_len + payload.len() > usize::from(u16::max_value())
        {
            return Err(Error::Oversized);
        }

        repr.payload_len = payload.len();
        Ok(Datagram { repr, options, payload })
    }

    /// Copy a datagram out of received bytes.
    ///
    /// Bytes beyond the total length of the datagram are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let packet = ipv4::new_checked(data)?;
        let repr = Repr::parse(packet)?;
        Ok(Datagram {
            repr,
            options: packet.options().to_vec(),
            payload: packet.payload().to_vec(),
        })
    }

    /// The bytes of the datagram, with a fresh checksum.
    pub fn serialize(&self) -> Vec<u8> {
        let mut octets = vec![0; self.header_len() + self.payload.len()];
        let packet = ipv4::new_unchecked_mut(&mut octets);
        self.repr.emit(packet, &self.options);
        packet.payload_mut().copy_from_slice(&self.payload);
        octets
    }

    /// The header length, options included.
    pub fn header_len(&self) -> usize {
        HEADER_LEN + self.options.len()
    }

    pub fn repr(&self) -> Repr {
        self.repr
    }

    pub fn src_addr(&self) -> Address {
        self.repr.src_addr
    }

    pub fn dst_addr(&self) -> Address {
        self.repr.dst_addr
    }

    pub fn hop_limit(&self) -> u8 {
        self.repr.hop_limit
    }

    pub fn set_hop_limit(&mut self, hop_limit: u8) {
        self.repr.hop_limit = hop_limit;
    }

    /// Count one hop against the time to live.
    ///
    /// Returns `false` without modification if the datagram would expire, that is if its time to
    /// live is one or less.
    pub fn decrement_hop_limit(&mut self) -> bool {
        if self.repr.hop_limit <= 1 {
            return false;
        }
        self.repr.hop_limit -= 1;
        true
    }

    pub fn protocol(&self) -> Protocol {
        self.repr.protocol
    }

    pub fn options(&self) -> &[u8] {
        &self.options
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Display for Datagram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.repr, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const HOST: Address = Address::new(192, 168, 0, 2);

    /// The middle fragment of a UDP datagram to 10.1.2.3, with DSCP 46 and ECN 0.
    static FRAGMENT: [u8; 28] =
        [0x45, 0xb8, 0x00, 0x1c,
         0x12, 0x34, 0x20, 0xb9,
         0x40, 0x11, 0x7a, 0x7e,
         0xc0, 0xa8, 0x00, 0x02,
         0x0a, 0x01, 0x02, 0x03,
         0x00, 0x35, 0x00, 0x35,
         0x00, 0x08, 0x00, 0x00];

    /// A datagram with a router alert option, ECN 1 and an unknown protocol.
    static WITH_OPTIONS: [u8; 28] =
        [0x46, 0x01, 0x00, 0x1c,
         0xbe, 0xef, 0x40, 0x00,
         0x01, 0x02, 0x85, 0x2a,
         0xc0, 0xa8, 0x00, 0x02,
         0xe0, 0x00, 0x00, 0x16,
         0x94, 0x04, 0x00, 0x00,
         0x11, 0x64, 0x00, 0x00];

    /// A plain ICMP datagram, as built by `Repr::new`.
    static PLAIN: [u8; 24] =
        [0x45, 0x00, 0x00, 0x18,
         0x00, 0x00, 0x40, 0x00,
         0x40, 0x01, 0xd2, 0x79,
         0x11, 0x12, 0x13, 0x14,
         0x21, 0x22, 0x23, 0x24,
         0xaa, 0x00, 0x00, 0xff];

    fn plain_repr() -> Repr {
        Repr::new(
            Address::new(0x11, 0x12, 0x13, 0x14),
            Address::new(0x21, 0x22, 0x23, 0x24),
            Protocol::Icmp,
            64)
    }

    #[test]
    fn read_fragment() {
        let packet = ipv4::new_checked(&FRAGMENT[..]).unwrap();
        assert_eq!(packet.header_len(), 20);
        assert_eq!(packet.dscp(), 46);
        assert_eq!(packet.ecn(), 0);
        assert_eq!(packet.ident(), 0x1234);
        assert!(!packet.dont_frag());
        assert!(packet.more_frags());
        assert_eq!(packet.frag_offset(), 185);
        assert_eq!(packet.protocol(), Protocol::Udp);
        assert_eq!(packet.checksum(), 0x7a7e);
        assert!(packet.verify_checksum());
        assert!(packet.options().is_empty());
        assert_eq!(packet.payload().len(), 8);
    }

    #[test]
    fn fragment_round_trip() {
        let datagram = Datagram::parse(&FRAGMENT[..]).unwrap();
        let repr = datagram.repr();
        assert_eq!(repr.src_addr, HOST);
        assert_eq!(repr.dst_addr, Address::new(10, 1, 2, 3));
        assert_eq!((repr.dscp, repr.ident, repr.more_frags, repr.frag_offset), (46, 0x1234, true, 185));
        assert_eq!(datagram.serialize(), &FRAGMENT[..]);
    }

    #[test]
    fn options_round_trip() {
        let datagram = Datagram::parse(&WITH_OPTIONS[..]).unwrap();
        assert_eq!(datagram.header_len(), 24);
        assert_eq!(datagram.options(), &[0x94, 0x04, 0x00, 0x00]);
        assert_eq!(datagram.payload(), &[0x11, 0x64, 0x00, 0x00]);
        assert_eq!(datagram.protocol(), Protocol::Unknown(2));
        assert_eq!(datagram.repr().ecn, 1);
        assert!(datagram.repr().dont_frag);
        assert_eq!(datagram.serialize(), &WITH_OPTIONS[..]);
    }

    #[test]
    fn decrement_changes_only_ttl_and_checksum() {
        let mut datagram = Datagram::parse(&WITH_OPTIONS[..]).unwrap();
        assert!(!datagram.decrement_hop_limit());

        let mut datagram = Datagram::parse(&FRAGMENT[..]).unwrap();
        assert!(datagram.decrement_hop_limit());
        let octets = datagram.serialize();
        for (index, (before, after)) in FRAGMENT.iter().zip(&octets).enumerate() {
            match index {
                8 => assert_eq!(*after, before - 1),
                10 | 11 => {},
                _ => assert_eq!(before, after, "byte {} changed", index),
            }
        }
        assert!(ipv4::new_unchecked(&octets).verify_checksum());
    }

    #[test]
    fn build_plain() {
        let datagram = Datagram::new(plain_repr(), vec![0xaa, 0x00, 0x00, 0xff]).unwrap();
        assert_eq!(datagram.repr().payload_len, 4);
        assert_eq!(datagram.serialize(), &PLAIN[..]);
        assert_eq!(Datagram::parse(&PLAIN[..]), Ok(datagram));
    }

    #[test]
    fn build_with_options() {
        let options = vec![0x94, 0x04, 0x00, 0x00];
        let repr = Repr {
            ecn: 1,
            ident: 0xbeef,
            ..Repr::new(HOST, Address::new(224, 0, 0, 22), Protocol::Unknown(2), 1)
        };
        let datagram = Datagram::with_options(repr, options, vec![0x11, 0x64, 0x00, 0x00]);
        assert_eq!(datagram.map(|datagram| datagram.serialize()), Ok(WITH_OPTIONS.to_vec()));

        assert_eq!(Datagram::with_options(repr, vec![0x01; 3], vec![]), Err(Error::Malformed));
        assert_eq!(Datagram::with_options(repr, vec![0x01; 44], vec![]), Err(Error::Oversized));
    }

    #[test]
    fn oversized_payload() {
        let limit = usize::from(u16::max_value()) - HEADER_LEN;
        let datagram = Datagram::new(plain_repr(), vec![0; limit]).unwrap();
        assert_eq!(datagram.serialize().len(), 65535);
        assert_eq!(Datagram::new(plain_repr(), vec![0; limit + 1]), Err(Error::Oversized));
        assert_eq!(
            Datagram::with_options(plain_repr(), vec![0x01; 4], vec![0; limit - 3]),
            Err(Error::Oversized));
    }

    #[test]
    fn padding_ignored() {
        let mut octets = PLAIN.to_vec();
        octets.extend_from_slice(&[0; 6]);
        let datagram = Datagram::parse(&octets).unwrap();
        assert_eq!(datagram.payload(), &[0xaa, 0x00, 0x00, 0xff]);
        assert_eq!(datagram.serialize(), &PLAIN[..]);
    }

    #[test]
    fn rejected() {
        assert_eq!(Datagram::parse(&PLAIN[..19]), Err(Error::Truncated));
        assert_eq!(Datagram::parse(&PLAIN[..23]), Err(Error::Truncated));

        let mut octets = PLAIN.to_vec();
        octets[8] = 63;
        assert_eq!(Datagram::parse(&octets), Err(Error::WrongChecksum));

        let mut octets = PLAIN.to_vec();
        octets[0] = 0x65;
        ipv4::new_unchecked_mut(&mut octets).fill_checksum();
        assert_eq!(Datagram::parse(&octets), Err(Error::Malformed));

        // Header length below 20.
        let mut octets = PLAIN.to_vec();
        octets[0] = 0x44;
        assert_eq!(Datagram::parse(&octets), Err(Error::Malformed));

        // Header length beyond the total length.
        let mut octets = vec![0; 40];
        octets[0] = 0x49;
        octets[3] = 24;
        assert_eq!(Datagram::parse(&octets), Err(Error::Malformed));
    }

    #[test]
    fn expiry() {
        let mut datagram = Datagram::new(plain_repr(), vec![]).unwrap();
        datagram.set_hop_limit(1);
        assert!(!datagram.decrement_hop_limit());
        assert_eq!(datagram.hop_limit(), 1);
        datagram.set_hop_limit(0);
        assert!(!datagram.decrement_hop_limit());
        assert_eq!(datagram.hop_limit(), 0);
    }

    #[test]
    fn checksum_odd_length() {
        assert_eq!(checksum::data(&[0x12, 0x34, 0x56]), 0x6834);
        assert_eq!(checksum::data(&[0xff, 0xff, 0x00, 0x01]), 0x0001);
    }

    #[test]
    fn cidr_matching() {
        let lan = Cidr::new(Address::new(192, 168, 1, 10), 24).unwrap();
        assert!(lan.contains_addr(&Address::new(192, 168, 1, 0)));
        assert!(lan.contains_addr(&Address::new(192, 168, 1, 255)));
        assert!(!lan.contains_addr(&Address::new(192, 168, 0, 255)));
        assert!(!lan.contains_addr(&Address::new(192, 168, 2, 1)));

        let odd = Cidr::new(Address::new(172, 16, 0, 0), 12).unwrap();
        assert!(odd.contains_addr(&Address::new(172, 31, 255, 255)));
        assert!(!odd.contains_addr(&Address::new(172, 32, 0, 0)));

        let host = Cidr::new(HOST, 32).unwrap();
        assert!(host.contains_addr(&HOST));
        assert!(!host.contains_addr(&Address::new(192, 168, 0, 3)));

        let default = Cidr::new(Address::new(10, 0, 0, 1), 0).unwrap();
        assert!(default.contains_addr(&Address::BROADCAST));
        assert!(default.contains_addr(&Address::UNSPECIFIED));

        assert_eq!(Cidr::new(HOST, 33), None);
        assert_eq!(format!("{}", lan), "192.168.1.10/24");
    }

    #[test]
    fn address_bits() {
        let addr = Address::new(10, 1, 2, 3);
        assert_eq!(addr.to_bits(), 0x0a01_0203);
        assert_eq!(Address::from_bits(0x0a01_0203), addr);
        assert_eq!(format!("{}", addr), "10.1.2.3");
    }
}
