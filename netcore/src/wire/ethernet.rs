use core::{fmt, str::FromStr};
use alloc::vec;
use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};

use crate::wire::{Error, Result};

enum_with_unknown! {
    /// The payload type announced in the frame header.
    ///
    /// Interfaces handle the first two and ignore everything else.
    pub enum EtherType(u16) {
        Ipv4 = 0x0800,
        Arp  = 0x0806,
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EtherType::Ipv4 => f.write_str("IPv4"),
            EtherType::Arp => f.write_str("ARP"),
            EtherType::Unknown(other) => write!(f, "ethertype 0x{:04x}", other),
        }
    }
}

/// A 48-bit hardware address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; 6]);

impl Address {
    /// The address every station on the link listens to.
    pub const BROADCAST: Address = Address([0xff; 6]);

    /// All zeroes, put into ARP requests where the hardware address is the unknown.
    pub const UNSPECIFIED: Address = Address([0x00; 6]);

    /// Read an address from the first six bytes of `data`.
    ///
    /// # Panics
    /// When `data` holds fewer than six bytes.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut octets = [0; 6];
        octets.copy_from_slice(&data[..6]);
        Address(octets)
    }

    /// The octets of the address, in transmission order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// If this is the link broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Address::BROADCAST
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}", a, b, c, d, e, g)
    }
}

/// An address string was not six colon separated hexadecimal octets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseAddressError;

impl fmt::Display for ParseAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("expected six hexadecimal octets separated by ':'")
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(src: &str) -> core::result::Result<Self, ParseAddressError> {
        let mut octets = [0; 6];
        let mut parts = src.split(':');
        for octet in octets.iter_mut() {
            let part = parts.next().ok_or(ParseAddressError)?;
            if part.is_empty() || part.len() > 2 {
                return Err(ParseAddressError);
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| ParseAddressError)?;
        }

        match parts.next() {
            None => Ok(Address(octets)),
            Some(_) => Err(ParseAddressError),
        }
    }
}

byte_wrapper! {
    /// The octets of an Ethernet II frame, header first.
    #[derive(Debug, PartialEq, Eq)]
    pub struct ethernet([u8]);
}

mod field {
    use crate::wire::field::*;

    pub(crate) const DESTINATION: Field =  0..6;
    pub(crate) const SOURCE:      Field =  6..12;
    pub(crate) const ETHERTYPE:   Field = 12..14;
    pub(crate) const PAYLOAD:     Rest  = 14..;
}

impl ethernet {
    /// View a byte slice as a frame, without any length check.
    pub fn new_unchecked(data: &[u8]) -> &Self {
        Self::__from_macro_new_unchecked(data)
    }

    /// View a mutable byte slice as a frame, without any length check.
    pub fn new_unchecked_mut(data: &mut [u8]) -> &mut Self {
        Self::__from_macro_new_unchecked_mut(data)
    }

    /// View a byte slice as a frame if it holds at least a complete header.
    pub fn new_checked(data: &[u8]) -> Result<&Self> {
        if data.len() < field::PAYLOAD.start {
            return Err(Error::Truncated);
        }
        Ok(Self::new_unchecked(data))
    }

    /// The size of a frame carrying `payload_len` bytes.
    pub fn buffer_len(payload_len: usize) -> usize {
        field::PAYLOAD.start + payload_len
    }

    pub fn dst_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::DESTINATION])
    }

    pub fn src_addr(&self) -> Address {
        Address::from_bytes(&self.0[field::SOURCE])
    }

    pub fn ethertype(&self) -> EtherType {
        EtherType::from(NetworkEndian::read_u16(&self.0[field::ETHERTYPE]))
    }

    pub fn set_dst_addr(&mut self, value: Address) {
        self.0[field::DESTINATION].copy_from_slice(value.as_bytes())
    }

    pub fn set_src_addr(&mut self, value: Address) {
        self.0[field::SOURCE].copy_from_slice(value.as_bytes())
    }

    pub fn set_ethertype(&mut self, value: EtherType) {
        NetworkEndian::write_u16(&mut self.0[field::ETHERTYPE], value.into())
    }

    pub fn payload_slice(&self) -> &[u8] {
        &self.0[field::PAYLOAD]
    }

    pub fn payload_mut_slice(&mut self) -> &mut [u8] {
        &mut self.0[field::PAYLOAD]
    }
}

/// The header fields of a frame.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Repr {
    pub src_addr:    Address,
    pub dst_addr:    Address,
    pub ethertype:   EtherType,
}

impl Repr {
    /// Read the header of a frame that passed `new_checked`.
    pub fn parse(frame: &ethernet) -> Repr {
        Repr {
            src_addr: frame.src_addr(),
            dst_addr: frame.dst_addr(),
            ethertype: frame.ethertype(),
        }
    }

    /// Write the header fields, leaving the payload untouched.
    pub fn emit(&self, frame: &mut ethernet) {
        frame.set_dst_addr(self.dst_addr);
        frame.set_src_addr(self.src_addr);
        frame.set_ethertype(self.ethertype);
    }
}

/// A frame as it sits in the transmit queue of an interface.
///
/// Only the header is interpreted. The payload is whatever the upper layer serialized, an IPv4
/// datagram or an ARP message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    repr: Repr,
    payload: Vec<u8>,
}

impl Frame {
    pub fn new(repr: Repr, payload: Vec<u8>) -> Self {
        Frame { repr, payload }
    }

    /// Copy a frame out of received octets.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let frame = ethernet::new_checked(data)?;
        Ok(Frame {
            repr: Repr::parse(frame),
            payload: frame.payload_slice().to_vec(),
        })
    }

    /// The octets to put on the link.
    pub fn serialize(&self) -> Vec<u8> {
        let mut octets = vec![0; ethernet::buffer_len(self.payload.len())];
        let frame = ethernet::new_unchecked_mut(&mut octets);
        self.repr.emit(frame);
        frame.payload_mut_slice().copy_from_slice(&self.payload);
        octets
    }

    pub fn repr(&self) -> Repr {
        self.repr
    }

    pub fn dst_addr(&self) -> Address {
        self.repr.dst_addr
    }

    pub fn src_addr(&self) -> Address {
        self.repr.src_addr
    }

    pub fn ethertype(&self) -> EtherType {
        self.repr.ethertype
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {} ({}, {} bytes)",
            self.src_addr(), self.dst_addr(), self.ethertype(), self.payload.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const STATION: Address = Address([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]);
    const PEER: Address = Address([0x02, 0x00, 0x5e, 0x10, 0x00, 0x02]);

    /// An ARP frame from `PEER` to `STATION` with a four byte payload.
    static ARP_FRAME: [u8; 18] =
        [0x02, 0x00, 0x5e, 0x10, 0x00, 0x01,
         0x02, 0x00, 0x5e, 0x10, 0x00, 0x02,
         0x08, 0x06,
         0xde, 0xad, 0xbe, 0xef];

    #[test]
    fn read_fields() {
        let frame = ethernet::new_checked(&ARP_FRAME[..]).unwrap();
        assert_eq!(frame.dst_addr(), STATION);
        assert_eq!(frame.src_addr(), PEER);
        assert_eq!(frame.ethertype(), EtherType::Arp);
        assert_eq!(frame.payload_slice(), &[0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn owned_frame() {
        let frame = Frame::new(Repr {
            src_addr: PEER,
            dst_addr: STATION,
            ethertype: EtherType::Arp,
        }, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(frame.serialize(), &ARP_FRAME[..]);
        assert_eq!(Frame::parse(&ARP_FRAME[..]), Ok(frame));
    }

    #[test]
    fn header_only() {
        assert_eq!(Frame::parse(&ARP_FRAME[..13]), Err(Error::Truncated));
        let empty = Frame::parse(&ARP_FRAME[..14]).unwrap();
        assert!(empty.payload().is_empty());
        assert_eq!(empty.serialize(), &ARP_FRAME[..14]);
    }

    #[test]
    fn unknown_ethertype() {
        let mut octets = ARP_FRAME.to_vec();
        ethernet::new_unchecked_mut(&mut octets).set_ethertype(EtherType::Unknown(0x86dd));
        let frame = Frame::parse(&octets).unwrap();
        assert_eq!(frame.ethertype(), EtherType::Unknown(0x86dd));
        assert_eq!(format!("{}", frame.ethertype()), "ethertype 0x86dd");
    }

    #[test]
    fn address_text() {
        let addr: Address = "02:00:5e:10:00:01".parse().unwrap();
        assert_eq!(addr, STATION);
        assert_eq!(format!("{}", addr), "02:00:5e:10:00:01");
        assert_eq!("02:00:5e:10:00".parse::<Address>(), Err(ParseAddressError));
        assert_eq!("02:00:5e:10:00:01:07".parse::<Address>(), Err(ParseAddressError));
        assert_eq!("02:00:5e:1g:00:01".parse::<Address>(), Err(ParseAddressError));
        assert_eq!("02:00:5e::00:01".parse::<Address>(), Err(ParseAddressError));
        assert!(Address::BROADCAST.is_broadcast());
        assert!(!addr.is_broadcast());
    }
}
