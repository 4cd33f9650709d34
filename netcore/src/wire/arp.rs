use core::fmt;
use alloc::vec;
use alloc::vec::Vec;
use byteorder::{ByteOrder, NetworkEndian};

use super::{Error, Result};
use super::{EthernetAddress, EthernetProtocol, Ipv4Address};

enum_with_unknown! {
    /// The link type of the hardware addresses in a message.
    pub enum Hardware(u16) {
        Ethernet = 1
    }
}

enum_with_unknown! {
    /// Whether a message asks for an address or answers.
    pub enum Operation(u16) {
        Request = 1,
        Reply = 2
    }
}

byte_wrapper! {
    /// The octets of an ARP message that maps IPv4 to Ethernet addresses.
    ///
    /// The generic message format allows other address sizes. Since those are never resolved,
    /// the fields are at the fixed offsets of the Ethernet and IPv4 layout and `Repr::parse`
    /// refuses any message whose length fields disagree.
    #[derive(Debug, PartialEq, Eq)]
    pub struct arp([u8]);
}

mod field {
    use crate::wire::field::Field;

    pub(crate) const HTYPE: Field = 0..2;
    pub(crate) const PTYPE: Field = 2..4;
    pub(crate) const HLEN:  usize = 4;
    pub(crate) const PLEN:  usize = 5;
    pub(crate) const OPER:  Field = 6..8;
    pub(crate) const SHA:   Field = 8..14;
    pub(crate) const SPA:   Field = 14..18;
    pub(crate) const THA:   Field = 18..24;
    pub(crate) const TPA:   Field = 24..28;
}

/// The size of a message for Ethernet and IPv4.
const MESSAGE_LEN: usize = field::TPA.end;

impl arp {
    /// View a byte slice as a message, without any length check.
    pub fn new_unchecked(data: &[u8]) -> &arp {
        Self::__from_macro_new_unchecked(data)
    }

    /// View a mutable byte slice as a message, without any length check.
    pub fn new_unchecked_mut(data: &mut [u8]) -> &mut arp {
        Self::__from_macro_new_unchecked_mut(data)
    }

    /// View a byte slice as a message if it is long enough for every field.
    pub fn new_checked(data: &[u8]) -> Result<&arp> {
        if data.len() < MESSAGE_LEN {
            return Err(Error::Truncated);
        }
        Ok(Self::new_unchecked(data))
    }

    pub fn hardware_type(&self) -> Hardware {
        Hardware::from(NetworkEndian::read_u16(&self.0[field::HTYPE]))
    }

    pub fn protocol_type(&self) -> EthernetProtocol {
        EthernetProtocol::from(NetworkEndian::read_u16(&self.0[field::PTYPE]))
    }

    pub fn hardware_len(&self) -> u8 {
        self.0[field::HLEN]
    }

    pub fn protocol_len(&self) -> u8 {
        self.0[field::PLEN]
    }

    pub fn operation(&self) -> Operation {
        Operation::from(NetworkEndian::read_u16(&self.0[field::OPER]))
    }

    pub fn source_hardware_addr(&self) -> EthernetAddress {
        EthernetAddress::from_bytes(&self.0[field::SHA])
    }

    pub fn source_protocol_addr(&self) -> Ipv4Address {
        Ipv4Address::from_bytes(&self.0[field::SPA])
    }

    pub fn target_hardware_addr(&self) -> EthernetAddress {
        EthernetAddress::from_bytes(&self.0[field::THA])
    }

    pub fn target_protocol_addr(&self) -> Ipv4Address {
        Ipv4Address::from_bytes(&self.0[field::TPA])
    }

    pub fn set_operation(&mut self, value: Operation) {
        NetworkEndian::write_u16(&mut self.0[field::OPER], value.into())
    }

    /// Fill in the fixed part announcing Ethernet and IPv4 addresses.
    pub fn set_ethernet_ipv4(&mut self) {
        NetworkEndian::write_u16(&mut self.0[field::HTYPE], Hardware::Ethernet.into());
        NetworkEndian::write_u16(&mut self.0[field::PTYPE], EthernetProtocol::Ipv4.into());
        self.0[field::HLEN] = field::SHA.len() as u8;
        self.0[field::PLEN] = field::SPA.len() as u8;
    }

    pub fn set_source(&mut self, hardware_addr: EthernetAddress, protocol_addr: Ipv4Address) {
        self.0[field::SHA].copy_from_slice(hardware_addr.as_bytes());
        self.0[field::SPA].copy_from_slice(protocol_addr.as_bytes());
    }

    pub fn set_target(&mut self, hardware_addr: EthernetAddress, protocol_addr: Ipv4Address) {
        self.0[field::THA].copy_from_slice(hardware_addr.as_bytes());
        self.0[field::TPA].copy_from_slice(protocol_addr.as_bytes());
    }
}

/// A decoded ARP message.
///
/// Only the Ethernet and IPv4 combination is understood, which is all that is needed to resolve
/// next hops on an Ethernet link.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Repr {
    EthernetIpv4 {
        operation: Operation,
        source_hardware_addr: EthernetAddress,
        source_protocol_addr: Ipv4Address,
        target_hardware_addr: EthernetAddress,
        target_protocol_addr: Ipv4Address,
    },
}

impl Repr {
    /// Decode a request or reply.
    ///
    /// Any other operation, and messages for other address types, are `Error::Unrecognized`.
    pub fn parse(packet: &arp) -> Result<Repr> {
        let ethernet_ipv4 = packet.hardware_type() == Hardware::Ethernet
            && packet.protocol_type() == EthernetProtocol::Ipv4
            && usize::from(packet.hardware_len()) == field::SHA.len()
            && usize::from(packet.protocol_len()) == field::SPA.len();
        if !ethernet_ipv4 {
            return Err(Error::Unrecognized);
        }

        match packet.operation() {
            operation @ Operation::Request | operation @ Operation::Reply => {
                Ok(Repr::EthernetIpv4 {
                    operation,
                    source_hardware_addr: packet.source_hardware_addr(),
                    source_protocol_addr: packet.source_protocol_addr(),
                    target_hardware_addr: packet.target_hardware_addr(),
                    target_protocol_addr: packet.target_protocol_addr(),
                })
            },
            Operation::Unknown(_) => Err(Error::Unrecognized),
        }
    }

    /// Decode the payload of an ARP frame.
    pub fn parse_bytes(data: &[u8]) -> Result<Repr> {
        Repr::parse(arp::new_checked(data)?)
    }

    /// A broadcast question for the owner of `target`.
    ///
    /// The target hardware address, which is the answer sought, is all zeroes.
    pub fn request(
        source_hardware_addr: EthernetAddress,
        source_protocol_addr: Ipv4Address,
        target: Ipv4Address,
    ) -> Repr {
        Repr::EthernetIpv4 {
            operation: Operation::Request,
            source_hardware_addr,
            source_protocol_addr,
            target_hardware_addr: EthernetAddress::UNSPECIFIED,
            target_protocol_addr: target,
        }
    }

    pub fn operation(&self) -> Operation {
        let Repr::EthernetIpv4 { operation, .. } = *self;
        operation
    }

    pub fn source_hardware_addr(&self) -> EthernetAddress {
        let Repr::EthernetIpv4 { source_hardware_addr, .. } = *self;
        source_hardware_addr
    }

    pub fn source_protocol_addr(&self) -> Ipv4Address {
        let Repr::EthernetIpv4 { source_protocol_addr, .. } = *self;
        source_protocol_addr
    }

    pub fn target_hardware_addr(&self) -> EthernetAddress {
        let Repr::EthernetIpv4 { target_hardware_addr, .. } = *self;
        target_hardware_addr
    }

    pub fn target_protocol_addr(&self) -> Ipv4Address {
        let Repr::EthernetIpv4 { target_protocol_addr, .. } = *self;
        target_protocol_addr
    }

    /// The size of the encoded message.
    pub fn buffer_len(&self) -> usize {
        MESSAGE_LEN
    }

    /// Encode into a buffer of at least `buffer_len` bytes.
    pub fn emit(&self, packet: &mut arp) {
        let Repr::EthernetIpv4 {
            operation,
            source_hardware_addr,
            source_protocol_addr,
            target_hardware_addr,
            target_protocol_addr,
        } = *self;

        packet.set_ethernet_ipv4();
        packet.set_operation(operation);
        packet.set_source(source_hardware_addr, source_protocol_addr);
        packet.set_target(target_hardware_addr, target_protocol_addr);
    }

    /// Encode into a new buffer, to become the payload of a frame.
    pub fn serialize(&self) -> Vec<u8> {
        let mut octets = vec![0; self.buffer_len()];
        self.emit(arp::new_unchecked_mut(&mut octets));
        octets
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.operation() {
            Operation::Request => write!(f, "ARP who-has {} tell {} ({})",
                self.target_protocol_addr(),
                self.source_protocol_addr(),
                self.source_hardware_addr()),
            _ => write!(f, "ARP {} is-at {} (to {})",
                self.source_protocol_addr(),
                self.source_hardware_addr(),
                self.target_protocol_addr()),
        }
    }
}
