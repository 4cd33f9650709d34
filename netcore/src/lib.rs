//! The forwarding core of a small user-space network stack.
//!
//! ## Table of contents
//!
//! 1. [Overview](#overview)
//! 2. [Driving the components](#driving-the-components)
//! 3. [The wire module](wire/index.html)
//! 4. [The layers](layer/index.html)
//!    1. [Address resolution](layer/arp/index.html)
//!    1. [Network interfaces](layer/eth/index.html)
//!    1. [Routing](layer/ip/index.html)
//! 5. [The storage module](storage/index.html)
//!
//! ## Overview
//!
//! Three mechanisms make up the crate, each usable and testable on its own:
//!
//! * An Ethernet interface that maps next-hop IPv4 addresses to hardware addresses with ARP,
//!   holding back datagrams until their neighbor answers.
//! * A router with a static longest-prefix-match table that forwards datagrams between the
//!   interfaces it owns.
//! * A reassembler that turns out-of-order byte ranges into an ordered stream under a fixed memory
//!   bound.
//!
//! ## Driving the components
//!
//! Nothing in here runs on its own. There are no background timers and no blocking calls: a
//! single driver feeds frames into interfaces, hands out their outgoing frames, calls `tick` with
//! the elapsed milliseconds and asks the router to `route` whatever has arrived. Every operation
//! runs to completion before it returns. Failures on the data path (malformed frames, missing
//! routes, expired TTLs) are dropped silently rather than reported, the same way a real link would
//! lose them.
//!
//! ```
//! use netcore::layer::eth::Interface;
//! use netcore::wire::{EthernetAddress, Ipv4Address};
//!
//! let mut iface = Interface::new(
//!     EthernetAddress([0x02, 0, 0, 0, 0, 1]),
//!     Ipv4Address::new(10, 0, 0, 1));
//! iface.tick(1_000);
//! assert!(iface.pop_frame().is_none());
//! ```
#![warn(missing_docs)]
#![warn(unreachable_pub)]

// tests should be able to use `std`
#![cfg_attr(all(
    not(feature = "std"),
    not(test)),
no_std)]

/// The `alloc` crate.
///
/// Queues and maps of the components live on the heap, the crate requires an allocator.
pub extern crate alloc;

#[macro_use] mod macros;
pub mod layer;
pub mod storage;
pub mod time;
pub mod wire;

pub use layer::eth::{Interface as NetworkInterface, QueuedInterface};
pub use layer::ip::Router;
pub use storage::{ByteStream, Reassembler};
