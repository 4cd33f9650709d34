//! The IP layer.
//!
//! Forwarding of IPv4 datagrams between interfaces, based on a static routing table. There is no
//! routing protocol, routes are installed by the user program, and no local delivery: every
//! datagram a [`Router`] picks up from one of its interfaces is sent out again or dropped.
//!
//! ## Structure
//!
//! The [`Routes`] table is an append-only list. A lookup scans all of it and picks the route with
//! the longest matching prefix, where among several routes of equal length the one added first
//! wins. The [`Router`] owns the table and its interfaces, and moves datagrams from the receive
//! queues of the interfaces into the send path of the one the matching route names.
//!
//! ## Dropping datagrams
//!
//! A datagram is dropped silently when there is no matching route or when its time to live would
//! reach zero. Otherwise its time to live is decremented exactly once before it is forwarded.
//!
//! [`Router`]: struct.Router.html
//! [`Routes`]: struct.Routes.html
mod route;
mod router;
#[cfg(test)]
mod tests;

pub use route::{Route, Routes};
pub use router::Router;
