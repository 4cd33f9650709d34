//! Address resolution state.
//!
//! Restricted to what an Ethernet interface needs to deliver IPv4 datagrams to a next hop: a
//! cache of resolved neighbors and the set of addresses that have an unanswered request out.
//! Sending and answering the messages themselves is done by the [interface].
//!
//! [interface]: ../eth/struct.Interface.html
mod neighbor;

pub use neighbor::{
    Neighbor,
    Cache as NeighborCache,
};
