//! Byte buffers of the transport layer.
//!
//! A [`Reassembler`] receives pieces of a byte stream at arbitrary offsets, in any order and
//! possibly overlapping, and writes them into a [`Sink`] in stream order as soon as they become
//! contiguous. Pieces that arrive early are held back, within a fixed capacity shared with the
//! unread bytes of the sink.
//!
//! The [`ByteStream`] is the bounded in-memory sink that the reassembler writes to by default.
//!
//! [`Reassembler`]: struct.Reassembler.html
//! [`Sink`]: trait.Sink.html
//! [`ByteStream`]: struct.ByteStream.html
mod reassembler;
mod stream;

pub use reassembler::Reassembler;
pub use stream::ByteStream;

/// A bounded consumer of an ordered byte stream.
pub trait Sink {
    /// Append as many bytes as fit, returning how many were accepted.
    ///
    /// A sink that was closed accepts nothing.
    fn write(&mut self, data: &[u8]) -> usize;

    /// The number of bytes written but not yet read by the consumer.
    fn buffered(&self) -> usize;

    /// Signal that the stream has ended.
    fn close(&mut self);
}
