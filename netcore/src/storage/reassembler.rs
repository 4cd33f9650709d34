use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::{ByteStream, Sink};

/// Puts substrings of a byte stream back in order.
///
/// Each substring carries the stream offset of its first byte. Bytes are written to the output
/// sink as soon as everything before them was written, the rest is held back. Held back
/// substrings are merged with their overlapping and adjacent neighbors so that no byte is stored
/// twice.
///
/// The reassembler and its sink share a single `capacity`. Out of order bytes are only kept as
/// long as the unread bytes of the sink plus the held back bytes stay within it, anything beyond
/// that is cut off and has to be sent again.
///
/// ```rust
/// use netcore::storage::Reassembler;
///
/// let mut reassembler = Reassembler::new(10);
/// reassembler.push_substring(b"b", 1, false);
/// reassembler.push_substring(b"a", 0, false);
/// reassembler.push_substring(b"c", 2, true);
///
/// assert_eq!(reassembler.stream_out_mut().read(10), b"abc");
/// assert!(reassembler.stream_out().eof());
/// assert!(reassembler.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reassembler<S = ByteStream> {
    output: S,
    capacity: usize,
    /// The index of the first byte that was not yet written to the output.
    next_index: usize,
    /// Held back substrings by their start index. Never overlapping.
    pending: BTreeMap<usize, Vec<u8>>,
    pending_bytes: usize,
    /// The end of the stream, from the last substring that was marked as such.
    eof_index: Option<usize>,
    closed: bool,
}

impl Reassembler<ByteStream> {
    /// Create a reassembler writing into a new `ByteStream` of the same capacity.
    pub fn new(capacity: usize) -> Self {
        Reassembler::with_sink(ByteStream::new(capacity), capacity)
    }
}

impl<S: Sink> Reassembler<S> {
    /// Create a reassembler writing into an arbitrary sink.
    ///
    /// The sink should not hold more than `capacity` unread bytes itself.
    pub fn with_sink(output: S, capacity: usize) -> Self {
        Reassembler {
            output,
            capacity,
            next_index: 0,
            pending: BTreeMap::new(),
            pending_bytes: 0,
            eof_index: None,
            closed: false,
        }
    }

    /// Receive a substring starting at stream offset `index`.
    ///
    /// When `eof` is set the end of the stream is taken to be the end of this substring,
    /// replacing any end announced before, even one further back. The output is closed once
    /// everything up to the end was written.
    ///
    /// If the output does not accept all bytes that became contiguous, the remainder of a held
    /// back substring is dropped anyway and must be pushed again.
    ///
    /// Bytes that would lie at or beyond offset `usize::MAX` are not addressable and dropped.
    pub fn push_substring(&mut self, data: &[u8], index: usize, eof: bool) {
        let end = index.saturating_add(data.len());
        let data = &data[..end - index];
        if eof {
            self.eof_index = Some(end);
        }

        if index <= self.next_index {
            if end > self.next_index {
                self.write_out(&data[self.next_index - index..]);
                self.assemble();
            }
        } else {
            self.hold_back(data, index);
        }

        if let Some(eof_index) = self.eof_index {
            if !self.closed && self.next_index >= eof_index {
                net_trace!("reassembler: end of stream at {}", eof_index);
                self.output.close();
                self.closed = true;
            }
        }
    }

    /// The number of bytes held back, not yet written to the output.
    pub fn unassembled_bytes(&self) -> usize {
        self.pending_bytes
    }

    /// If no bytes are held back.
    pub fn is_empty(&self) -> bool {
        self.pending_bytes == 0
    }

    /// Alias of [`is_empty`](#method.is_empty).
    pub fn empty(&self) -> bool {
        self.is_empty()
    }

    /// The index of the first byte that was not yet written to the output.
    pub fn first_unassembled(&self) -> usize {
        self.next_index
    }

    /// The shared capacity of the reassembler and its output.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The end of the stream, if it was announced.
    pub fn eof_index(&self) -> Option<usize> {
        self.eof_index
    }

    /// The output of the reassembled stream.
    pub fn stream_out(&self) -> &S {
        &self.output
    }

    /// The output of the reassembled stream, mutably, to read from it.
    pub fn stream_out_mut(&mut self) -> &mut S {
        &mut self.output
    }

    /// Unwrap the output.
    pub fn into_stream_out(self) -> S {
        self.output
    }

    fn write_out(&mut self, data: &[u8]) {
        let written = self.output.write(data);
        net_trace!("reassembler: wrote {} of {} bytes at {}", written, data.len(), self.next_index);
        self.next_index += written;
    }

    /// Write out all held back substrings that the written stream has reached.
    fn assemble(&mut self) {
        loop {
            let start = match self.pending.keys().next() {
                Some(&start) if start <= self.next_index => start,
                _ => break,
            };
            let segment = match self.pending.remove(&start) {
                Some(segment) => segment,
                None => break,
            };
            self.pending_bytes -= segment.len();

            if start.saturating_add(segment.len()) > self.next_index {
                let offset = self.next_index - start;
                self.write_out(&segment[offset..]);
            }
        }
    }

    /// Store a substring that begins after the written stream.
    fn hold_back(&mut self, data: &[u8], index: usize) {
        let mut start = index;
        let mut segment = data.to_vec();

        // Absorb held back substrings starting within or right after this one.
        loop {
            let end = start.saturating_add(segment.len());
            let key = match self.pending.range(start..=end).next() {
                Some((&key, _)) => key,
                None => break,
            };
            let other = match self.pending.remove(&key) {
                Some(other) => other,
                None => break,
            };
            self.pending_bytes -= other.len();

            let other_end = key.saturating_add(other.len());
            if other_end > end {
                segment.extend_from_slice(&other[end - key..]);
            }
        }

        // Absorb the preceding substring, if it reaches this one.
        let previous = self.pending.range(..start).next_back()
            .map(|(&key, other)| (key, key.saturating_add(other.len())));
        if let Some((key, other_end)) = previous {
            if other_end >= start {
                if let Some(mut other) = self.pending.remove(&key) {
                    self.pending_bytes -= other.len();
                    let end = start.saturating_add(segment.len());
                    if other_end < end {
                        other.extend_from_slice(&segment[other_end - start..]);
                    }
                    segment = other;
                    start = key;
                }
            }
        }

        let headroom = self.capacity
            .saturating_sub(self.output.buffered())
            .saturating_sub(self.pending_bytes);
        if segment.len() > headroom {
            net_trace!("reassembler: cut {} bytes at {} to {}", segment.len(), start, headroom);
            segment.truncate(headroom);
        }

        if segment.is_empty() {
            return;
        }

        self.pending_bytes += segment.len();
        self.pending.insert(start, segment);
    }
}
