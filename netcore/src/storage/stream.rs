use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::Sink;

/// An in-order byte stream with bounded memory.
///
/// The writer appends at the end and the reader consumes from the front. At most `capacity`
/// bytes are held at any time. Writes that do not fit are cut short, and the writer is told how
/// much was taken.
///
/// ```rust
/// use netcore::storage::ByteStream;
///
/// let mut stream = ByteStream::new(4);
/// assert_eq!(stream.write(b"hello"), 4);
/// assert_eq!(stream.read(2), b"he");
/// stream.end_input();
/// assert!(!stream.eof());
/// assert_eq!(stream.read(8), b"ll");
/// assert!(stream.eof());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteStream {
    buffer: VecDeque<u8>,
    capacity: usize,
    input_ended: bool,
    bytes_written: usize,
    bytes_read: usize,
    error: bool,
}

impl ByteStream {
    /// Create an empty stream holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        ByteStream {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            ..ByteStream::default()
        }
    }

    /// Write as many bytes of `data` as fit, returning how many were accepted.
    ///
    /// Nothing is accepted once the input has ended.
    pub fn write(&mut self, data: &[u8]) -> usize {
        if self.input_ended {
            return 0;
        }

        let accepted = data.len().min(self.remaining_capacity());
        self.buffer.extend(&data[..accepted]);
        self.bytes_written += accepted;
        accepted
    }

    /// The number of additional bytes the stream can hold.
    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    /// The maximum number of bytes the stream holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Signal that no more bytes will be written.
    pub fn end_input(&mut self) {
        self.input_ended = true;
    }

    /// Mark the stream as failed.
    pub fn set_error(&mut self) {
        self.error = true;
    }

    /// Copy up to `len` bytes from the front without consuming them.
    pub fn peek_output(&self, len: usize) -> Vec<u8> {
        self.buffer.iter().take(len).copied().collect()
    }

    /// Discard up to `len` bytes from the front.
    pub fn pop_output(&mut self, len: usize) {
        let len = len.min(self.buffer.len());
        self.buffer.drain(..len);
        self.bytes_read += len;
    }

    /// Consume and return up to `len` bytes from the front.
    pub fn read(&mut self, len: usize) -> Vec<u8> {
        let data = self.peek_output(len);
        self.pop_output(data.len());
        data
    }

    /// If the writer has ended the input.
    pub fn input_ended(&self) -> bool {
        self.input_ended
    }

    /// The number of bytes that can currently be read.
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// If there is nothing to read right now.
    pub fn buffer_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// If the input has ended and everything was read.
    pub fn eof(&self) -> bool {
        self.input_ended && self.buffer.is_empty()
    }

    /// The total number of bytes ever written.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// The total number of bytes ever read.
    pub fn bytes_read(&self) -> usize {
        self.bytes_read
    }

    /// If the stream was marked as failed.
    pub fn error(&self) -> bool {
        self.error
    }
}

impl Sink for ByteStream {
    fn write(&mut self, data: &[u8]) -> usize {
        ByteStream::write(self, data)
    }

    fn buffered(&self) -> usize {
        self.buffer_size()
    }

    fn close(&mut self) {
        self.end_input()
    }
}
