//! Bit-level I/O for Huffman payloads.
//!
//! This module provides `BitReader` and `BitWriter` for moving variable-length
//! codes in and out of byte streams.
//!
//! # Bit Ordering
//!
//! OxiHuff packs bits MSB-first (Most Significant Bit first): the first bit of
//! the stream lands in bit 7 of the first byte. When the bit count is not a
//! multiple of 8, the final byte is left-shifted so the real bits occupy the
//! high-order positions and the low-order positions are zero padding.
//!
//! The writer never records how many padding bits it added. Callers that
//! need an exact end position must store [`BitWriter::bits_written`]
//! themselves.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! // Writing bits
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();  // Write 3 bits
//!     writer.write_bits(0b1100, 4).unwrap(); // Write 4 bits
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! // Reading bits
//! let mut reader = BitReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b101));
//! assert_eq!(reader.read_bits(4).unwrap(), Some(0b1100));
//! ```

use crate::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};

/// Size of the internal byte buffers.
const CHUNK_SIZE: usize = 8192;

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader in chunks and handed out one
/// bit at a time, most significant bit first. Read failures are reported as
/// [`OxiHuffError::UnreadableInput`].
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Byte chunk read ahead from `reader`.
    chunk: Vec<u8>,
    /// Position of the current byte in `chunk`.
    chunk_pos: usize,
    /// Current byte being consumed.
    current: u8,
    /// Number of unread bits left in `current`.
    bits_left: u8,
    /// Total bits read.
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk: Vec::new(),
            chunk_pos: 0,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
        }
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Bytes that were already read ahead are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Load the next byte into `current`. Returns `false` at end of stream.
    fn next_byte(&mut self) -> Result<bool> {
        if self.chunk_pos >= self.chunk.len() {
            self.chunk.resize(CHUNK_SIZE, 0);
            let n = loop {
                match self.reader.read(&mut self.chunk) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(OxiHuffError::unreadable(e)),
                }
            };
            self.chunk.truncate(n);
            self.chunk_pos = 0;
            if n == 0 {
                return Ok(false);
            }
        }

        self.current = self.chunk[self.chunk_pos];
        self.chunk_pos += 1;
        self.bits_left = 8;
        Ok(true)
    }

    /// Read a single bit, or `None` at end of stream.
    #[inline]
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 && !self.next_byte()? {
            return Ok(None);
        }

        self.bits_left -= 1;
        self.total_bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1 == 1))
    }

    /// Read up to 32 bits, first bit in the most significant position.
    ///
    /// Returns `None` if the stream ends before `count` bits are available;
    /// the bits consumed up to that point are lost.
    pub fn read_bits(&mut self, count: u8) -> Result<Option<u32>> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }

    /// Check if the reader is at end of stream.
    pub fn is_eof(&mut self) -> Result<bool> {
        if self.bits_left > 0 {
            return Ok(false);
        }
        if !self.next_byte()? {
            return Ok(true);
        }
        // Put the byte back: it has not been consumed yet.
        self.chunk_pos -= 1;
        self.bits_left = 0;
        Ok(false)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits MSB-first and streams completed bytes into a
/// chunk buffer that is handed to the underlying writer whenever it fills.
/// Call [`flush`](Self::flush) or [`finish`](Self::finish) when done to pad
/// and write the final partial byte. Write failures are reported as
/// [`OxiHuffError::UnwritableOutput`].
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Completed bytes not yet handed to `writer`.
    chunk: Vec<u8>,
    /// Partial byte being filled from the MSB down.
    current: u8,
    /// Number of bits in `current`.
    bits_in_current: u8,
    /// Total bits written (excluding padding).
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk: Vec::with_capacity(CHUNK_SIZE),
            current: 0,
            bits_in_current: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of logical bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Get the number of bytes produced so far, including a pending
    /// partial byte.
    pub fn bytes_written(&self) -> u64 {
        self.total_bits_written.div_ceil(8)
    }

    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.chunk.push(byte);
        if self.chunk.len() >= CHUNK_SIZE {
            self.drain_chunk()?;
        }
        Ok(())
    }

    fn drain_chunk(&mut self) -> Result<()> {
        if !self.chunk.is_empty() {
            self.writer
                .write_all(&self.chunk)
                .map_err(OxiHuffError::unwritable)?;
            self.chunk.clear();
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.current = (self.current << 1) | bit as u8;
        self.bits_in_current += 1;
        self.total_bits_written += 1;

        if self.bits_in_current == 8 {
            let byte = self.current;
            self.current = 0;
            self.bits_in_current = 0;
            self.push_byte(byte)?;
        }
        Ok(())
    }

    /// Write up to 32 bits, most significant of the `count` bits first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Pad the partial byte with zero bits and write everything buffered.
    ///
    /// Padding is not counted in [`bits_written`](Self::bits_written).
    pub fn flush(&mut self) -> Result<()> {
        if self.bits_in_current > 0 {
            let byte = self.current << (8 - self.bits_in_current);
            self.current = 0;
            self.bits_in_current = 0;
            self.chunk.push(byte);
        }
        self.drain_chunk()?;
        self.writer.flush().map_err(OxiHuffError::unwritable)
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
