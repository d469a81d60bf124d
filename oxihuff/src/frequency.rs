//! Byte frequency counting.

use oxihuff_core::error::{OxiHuffError, Result};
use std::io::Read;
use tracing::debug;

/// Occurrence count of every byte value in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteFrequency {
    counts: [u64; 256],
}

impl Default for ByteFrequency {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteFrequency {
    /// Create an empty frequency table.
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count the bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut freq = Self::new();
        for &byte in data {
            freq.counts[byte as usize] += 1;
        }
        freq
    }

    /// Read the whole source once and count its bytes.
    ///
    /// Returns the table together with the bytes read, which the encoder
    /// needs for its second pass. Fails with [`OxiHuffError::EmptyInput`]
    /// when the source yields nothing.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<(Self, Vec<u8>)> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(OxiHuffError::unreadable)?;

        if data.is_empty() {
            return Err(OxiHuffError::EmptyInput);
        }

        let freq = Self::from_bytes(&data);
        debug!(
            bytes = data.len(),
            distinct = freq.distinct(),
            "counted byte frequencies"
        );
        Ok((freq, data))
    }

    /// Record one occurrence of `symbol`.
    pub fn add(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Record `count` occurrences of `symbol`.
    pub fn add_count(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] += count;
    }

    /// Occurrences of `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Whether no byte has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols and their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }
}
