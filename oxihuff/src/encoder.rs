//! Huffman encoder (compression).

use crate::code_table::CodeTable;
use crate::config::{DELIMITER, HuffmanConfig};
use crate::frequency::ByteFrequency;
use crate::tree::HuffmanTree;
use crate::tree_codec::write_tree;
use oxihuff_core::BitWriter;
use oxihuff_core::error::{OxiHuffError, Result};
use serde::Serialize;
use std::io::{Read, Write};
use tracing::{debug, info};

/// Size statistics of one compression.
///
/// Informational only; nothing in the artifact depends on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    /// Bytes read from the input.
    pub original_size: u64,
    /// Bytes written to the output (header and body).
    pub compressed_size: u64,
    /// `compressed_size / original_size * 100`.
    pub ratio: f64,
    /// Payload bits, excluding padding.
    pub bit_count: u64,
    /// Number of distinct byte values in the input.
    pub distinct_symbols: usize,
}

impl CompressionReport {
    fn new(original_size: u64, compressed_size: u64, bit_count: u64, distinct: usize) -> Self {
        let ratio = if original_size == 0 {
            0.0
        } else {
            compressed_size as f64 / original_size as f64 * 100.0
        };
        Self {
            original_size,
            compressed_size,
            ratio,
            bit_count,
            distinct_symbols: distinct,
        }
    }

    /// Space saved relative to the input, in percent (negative if the
    /// artifact is larger than the input).
    pub fn savings(&self) -> f64 {
        100.0 - self.ratio
    }
}

/// Huffman encoder for compression.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanEncoder {
    config: HuffmanConfig,
}

impl HuffmanEncoder {
    /// Create a new encoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Self {
        Self { config }
    }

    /// The encoder configuration.
    pub fn config(&self) -> HuffmanConfig {
        self.config
    }

    /// Compress everything `input` yields into `output`.
    ///
    /// # Algorithm
    ///
    /// 1. Read the whole input and count byte frequencies
    /// 2. Build the Huffman tree and derive the code table
    /// 3. Write the serialized tree and the delimiter
    /// 4. Write the payload bit count (counted layout only)
    /// 5. Stream every input byte's code into the packed body
    ///
    /// Nothing is written when the input is empty or unreadable. A failing
    /// output leaves whatever was already written in place.
    pub fn encode<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<CompressionReport> {
        let (freq, data) = ByteFrequency::from_reader(input)?;
        let tree = HuffmanTree::build(&freq)?;
        let table = CodeTable::from_tree(&tree)?;
        let bit_count = table.encoded_bits(&freq);

        let tree_size = write_tree(&tree, &mut output)?;
        output
            .write_all(&[DELIMITER])
            .map_err(OxiHuffError::unwritable)?;
        if self.config.stores_bit_count() {
            output
                .write_all(&bit_count.to_le_bytes())
                .map_err(OxiHuffError::unwritable)?;
        }
        let header_size = tree_size + self.config.header_trailer_size() as u64;
        debug!(
            header_size,
            bit_count,
            max_code_length = table.max_code_length(),
            "wrote artifact header"
        );

        let mut writer = BitWriter::new(output);
        for &byte in &data {
            let code = table
                .get(byte)
                .ok_or_else(|| OxiHuffError::malformed_tree(tree.root()))?;
            code.write_to(&mut writer)?;
        }
        debug_assert_eq!(writer.bits_written(), bit_count);
        let body_size = writer.bytes_written();
        writer.finish()?;

        let report = CompressionReport::new(
            data.len() as u64,
            header_size + body_size,
            bit_count,
            freq.distinct(),
        );
        info!(
            original = report.original_size,
            compressed = report.compressed_size,
            ratio = format_args!("{:.2}%", report.ratio),
            "compression complete"
        );
        Ok(report)
    }

    /// Compress a byte slice into a new buffer.
    pub fn encode_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(data, &mut out)?;
        Ok(out)
    }
}
