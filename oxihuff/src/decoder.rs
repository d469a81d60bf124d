//! Huffman decoder (decompression).

use crate::config::{BIT_COUNT_SIZE, DELIMITER, HuffmanConfig};
use crate::tree::{HuffmanTree, Node};
use crate::tree_codec::read_tree;
use oxihuff_core::BitReader;
use oxihuff_core::error::{OxiHuffError, Result};
use serde::Serialize;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use tracing::{debug, info, warn};

/// Size statistics of one decompression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecompressionReport {
    /// Bytes of the artifact consumed (header and body).
    pub compressed_size: u64,
    /// Bytes written to the output.
    pub decompressed_size: u64,
    /// Payload bits consumed, including padding in the legacy layout.
    pub bits_decoded: u64,
}

/// Parsed artifact header.
#[derive(Debug, Clone)]
pub(crate) struct ArtifactHeader {
    pub(crate) tree: HuffmanTree,
    /// Payload bit count (counted layout only).
    pub(crate) bit_count: Option<u64>,
    /// Bytes occupied by the tree, delimiter and bit-count field.
    pub(crate) size: u64,
}

/// Read tree, delimiter and (counted layout) bit count from the artifact head.
pub(crate) fn read_header<R: Read>(reader: &mut R, config: HuffmanConfig) -> Result<ArtifactHeader> {
    let (tree, tree_size) = read_tree(reader)?;

    let mut delimiter = [0u8; 1];
    read_field(reader, &mut delimiter, "delimiter after the tree")?;
    if delimiter[0] != DELIMITER {
        return Err(OxiHuffError::invalid_format(format!(
            "expected delimiter {DELIMITER:#04x} at offset {tree_size}, found {:#04x}",
            delimiter[0]
        )));
    }

    let bit_count = if config.stores_bit_count() {
        let mut field = [0u8; BIT_COUNT_SIZE];
        read_field(reader, &mut field, "payload bit count")?;
        Some(u64::from_le_bytes(field))
    } else {
        None
    };

    let size = tree_size + config.header_trailer_size() as u64;
    debug!(
        header_size = size,
        leaves = tree.leaf_count(),
        ?bit_count,
        "read artifact header"
    );
    Ok(ArtifactHeader {
        tree,
        bit_count,
        size,
    })
}

/// `read_exact` with end of input reported as a format error.
fn read_field<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            OxiHuffError::invalid_format(format!("missing {what}"))
        } else {
            OxiHuffError::unreadable(e)
        }
    })
}

/// Huffman decoder for decompression.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanDecoder {
    config: HuffmanConfig,
}

impl HuffmanDecoder {
    /// Create a new decoder with the given configuration.
    pub fn new(config: HuffmanConfig) -> Self {
        Self { config }
    }

    /// The decoder configuration.
    pub fn config(&self) -> HuffmanConfig {
        self.config
    }

    /// Decompress an artifact from `input` into `output`.
    ///
    /// # Algorithm
    ///
    /// 1. Deserialize the tree from the artifact head
    /// 2. Validate the delimiter
    /// 3. Read the payload bit count (counted layout only)
    /// 4. Walk the tree bit by bit, emitting a byte at every leaf
    ///
    /// In the counted layout decoding stops after exactly the announced
    /// number of bits. In the legacy layout every unpacked bit is walked,
    /// padding included.
    pub fn decode<R: Read, W: Write>(&self, input: R, output: W) -> Result<DecompressionReport> {
        let mut input = BufReader::new(input);
        let header = read_header(&mut input, self.config)?;

        let mut bits = BitReader::new(input);
        let mut out = BufWriter::new(output);
        let written = match header.bit_count {
            Some(bit_count) => decode_counted(&header.tree, &mut bits, bit_count, &mut out)?,
            None => decode_to_end(&header.tree, &mut bits, &mut out)?,
        };
        out.flush().map_err(OxiHuffError::unwritable)?;

        let report = DecompressionReport {
            compressed_size: header.size + bits.bits_read().div_ceil(8),
            decompressed_size: written,
            bits_decoded: bits.bits_read(),
        };
        info!(
            compressed = report.compressed_size,
            decompressed = report.decompressed_size,
            "decompression complete"
        );
        Ok(report)
    }

    /// Decompress an artifact held in memory.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.decode(data, &mut out)?;
        Ok(out)
    }
}

/// Walk state over a tree: where the cursor is and what to emit.
struct TreeWalker<'a> {
    tree: &'a HuffmanTree,
    cursor: usize,
}

impl<'a> TreeWalker<'a> {
    fn new(tree: &'a HuffmanTree) -> Self {
        Self {
            tree,
            cursor: tree.root(),
        }
    }

    fn at_root(&self) -> bool {
        self.cursor == self.tree.root()
    }

    /// Consume one bit. Returns the symbol when a leaf is reached.
    #[inline]
    fn step(&mut self, bit: bool) -> Result<Option<u8>> {
        let next = match *self.tree.node(self.cursor)? {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            // A leaf root: every bit is the reserved one-bit code `0`.
            Node::Leaf { symbol, .. } => {
                if bit {
                    return Err(OxiHuffError::invalid_format(
                        "bit 1 has no meaning for a single-leaf tree",
                    ));
                }
                return Ok(Some(symbol));
            }
        };

        match *self.tree.node(next)? {
            Node::Leaf { symbol, .. } => {
                self.cursor = self.tree.root();
                Ok(Some(symbol))
            }
            Node::Internal { .. } => {
                self.cursor = next;
                Ok(None)
            }
        }
    }
}

fn emit<W: Write>(out: &mut W, symbol: u8) -> Result<()> {
    out.write_all(&[symbol]).map_err(OxiHuffError::unwritable)
}

fn decode_counted<R: Read, W: Write>(
    tree: &HuffmanTree,
    bits: &mut BitReader<R>,
    bit_count: u64,
    out: &mut W,
) -> Result<u64> {
    let mut walker = TreeWalker::new(tree);
    let mut written = 0u64;

    for consumed in 0..bit_count {
        let Some(bit) = bits.read_bit()? else {
            return Err(OxiHuffError::truncated_bitstream(bit_count, consumed));
        };
        if let Some(symbol) = walker.step(bit)? {
            emit(out, symbol)?;
            written += 1;
        }
    }

    if !walker.at_root() {
        return Err(OxiHuffError::invalid_format(
            "bitstream ends in the middle of a code",
        ));
    }
    Ok(written)
}

fn decode_to_end<R: Read, W: Write>(
    tree: &HuffmanTree,
    bits: &mut BitReader<R>,
    out: &mut W,
) -> Result<u64> {
    let mut walker = TreeWalker::new(tree);
    let mut written = 0u64;

    while let Some(bit) = bits.read_bit()? {
        if let Some(symbol) = walker.step(bit)? {
            emit(out, symbol)?;
            written += 1;
        }
    }

    if !walker.at_root() {
        // Padding that stopped mid-path; legacy decoders drop it too.
        warn!(
            bits = bits.bits_read(),
            "legacy bitstream ended inside a code; trailing bits dropped"
        );
    }
    Ok(written)
}
