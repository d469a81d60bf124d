//! # OxiHuff: Pure Rust Static Huffman Compression
//!
//! This crate compresses a byte stream with a classic static Huffman code and
//! reconstructs it losslessly from a self-describing artifact.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Self-describing**: The code tree travels in the artifact header
//! - **Exact termination**: The payload bit count is stored, so padding bits
//!   are never decoded as data
//! - **Deterministic**: Ties are broken by byte value, so the same input
//!   always produces the same artifact
//! - **Legacy layout**: Reads and writes the older padding-terminated layout
//!
//! ## Artifact Layout
//!
//! ```text
//! <serialized-tree> '|' <bit-count: u64 LE> <packed-bitstream>
//! ```
//!
//! The tree is written in pre-order: `'1' symbol` for a leaf, `'0' left right`
//! for an internal node. The body packs every input byte's code MSB-first and
//! zero-pads the final byte.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff::{compress_bytes, decompress_bytes};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress_bytes(original).unwrap();
//!
//! // Decompress
//! let decompressed = decompress_bytes(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Single-symbol inputs
//!
//! An input made of one repeated byte still gets a one-bit code: the tree
//! builder adds a zero-weight dummy sibling.
//!
//! ```rust
//! use oxihuff::{compress_bytes, decompress_bytes};
//!
//! let compressed = compress_bytes(b"XXX").unwrap();
//! assert_eq!(decompress_bytes(&compressed).unwrap(), b"XXX");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod code_table;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod fs;
pub mod inspect;
pub mod tree;
pub mod tree_codec;

pub use code_table::{CodeTable, HuffmanCode};
pub use config::{ArtifactLayout, HuffmanConfig};
pub use decoder::{DecompressionReport, HuffmanDecoder};
pub use encoder::{CompressionReport, HuffmanEncoder};
pub use frequency::ByteFrequency;
pub use fs::{compress_file, decompress_file};
pub use inspect::{ArtifactInfo, SymbolCode, inspect};
pub use oxihuff_core::{OxiHuffError, Result};
pub use tree::{HuffmanTree, Node, NodeId};
pub use tree_codec::{deserialize_tree, read_tree, serialize_tree, write_tree};

use std::io::{Read, Write};

/// Compress everything `input` yields into `output` (counted layout).
///
/// # Example
///
/// ```rust
/// use oxihuff::compress;
///
/// let mut artifact = Vec::new();
/// let report = compress(&b"AAABBC"[..], &mut artifact).unwrap();
/// assert_eq!(report.original_size, 6);
/// assert_eq!(report.compressed_size, artifact.len() as u64);
/// ```
pub fn compress<R: Read, W: Write>(input: R, output: W) -> Result<CompressionReport> {
    HuffmanEncoder::new(HuffmanConfig::DEFAULT).encode(input, output)
}

/// Decompress a counted-layout artifact from `input` into `output`.
///
/// # Example
///
/// ```rust
/// use oxihuff::{compress_bytes, decompress};
///
/// let artifact = compress_bytes(b"hello, world").unwrap();
/// let mut restored = Vec::new();
/// decompress(&artifact[..], &mut restored).unwrap();
/// assert_eq!(restored, b"hello, world");
/// ```
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<DecompressionReport> {
    HuffmanDecoder::new(HuffmanConfig::DEFAULT).decode(input, output)
}

/// Compress a byte slice (convenience function).
///
/// This is equivalent to `HuffmanEncoder::new(HuffmanConfig::DEFAULT).encode_bytes(data)`.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::new(HuffmanConfig::DEFAULT).encode_bytes(data)
}

/// Decompress an in-memory artifact (convenience function).
///
/// This is equivalent to `HuffmanDecoder::new(HuffmanConfig::DEFAULT).decode_bytes(data)`.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::new(HuffmanConfig::DEFAULT).decode_bytes(data)
}
