//! # OxiHuff Core
//!
//! Core components for the OxiHuff Huffman compressor.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and the command-line front end:
//!
//! - [`bitstream`]: MSB-first bit-level I/O for variable-length codes
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! OxiHuff is designed as a layered stack:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     oxihuff CLI (compress, decompress, info)            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Frequencies, Huffman tree, tree codec, pipeline     │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, error types                    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut packed = Vec::new();
//! let mut writer = BitWriter::new(&mut packed);
//! writer.write_bits(0b110, 3).unwrap();
//! writer.finish().unwrap();
//! assert_eq!(packed, vec![0b1100_0000]);
//!
//! let mut reader = BitReader::new(Cursor::new(packed));
//! assert_eq!(reader.read_bits(3).unwrap(), Some(0b110));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{OxiHuffError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiHuffError, Result};
}
