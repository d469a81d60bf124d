//! Error types for OxiHuff operations.
//!
//! Every failure of a compress or decompress call is reported through
//! [`OxiHuffError`]. None of them is recoverable for the current call: the
//! pipeline stops at the first error and hands it back to the caller.

use std::io;
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// The input source is missing, cannot be opened, or failed mid-read.
    #[error("Unreadable input: {0}")]
    UnreadableInput(#[source] io::Error),

    /// The input source yielded zero bytes.
    #[error("Input is empty: nothing to compress")]
    EmptyInput,

    /// The output sink is missing, cannot be opened, or failed mid-write.
    #[error("Unwritable output: {0}")]
    UnwritableOutput(#[source] io::Error),

    /// The serialized tree ended early or contained an invalid marker.
    #[error("Truncated or corrupt tree at offset {offset}: {reason}")]
    TruncatedOrCorruptTree {
        /// Byte offset (from the start of the artifact) of the failure.
        offset: u64,
        /// Description of the problem.
        reason: String,
    },

    /// The header delimiter or bit-count field is missing or mismatched.
    #[error("Invalid compressed format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// The packed body holds fewer bits than the header announces.
    #[error("Truncated bitstream: expected {expected} bits, found {available}")]
    TruncatedBitstream {
        /// Number of payload bits announced by the header.
        expected: u64,
        /// Number of payload bits actually decodable.
        available: u64,
    },

    /// A tree node violates the two-children invariant.
    ///
    /// This is a programming defect, never a consequence of bad input.
    #[error("Malformed Huffman tree: node {node} is missing a child")]
    MalformedTreeInvariant {
        /// Arena index of the offending node.
        node: usize,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create an unreadable input error.
    pub fn unreadable(err: io::Error) -> Self {
        Self::UnreadableInput(err)
    }

    /// Create an unwritable output error.
    pub fn unwritable(err: io::Error) -> Self {
        Self::UnwritableOutput(err)
    }

    /// Create a truncated or corrupt tree error.
    pub fn corrupt_tree(offset: u64, reason: impl Into<String>) -> Self {
        Self::TruncatedOrCorruptTree {
            offset,
            reason: reason.into(),
        }
    }

    /// Create an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a truncated bitstream error.
    pub fn truncated_bitstream(expected: u64, available: u64) -> Self {
        Self::TruncatedBitstream {
            expected,
            available,
        }
    }

    /// Create a malformed tree invariant error.
    pub fn malformed_tree(node: usize) -> Self {
        Self::MalformedTreeInvariant { node }
    }

    /// Whether the error comes from the input side (source or artifact).
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Self::UnwritableOutput(_) | Self::MalformedTreeInvariant { .. }
        )
    }
}
