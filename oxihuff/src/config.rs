//! Huffman artifact configuration (counted and legacy layouts).

use serde::Serialize;

/// Marker byte preceding a leaf (followed by the raw symbol byte).
pub const LEAF_MARKER: u8 = b'1';

/// Marker byte preceding an internal node (followed by two subtrees).
pub const INTERNAL_MARKER: u8 = b'0';

/// Byte separating the serialized tree from the body.
pub const DELIMITER: u8 = b'|';

/// Width in bytes of the payload bit-count field of the counted layout.
pub const BIT_COUNT_SIZE: usize = 8;

/// How the body following the delimiter is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactLayout {
    /// `tree '|' bit_count(u64 LE) packed_bits`.
    ///
    /// Decoding stops after exactly `bit_count` bits, so padding is never
    /// interpreted as data.
    #[default]
    Counted,
    /// `tree '|' packed_bits`, byte-compatible with legacy artifacts.
    ///
    /// Decoding walks every unpacked bit including the zero padding of the
    /// last byte. If the padding completes a path to a leaf, spurious
    /// trailing symbols are emitted.
    Legacy,
}

/// Huffman codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HuffmanConfig {
    /// Artifact layout to write or expect.
    pub layout: ArtifactLayout,
}

impl HuffmanConfig {
    /// Standard configuration: counted layout.
    pub const DEFAULT: Self = Self {
        layout: ArtifactLayout::Counted,
    };

    /// Compatibility configuration for legacy artifacts.
    pub const LEGACY: Self = Self {
        layout: ArtifactLayout::Legacy,
    };

    /// Create a configuration with the given layout.
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    /// Whether the artifact carries an explicit payload bit count.
    pub fn stores_bit_count(&self) -> bool {
        self.layout == ArtifactLayout::Counted
    }

    /// Size of the fixed part of the header following the tree.
    pub fn header_trailer_size(&self) -> usize {
        match self.layout {
            ArtifactLayout::Counted => 1 + BIT_COUNT_SIZE,
            ArtifactLayout::Legacy => 1,
        }
    }
}
