//! Byte-to-code mapping derived from a Huffman tree.

use crate::frequency::ByteFrequency;
use crate::tree::{HuffmanTree, Node, NodeId};
use oxihuff_core::BitWriter;
use oxihuff_core::error::Result;
use std::fmt;
use std::io::Write;

/// A variable-length code: the root-to-leaf path, `false` = left, `true` = right.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HuffmanCode {
    bits: Vec<bool>,
}

impl HuffmanCode {
    /// Number of bits in the code.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Codes produced by [`CodeTable::from_tree`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, first bit first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Whether this code is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &HuffmanCode) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Append the code to a bit writer.
    #[inline]
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        for &bit in &self.bits {
            writer.write_bit(bit)?;
        }
        Ok(())
    }
}

impl fmt::Display for HuffmanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its Huffman code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<HuffmanCode>>,
}

impl CodeTable {
    /// Walk the tree depth-first and record every leaf's path.
    ///
    /// A tree whose root is a leaf gives that symbol the one-bit code `0`.
    /// If a symbol appears at several leaves, the leftmost one wins.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = vec![None; 256];

        if let Node::Leaf { symbol, .. } = *tree.root_node()? {
            codes[symbol as usize] = Some(HuffmanCode { bits: vec![false] });
            return Ok(Self { codes });
        }

        let mut path = Vec::new();
        Self::walk(tree, tree.root(), &mut path, &mut codes)?;
        Ok(Self { codes })
    }

    fn walk(
        tree: &HuffmanTree,
        id: NodeId,
        path: &mut Vec<bool>,
        codes: &mut [Option<HuffmanCode>],
    ) -> Result<()> {
        match *tree.node(id)? {
            Node::Leaf { symbol, .. } => {
                let slot = &mut codes[symbol as usize];
                if slot.is_none() {
                    *slot = Some(HuffmanCode { bits: path.clone() });
                }
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                Self::walk(tree, left, path, codes)?;
                path.pop();

                path.push(true);
                Self::walk(tree, right, path, codes)?;
                path.pop();
            }
        }
        Ok(())
    }

    /// Code of `symbol`, if the symbol occurs in the tree.
    pub fn get(&self, symbol: u8) -> Option<&HuffmanCode> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// Whether no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols and their codes, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &HuffmanCode)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Length of the longest code.
    pub fn max_code_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Total payload bits needed to encode an input with these frequencies.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, freq: &ByteFrequency) -> u64 {
        freq.iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|c| count * c.len() as u64))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> (ByteFrequency, CodeTable) {
        let freq = ByteFrequency::from_bytes(data);
        let tree = HuffmanTree::build(&freq).unwrap();
        (freq, CodeTable::from_tree(&tree).unwrap())
    }

    #[test]
    fn test_codes_aaabbc() {
        let (freq, table) = table_for(b"AAABBC");

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(b'A').unwrap().to_string(), "0");
        assert_eq!(table.get(b'C').unwrap().to_string(), "10");
        assert_eq!(table.get(b'B').unwrap().to_string(), "11");
        assert_eq!(table.max_code_length(), 2);
        // 3*1 + 2*2 + 1*2
        assert_eq!(table.encoded_bits(&freq), 9);
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let (freq, table) = table_for(b"XXX");
        assert_eq!(table.get(b'X').unwrap().to_string(), "0");
        assert_eq!(table.encoded_bits(&freq), 3);
    }

    #[test]
    fn test_leaf_root_reserved_code() {
        let tree = HuffmanTree::from_parts(
            vec![Node::Leaf {
                symbol: b'Q',
                weight: 0,
            }],
            0,
        );
        let table = CodeTable::from_tree(&tree).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b'Q').unwrap().bits(), &[false]);
    }

    #[test]
    fn test_prefix_free() {
        let data = b"it was the best of times, it was the worst of times; 0123456789";
        let (_, table) = table_for(data);
        let codes: Vec<_> = table.iter().collect();

        for (i, (_, a)) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, (_, b)) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_skewed_frequencies_favour_common_bytes() {
        let mut data = vec![b'e'; 1000];
        data.extend(std::iter::repeat_n(b't', 100));
        data.extend(std::iter::repeat_n(b'z', 10));
        data.push(b'q');
        let (_, table) = table_for(&data);

        let len = |s: u8| table.get(s).unwrap().len();
        assert_eq!(len(b'e'), 1);
        assert!(len(b'e') <= len(b't'));
        assert!(len(b't') <= len(b'z'));
        assert!(len(b'z') <= len(b'q'));
    }

    #[test]
    fn test_dangling_child_is_malformed() {
        let tree = HuffmanTree::from_parts(
            vec![
                Node::Leaf {
                    symbol: 1,
                    weight: 0,
                },
                Node::Internal {
                    weight: 0,
                    left: 0,
                    right: 9,
                },
            ],
            1,
        );
        let err = CodeTable::from_tree(&tree).unwrap_err();
        assert!(matches!(
            err,
            oxihuff_core::OxiHuffError::MalformedTreeInvariant { node: 9 }
        ));
    }

    #[test]
    fn test_write_codes() {
        let (_, table) = table_for(b"AAABBC");
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for &byte in b"ABC" {
            table.get(byte).unwrap().write_to(&mut writer).unwrap();
        }
        writer.finish().unwrap();
        // 0 11 10 + padding
        assert_eq!(out, vec![0b0111_0000]);
    }
}
