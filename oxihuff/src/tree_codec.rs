//! Self-delimiting tree serialization.
//!
//! The tree is written in pre-order with one marker byte per node:
//!
//! ```text
//! node := LEAF_MARKER symbol
//!       | INTERNAL_MARKER node node
//! ```
//!
//! No length prefix is needed: the two-children invariant makes the grammar
//! unambiguous. A symbol byte may equal either marker value; only its
//! position after a leaf marker identifies it as payload.

use crate::config::{INTERNAL_MARKER, LEAF_MARKER};
use crate::tree::{HuffmanTree, Node, NodeId};
use oxihuff_core::error::{OxiHuffError, Result};
use std::io::{ErrorKind, Read, Write};
use tracing::trace;

/// Maximum nesting accepted when reading a tree.
///
/// A tree over 256 distinct symbols is at most 255 levels deep.
pub const MAX_TREE_DEPTH: usize = 256;

/// Serialize a tree into a new buffer.
pub fn serialize_tree(tree: &HuffmanTree) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(tree.len() + tree.leaf_count());
    encode_node(tree, tree.root(), &mut out)?;
    Ok(out)
}

/// Serialize a tree into a writer. Returns the number of bytes written.
pub fn write_tree<W: Write>(tree: &HuffmanTree, writer: &mut W) -> Result<u64> {
    let bytes = serialize_tree(tree)?;
    writer
        .write_all(&bytes)
        .map_err(OxiHuffError::unwritable)?;
    trace!(bytes = bytes.len(), "wrote serialized tree");
    Ok(bytes.len() as u64)
}

fn encode_node(tree: &HuffmanTree, id: NodeId, out: &mut Vec<u8>) -> Result<()> {
    match *tree.node(id)? {
        Node::Leaf { symbol, .. } => {
            out.push(LEAF_MARKER);
            out.push(symbol);
        }
        Node::Internal { left, right, .. } => {
            out.push(INTERNAL_MARKER);
            encode_node(tree, left, out)?;
            encode_node(tree, right, out)?;
        }
    }
    Ok(())
}

/// Deserialize a tree from the head of a byte slice.
///
/// Returns the tree and the number of bytes it occupied.
pub fn deserialize_tree(data: &[u8]) -> Result<(HuffmanTree, usize)> {
    let mut slice = data;
    let (tree, consumed) = read_tree(&mut slice)?;
    Ok((tree, consumed as usize))
}

/// Deserialize a tree from a reader, consuming exactly its bytes.
///
/// The reader is read one byte at a time; wrap unbuffered sources in a
/// `BufReader`. Returns the tree and the number of bytes consumed.
pub fn read_tree<R: Read>(reader: &mut R) -> Result<(HuffmanTree, u64)> {
    let mut source = TreeSource {
        reader,
        offset: 0,
        nodes: Vec::new(),
    };
    let root = source.read_node(0)?;
    let consumed = source.offset;
    trace!(bytes = consumed, nodes = source.nodes.len(), "read serialized tree");
    Ok((HuffmanTree::from_parts(source.nodes, root), consumed))
}

/// Byte source tracking the read offset while nodes are appended to an arena.
struct TreeSource<'a, R: Read> {
    reader: &'a mut R,
    offset: u64,
    nodes: Vec<Node>,
}

impl<R: Read> TreeSource<'_, R> {
    fn read_byte(&mut self, what: &str) -> Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    return Err(OxiHuffError::corrupt_tree(
                        self.offset,
                        format!("unexpected end of input while reading {what}"),
                    ));
                }
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(OxiHuffError::unreadable(e)),
            }
        }
        self.offset += 1;
        Ok(byte[0])
    }

    fn read_node(&mut self, depth: usize) -> Result<NodeId> {
        if depth > MAX_TREE_DEPTH {
            return Err(OxiHuffError::corrupt_tree(
                self.offset,
                format!("tree nesting exceeds {MAX_TREE_DEPTH} levels"),
            ));
        }

        let marker = self.read_byte("node marker")?;
        let node = match marker {
            LEAF_MARKER => {
                let symbol = self.read_byte("leaf symbol")?;
                Node::Leaf { symbol, weight: 0 }
            }
            INTERNAL_MARKER => {
                let left = self.read_node(depth + 1)?;
                let right = self.read_node(depth + 1)?;
                Node::Internal {
                    weight: 0,
                    left,
                    right,
                }
            }
            other => {
                return Err(OxiHuffError::corrupt_tree(
                    self.offset - 1,
                    format!("unknown node marker {other:#04x}"),
                ));
            }
        };

        self.nodes.push(node);
        Ok(self.nodes.len() - 1)
    }
}
