//! Huffman tree construction.
//!
//! The tree is stored in an arena (`Vec<Node>`) with index-based child
//! references. Trees are built greedily from a [`ByteFrequency`] table or
//! assembled node by node by the tree codec.
//!
//! # Tie-breaking
//!
//! Nodes waiting in the priority queue are ordered by `(weight, order)`. A
//! leaf's order is its byte value; the n-th internal node created gets order
//! `256 + n`. Equal-weight leaves are therefore merged in ascending byte
//! order, and a leaf is always taken before an internal node of the same
//! weight. The first node extracted becomes the left child.
//!
//! # Single symbol
//!
//! With exactly one distinct byte `b`, the tree is an internal root whose left
//! child is `b` and whose right child is a zero-weight dummy leaf `b ^ 0x01`.
//! `b` gets the code `0`; the dummy code is never emitted.

use crate::frequency::ByteFrequency;
use oxihuff_core::error::{OxiHuffError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::debug;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// A Huffman tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A leaf carrying a byte value.
    Leaf {
        /// Byte value.
        symbol: u8,
        /// Frequency of the byte (0 for deserialized trees).
        weight: u64,
    },
    /// An internal node with exactly two children.
    Internal {
        /// Sum of the weights beneath.
        weight: u64,
        /// Child reached with a `0` bit.
        left: NodeId,
        /// Child reached with a `1` bit.
        right: NodeId,
    },
}

impl Node {
    /// Weight of the node.
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    /// Whether the node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A binary Huffman tree.
///
/// Equality is structural: two trees are equal when they have the same shape
/// and the same symbols at the same leaves, regardless of weights and of how
/// the nodes are laid out in the arena.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build a Huffman tree from byte frequencies.
    ///
    /// Fails with [`OxiHuffError::EmptyInput`] if no byte was counted.
    pub fn build(freq: &ByteFrequency) -> Result<Self> {
        let mut nodes = Vec::with_capacity(511);
        let mut heap = BinaryHeap::with_capacity(256);

        for (symbol, weight) in freq.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, weight });
            heap.push(Reverse((weight, symbol as u32, id)));
        }

        match nodes.len() {
            0 => return Err(OxiHuffError::EmptyInput),
            1 => {
                let Node::Leaf { symbol, weight } = nodes[0] else {
                    return Err(OxiHuffError::malformed_tree(0));
                };
                nodes.push(Node::Leaf {
                    symbol: symbol ^ 0x01,
                    weight: 0,
                });
                nodes.push(Node::Internal {
                    weight,
                    left: 0,
                    right: 1,
                });
                debug!(symbol, "built single-symbol tree with dummy sibling");
                return Ok(Self { nodes, root: 2 });
            }
            _ => {}
        }

        let mut next_order = 256u32;
        while let (Some(Reverse((w1, _, left))), Some(Reverse((w2, _, right)))) =
            (heap.pop(), heap.pop())
        {
            let weight = w1 + w2;
            let id = nodes.len();
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            heap.push(Reverse((weight, next_order, id)));
            next_order += 1;
        }

        // The loop exits after popping the final node on its own.
        let root = nodes.len() - 1;
        let tree = Self { nodes, root };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built Huffman tree"
        );
        Ok(tree)
    }

    /// Assemble a tree from an arena and a root index.
    ///
    /// Used by the tree codec; children must already be in the arena.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Index of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by index.
    ///
    /// A dangling index is a broken tree invariant.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or_else(|| OxiHuffError::malformed_tree(id))
    }

    /// The root node.
    pub fn root_node(&self) -> Result<&Node> {
        self.node(self.root)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty. Never true for built or decoded trees.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        self.fold(self.root, &|node, children: &[usize]| {
            if node.is_leaf() { 1 } else { children.iter().sum() }
        })
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.fold(self.root, &|node, children: &[usize]| {
            if node.is_leaf() {
                0
            } else {
                1 + children.iter().copied().max().unwrap_or(0)
            }
        })
    }

    /// Weight of the root: the number of encoded symbols for built trees.
    pub fn weight(&self) -> u64 {
        self.nodes.get(self.root).map(Node::weight).unwrap_or(0)
    }

    /// Bottom-up fold over the subtree at `id`. Dangling children count as
    /// missing.
    fn fold<F>(&self, id: NodeId, f: &F) -> usize
    where
        F: Fn(&Node, &[usize]) -> usize,
    {
        match self.nodes.get(id) {
            Some(node @ Node::Leaf { .. }) => f(node, &[]),
            Some(node @ Node::Internal { left, right, .. }) => {
                let children = [self.fold(*left, f), self.fold(*right, f)];
                f(node, &children)
            }
            None => 0,
        }
    }

    fn same_shape(&self, a: NodeId, other: &Self, b: NodeId) -> bool {
        match (self.nodes.get(a), other.nodes.get(b)) {
            (Some(Node::Leaf { symbol: x, .. }), Some(Node::Leaf { symbol: y, .. })) => x == y,
            (
                Some(Node::Internal {
                    left: l1,
                    right: r1,
                    ..
                }),
                Some(Node::Internal {
                    left: l2,
                    right: r2,
                    ..
                }),
            ) => self.same_shape(*l1, other, *l2) && self.same_shape(*r1, other, *r2),
            _ => false,
        }
    }
}

impl PartialEq for HuffmanTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(self.root, other, other.root)
    }
}

impl Eq for HuffmanTree {}
