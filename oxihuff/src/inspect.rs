//! Artifact header inspection.

use crate::code_table::CodeTable;
use crate::config::{ArtifactLayout, HuffmanConfig};
use crate::decoder::read_header;
use oxihuff_core::error::Result;
use serde::Serialize;
use std::io::{BufReader, Read};

/// One row of the code table as shown by `oxihuff info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolCode {
    /// Byte value.
    pub symbol: u8,
    /// Code as a string of `0`/`1`.
    pub code: String,
}

/// What the header of an artifact says about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactInfo {
    /// Layout the header was parsed with.
    pub layout: ArtifactLayout,
    /// Bytes occupied by tree, delimiter and bit-count field.
    pub header_size: u64,
    /// Number of leaves in the tree.
    pub leaf_count: usize,
    /// Longest code length.
    pub depth: usize,
    /// Payload bit count (counted layout only).
    pub bit_count: Option<u64>,
    /// Code table, ascending by byte value.
    pub codes: Vec<SymbolCode>,
}

/// Parse only the header of an artifact; the body is not read.
pub fn inspect<R: Read>(input: R, config: HuffmanConfig) -> Result<ArtifactInfo> {
    let mut input = BufReader::new(input);
    let header = read_header(&mut input, config)?;
    let table = CodeTable::from_tree(&header.tree)?;

    Ok(ArtifactInfo {
        layout: config.layout,
        header_size: header.size,
        leaf_count: header.tree.leaf_count(),
        depth: table.max_code_length(),
        bit_count: header.bit_count,
        codes: table
            .iter()
            .map(|(symbol, code)| SymbolCode {
                symbol,
                code: code.to_string(),
            })
            .collect(),
    })
}
