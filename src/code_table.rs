use std::fmt;

use biterator::Bit;
use log::{debug, warn};

use crate::SYMBOL_COUNT;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// The bits on the path from the root to a leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Code(Vec<Bit>);

impl Code {
    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::bits::to_string(&self.0))
    }
}

impl From<Vec<Bit>> for Code {
    fn from(bits: Vec<Bit>) -> Self {
        Self(bits)
    }
}

/// Code given to the only byte of a single-symbol input, whose tree root is a
/// leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleSymbolCode {
    /// The empty path to the root. The text encodes to nothing and decodes
    /// to nothing.
    #[default]
    Empty,
    /// A single '0' bit per occurrence, so the text survives a round trip.
    OneBit,
}

/// Mapping from each byte present in the tree to its code.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Assign codes by walking the tree depth first, appending '0' when
    /// descending left and '1' when descending right.
    pub fn build(tree: &HuffmanTree, single_symbol: SingleSymbolCode) -> Self {
        let mut table = CodeTable {
            codes: vec![None; SYMBOL_COUNT],
        };
        let mut path = Vec::new();
        table.visit(tree.root(), &mut path);

        if let Some(character) = tree.sole_symbol() {
            match single_symbol {
                SingleSymbolCode::Empty => {
                    warn!("Byte {character:#04x} has an empty code; its text encodes to nothing")
                }
                SingleSymbolCode::OneBit => {
                    table.codes[character as usize] = Some(Code(vec![Bit::Zero]));
                }
            }
        }

        debug!("Built code table for {} symbols", table.len());
        table
    }

    fn visit(&mut self, node: &Node, path: &mut Vec<Bit>) {
        match node {
            Node::Leaf { character, .. } => {
                self.codes[*character as usize] = Some(Code(path.clone()));
            }
            Node::Internal { left, right, .. } => {
                path.push(Bit::Zero);
                self.visit(left, path);
                path.pop();

                path.push(Bit::One);
                self.visit(right, path);
                path.pop();
            }
        }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Every `(byte, code)` pair, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_ref().map(|code| (byte as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.iter().map(|(_, code)| code).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Number of bits a text with these frequencies encodes to. `None` if
    /// the count does not fit in a `u64`.
    pub fn encoded_len(&self, frequencies: &FrequencyTable) -> Option<u64> {
        frequencies
            .symbols()
            .filter_map(|(byte, count)| self.get(byte).map(|code| (code.len() as u64, count)))
            .try_fold(0u64, |sum, (len, count)| sum.checked_add(len.checked_mul(count)?))
    }
}
