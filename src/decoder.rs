use std::io::Write;

use biterator::Bit;
use log::warn;

use crate::bits::{self, Strictness};
use crate::code_table::SingleSymbolCode;
use crate::tree::{HuffmanTree, Node};

/// Errors that can occur while decoding
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DecodeError {
    /// The bit at `position` leads nowhere in the tree.
    #[error("Malformed input: bit {position} has no matching branch in the tree")]
    MalformedInput { position: usize },
    #[error("Malformed input: byte {byte:#04x} at {position} is neither '0' nor '1'")]
    UnrecognizedBit { position: usize, byte: u8 },
    #[error("Malformed input: stream ends inside a code after {position} bits")]
    IncompleteCode { position: usize },
}

pub struct Decoder<'t> {
    tree: &'t HuffmanTree,
    strictness: Strictness,
    single_symbol: SingleSymbolCode,
}

/// The bytes of a decoded bit stream, produced one at a time.
///
/// The output ends after the first error.
pub struct DecoderOutput<'t, I>
where
    I: Iterator<Item = Result<Bit, DecodeError>>,
{
    input: I,
    root: &'t Node,
    current: &'t Node,
    position: usize,
    strictness: Strictness,
    single_symbol: SingleSymbolCode,
    done: bool,
}

impl<'t, I> DecoderOutput<'t, I>
where
    I: Iterator<Item = Result<Bit, DecodeError>>,
{
    fn fail(&mut self, error: DecodeError) -> Option<Result<u8, DecodeError>> {
        self.done = true;
        Some(Err(error))
    }

    fn finish(&mut self) -> Option<Result<u8, DecodeError>> {
        self.done = true;
        if std::ptr::eq(self.current, self.root) {
            return None;
        }
        match self.strictness {
            Strictness::Strict => self.fail(DecodeError::IncompleteCode {
                position: self.position,
            }),
            Strictness::Lenient => {
                warn!("Dropping a partial code at the end of the input");
                None
            }
        }
    }
}

// The decoder is a walk over the tree with a single cursor, `current`,
// starting at the root. Each '0' bit moves it to the left child and each
// '1' bit to the right child. Landing on a leaf emits that leaf's byte and
// puts the cursor back on the root.
impl<'t, I> Iterator for DecoderOutput<'t, I>
where
    I: Iterator<Item = Result<Bit, DecodeError>>,
{
    type Item = Result<u8, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(bit) = self.input.next() else {
                return self.finish();
            };
            let position = self.position;
            self.position += 1;

            let bit = match bit {
                Ok(bit) => bit,
                Err(e) => return self.fail(e),
            };

            let current = self.current;
            self.current = match current {
                Node::Internal { left, right, .. } => match bit {
                    Bit::Zero => left.as_ref(),
                    Bit::One => right.as_ref(),
                },
                // Only a lone-leaf root is ever the cursor here.
                Node::Leaf { character, .. } => {
                    return match (self.single_symbol, bit) {
                        (SingleSymbolCode::OneBit, Bit::Zero) => Some(Ok(*character)),
                        _ => self.fail(DecodeError::MalformedInput { position }),
                    };
                }
            };

            if let Node::Leaf { character, .. } = self.current {
                self.current = self.root;
                return Some(Ok(*character));
            }
        }
    }
}

impl<'t> Decoder<'t> {
    /// Create a decoder that walks the given tree.
    pub fn new(tree: &'t HuffmanTree) -> Self {
        Self {
            tree,
            strictness: Strictness::default(),
            single_symbol: SingleSymbolCode::default(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Match the code the encoder gave a single-symbol tree's only byte.
    pub fn with_single_symbol(mut self, single_symbol: SingleSymbolCode) -> Self {
        self.single_symbol = single_symbol;
        self
    }

    fn output<I>(&self, input: I) -> DecoderOutput<'t, I>
    where
        I: Iterator<Item = Result<Bit, DecodeError>>,
    {
        let root = self.tree.root();
        DecoderOutput {
            input,
            root,
            current: root,
            position: 0,
            strictness: self.strictness,
            single_symbol: self.single_symbol,
            done: false,
        }
    }

    /// Decode a stream of bits as a stream of bytes.
    pub fn decode<I>(
        &self,
        input: I,
    ) -> DecoderOutput<'t, impl Iterator<Item = Result<Bit, DecodeError>> + use<'t, I>>
    where
        I: IntoIterator<Item = Bit>,
    {
        self.output(input.into_iter().map(Ok))
    }

    /// Decode a string of '0' and '1' as a stream of bytes.
    pub fn decode_text<'a>(
        &self,
        text: &'a [u8],
    ) -> DecoderOutput<'t, impl Iterator<Item = Result<Bit, DecodeError>> + use<'a, 't>> {
        let strictness = self.strictness;
        self.output(text.iter().enumerate().map(move |(position, &byte)| {
            bits::from_ascii(byte, strictness)
                .ok_or(DecodeError::UnrecognizedBit { position, byte })
        }))
    }

    /// Decode a string of '0' and '1' into a buffer.
    pub fn decode_text_to_vec(&self, text: &[u8]) -> Result<Vec<u8>, DecodeError> {
        self.decode_text(text).collect()
    }

    /// Decode a string of '0' and '1' into `writer`, returning the number of
    /// bytes written.
    ///
    /// Bytes decoded before an error are still written.
    pub fn decode_text_to_writer<W: Write>(
        &self,
        text: &[u8],
        mut writer: W,
    ) -> Result<usize, crate::Error> {
        let mut buffer = Vec::new();
        let mut result = Ok(());
        for byte in self.decode_text(text) {
            match byte {
                Ok(byte) => buffer.push(byte),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        writer.write_all(&buffer)?;
        writer.flush()?;
        result?;
        Ok(buffer.len())
    }
}
