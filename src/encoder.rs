use std::io::Write;

use biterator::Bit;

use crate::bits;
use crate::code_table::CodeTable;

/// Errors that can occur while encoding
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EncodeError {
    #[error("Byte {0:#04x} has no code in the table")]
    UnknownSymbol(u8),
}

pub struct Encoder<'t> {
    table: &'t CodeTable,
}

/// The bits of an encoded input, produced one at a time.
pub struct EncoderOutput<'t, I>
where
    I: Iterator<Item = u8>,
{
    input: I,
    table: &'t CodeTable,
    /// Bits of the current byte's code that are yet to be emitted.
    pending: &'t [Bit],
}

impl<'t, I: Iterator<Item = u8>> Iterator for EncoderOutput<'t, I> {
    type Item = Result<Bit, EncodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        // Empty codes contribute nothing, so keep pulling bytes until one
        // yields a bit.
        while self.pending.is_empty() {
            let byte = self.input.next()?;
            match self.table.get(byte) {
                Some(code) => self.pending = code.bits(),
                None => return Some(Err(EncodeError::UnknownSymbol(byte))),
            }
        }

        let (&bit, rest) = self.pending.split_first()?;
        self.pending = rest;
        Some(Ok(bit))
    }
}

impl<'t> Encoder<'t> {
    /// Create an encoder that uses the given code table.
    pub fn new(table: &'t CodeTable) -> Self {
        Self { table }
    }

    /// Encode a stream of bytes as a stream of bits: the concatenation, in
    /// order, of each byte's code.
    pub fn encode<I>(&self, input: I) -> EncoderOutput<'t, I::IntoIter>
    where
        I: IntoIterator<Item = u8>,
    {
        EncoderOutput {
            input: input.into_iter(),
            table: self.table,
            pending: &[],
        }
    }

    /// Encode `input` as a string of '0' and '1'.
    pub fn encode_to_string(&self, input: &[u8]) -> Result<String, EncodeError> {
        let mut encoded = String::new();
        for bit in self.encode(input.iter().copied()) {
            encoded.push(char::from(bits::to_ascii(bit?)));
        }
        Ok(encoded)
    }

    /// Write the textual encoding of `input` to `writer`, returning the
    /// number of bits written.
    ///
    /// Nothing is written if a byte has no code.
    pub fn encode_to_writer<W: Write>(
        &self,
        input: &[u8],
        mut writer: W,
    ) -> Result<usize, crate::Error> {
        let encoded = self.encode_to_string(input)?;
        writer.write_all(encoded.as_bytes())?;
        writer.flush()?;
        Ok(encoded.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::code_table::SingleSymbolCode;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;
    use biterator::Bit::{One, Zero};

    fn table(text: &[u8], single_symbol: SingleSymbolCode) -> CodeTable {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(text)).unwrap();
        CodeTable::build(&tree, single_symbol)
    }

    #[test]
    fn encode_small_message() {
        let table = table(b"aab", SingleSymbolCode::Empty);
        let encoder = Encoder::new(&table);
        assert_eq!(
            encoder.encode(b"aab".iter().copied()).collect::<Result<Vec<_>, _>>(),
            Ok(vec![One, One, Zero])
        );
        assert_eq!(encoder.encode_to_string(b"aab"), Ok("110".to_string()));
    }

    #[test]
    fn encode_empty_message() {
        let table = table(b"aab", SingleSymbolCode::Empty);
        assert_eq!(Encoder::new(&table).encode_to_string(b""), Ok(String::new()));
    }

    #[test]
    fn encode_single_symbol_to_nothing() {
        let table = table(b"zzzz", SingleSymbolCode::Empty);
        assert_eq!(Encoder::new(&table).encode_to_string(b"zzzz"), Ok(String::new()));
    }

    #[test]
    fn encode_single_symbol_one_bit() {
        let table = table(b"zzzz", SingleSymbolCode::OneBit);
        assert_eq!(
            Encoder::new(&table).encode_to_string(b"zzzz"),
            Ok("0000".to_string())
        );
    }

    #[test]
    fn error_on_unknown_symbol() {
        let table = table(b"aab", SingleSymbolCode::Empty);
        assert_eq!(
            Encoder::new(&table).encode_to_string(b"abc"),
            Err(EncodeError::UnknownSymbol(b'c'))
        );
    }

    #[test]
    fn encode_to_writer_counts_bits() {
        let table = table(b"abcc", SingleSymbolCode::Empty);
        let mut out = Vec::new();
        let written = Encoder::new(&table).encode_to_writer(b"abcc", &mut out).unwrap();
        assert_eq!(written, 6);
        assert_eq!(out, b"000111");
    }
}
