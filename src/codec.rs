use crate::bits::Strictness;
use crate::code_table::{CodeTable, SingleSymbolCode};
use crate::decoder::{DecodeError, Decoder};
use crate::encoder::{EncodeError, Encoder};
use crate::frequency::FrequencyTable;
use crate::tree::{BuildError, HuffmanTree};

/// Choices left open by the coding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub strictness: Strictness,
    pub single_symbol: SingleSymbolCode,
}

/// A tree and the code table derived from it, ready to encode and decode
/// texts drawn from the same frequencies.
#[derive(Debug, Clone)]
pub struct Codec {
    tree: HuffmanTree,
    table: CodeTable,
    options: CodecOptions,
}

impl Codec {
    pub fn from_frequencies(
        frequencies: &FrequencyTable,
        options: CodecOptions,
    ) -> Result<Self, BuildError> {
        let tree = HuffmanTree::build(frequencies)?;
        let table = CodeTable::build(&tree, options.single_symbol);
        Ok(Self {
            tree,
            table,
            options,
        })
    }

    /// Build a codec from the byte frequencies of `text`.
    pub fn from_text(text: &[u8], options: CodecOptions) -> Result<Self, BuildError> {
        Self::from_frequencies(&FrequencyTable::from_bytes(text), options)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.table)
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.tree)
            .with_strictness(self.options.strictness)
            .with_single_symbol(self.options.single_symbol)
    }

    /// Encode `text` as a string of '0' and '1'.
    pub fn encode(&self, text: &[u8]) -> Result<String, EncodeError> {
        self.encoder().encode_to_string(text)
    }

    /// Decode a string of '0' and '1'.
    pub fn decode(&self, encoded: &str) -> Result<Vec<u8>, DecodeError> {
        self.decoder().decode_text_to_vec(encoded.as_bytes())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_round_trip() {
        let text = b"the quick brown fox jumps over the lazy dog";
        let codec = Codec::from_text(text, CodecOptions::default()).unwrap();
        let encoded = codec.encode(text).unwrap();
        assert!(encoded.bytes().all(|b| b == b'0' || b == b'1'));
        assert_eq!(codec.decode(&encoded), Ok(text.to_vec()));
    }

    #[test]
    fn test_aab_scenario() {
        let codec = Codec::from_text(b"aab", CodecOptions::default()).unwrap();
        assert_eq!(codec.encode(b"aab"), Ok("110".to_string()));
        assert_eq!(codec.decode("110"), Ok(b"aab".to_vec()));
    }

    #[test]
    fn test_single_symbol_loses_text() {
        let codec = Codec::from_text(b"zzzz", CodecOptions::default()).unwrap();
        assert_eq!(codec.encode(b"zzzz"), Ok(String::new()));
        assert_eq!(codec.decode(""), Ok(vec![]));
    }

    #[test]
    fn test_single_symbol_one_bit_round_trip() {
        let options = CodecOptions {
            single_symbol: SingleSymbolCode::OneBit,
            ..CodecOptions::default()
        };
        let codec = Codec::from_text(b"zzzz", options).unwrap();
        let encoded = codec.encode(b"zzzz").unwrap();
        assert_eq!(encoded, "0000");
        assert_eq!(codec.decode(&encoded), Ok(b"zzzz".to_vec()));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            Codec::from_text(b"", CodecOptions::default()).err(),
            Some(BuildError::EmptyInput)
        );
    }
}
