//! Conversion between [`Bit`]s and their textual form, the ASCII characters
//! '0' and '1'.

use biterator::Bit;
use log::warn;

/// How bytes other than '0' and '1' are handled when reading a bit-string,
/// and whether a bit-string may end partway through a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Reject unrecognized bytes. Also reject a bit-string that ends
    /// partway through a code, which otherwise ends decoding quietly.
    #[default]
    Strict,
    /// Read any byte other than '0' as a '1' and drop a trailing partial
    /// code.
    Lenient,
}

pub fn to_ascii(bit: Bit) -> u8 {
    match bit {
        Bit::Zero => b'0',
        Bit::One => b'1',
    }
}

/// Read one byte of a bit-string. Returns `None` for an unrecognized byte in
/// strict mode.
pub fn from_ascii(byte: u8, strictness: Strictness) -> Option<Bit> {
    match (byte, strictness) {
        (b'0', _) => Some(Bit::Zero),
        (b'1', _) => Some(Bit::One),
        (_, Strictness::Strict) => None,
        (_, Strictness::Lenient) => {
            warn!("Reading unrecognized byte {byte:#04x} as a '1' bit");
            Some(Bit::One)
        }
    }
}

/// Render bits as a string of '0' and '1'.
pub fn to_string<'b>(bits: impl IntoIterator<Item = &'b Bit>) -> String {
    bits.into_iter()
        .map(|&bit| char::from(to_ascii(bit)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use biterator::Bit::{One, Zero};

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&[One, Zero, One, One]), "1011");
        assert_eq!(to_string(&[] as &[Bit]), "");
    }

    #[test]
    fn test_strict() {
        assert_eq!(from_ascii(b'0', Strictness::Strict), Some(Zero));
        assert_eq!(from_ascii(b'1', Strictness::Strict), Some(One));
        assert_eq!(from_ascii(b'2', Strictness::Strict), None);
        assert_eq!(from_ascii(b'\n', Strictness::Strict), None);
    }

    #[test]
    fn test_lenient_reads_anything_else_as_one() {
        assert_eq!(from_ascii(b'0', Strictness::Lenient), Some(Zero));
        assert_eq!(from_ascii(b'x', Strictness::Lenient), Some(One));
        assert_eq!(from_ascii(b'\n', Strictness::Lenient), Some(One));
    }
}
