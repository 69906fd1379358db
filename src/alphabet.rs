use crate::error::{Error, Result};
use hufflpuff::Symbol;

/// Number of symbols of the byte alphabet.
pub const DEFAULT_ALPHABET_SIZE: u32 = hufflpuff::DEFAULT_MAX_SYMBOLS;

/// Widest raw symbol representation supported.
pub const MAX_ALPHABET_BITS: u32 = 24;

/// The symbols `0..size` a coder works on.
///
/// First occurences of a symbol are sent raw, as `bit_width` bits. Encoder and decoder have
/// to agree on the alphabet up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    size: u32,
    bit_width: u32,
}

impl Alphabet {
    /// `size` has to be in `2..=2^MAX_ALPHABET_BITS`.
    pub fn new(size: u32) -> Result<Self> {
        if size < 2 || size > 1 << MAX_ALPHABET_BITS {
            return Err(Error::InvalidAlphabet(size));
        }
        Ok(Alphabet {
            size,
            bit_width: get_bit_width(size),
        })
    }

    /// the 256 byte values, sent raw as 8 bits
    pub fn bytes() -> Self {
        Alphabet {
            size: DEFAULT_ALPHABET_SIZE,
            bit_width: 8,
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol < self.size
    }

    pub(crate) fn check(&self, symbol: Symbol) -> Result<()> {
        if self.contains(symbol) {
            Ok(())
        } else {
            Err(Error::SymbolOutOfRange {
                symbol,
                size: self.size,
            })
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::bytes()
    }
}

/// number of bits to represent every symbol below `size`
#[inline]
fn get_bit_width(size: u32) -> u32 {
    32 - (size - 1).leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_width() {
        assert_eq!(get_bit_width(2), 1);
        assert_eq!(get_bit_width(3), 2);
        assert_eq!(get_bit_width(4), 2);
        assert_eq!(get_bit_width(5), 3);
        assert_eq!(get_bit_width(27), 5);
        assert_eq!(get_bit_width(128), 7);
        assert_eq!(get_bit_width(256), 8);
        assert_eq!(get_bit_width(257), 9);
        assert_eq!(get_bit_width(1 << 24), 24);
    }

    #[test]
    fn test_alphabet_limits() {
        assert!(matches!(Alphabet::new(0), Err(Error::InvalidAlphabet(0))));
        assert!(matches!(Alphabet::new(1), Err(Error::InvalidAlphabet(1))));
        assert!(Alphabet::new(2).is_ok());
        assert!(Alphabet::new(1 << 24).is_ok());
        assert!(matches!(
            Alphabet::new((1 << 24) + 1),
            Err(Error::InvalidAlphabet(_))
        ));
        assert_eq!(Alphabet::new(256).unwrap(), Alphabet::bytes());
        assert_eq!(Alphabet::default().bit_width(), 8);
    }

    #[test]
    fn test_contains() {
        let alphabet = Alphabet::new(27).unwrap();
        assert!(alphabet.contains(26));
        assert!(!alphabet.contains(27));
        assert!(matches!(
            alphabet.check(31),
            Err(Error::SymbolOutOfRange { symbol: 31, size: 27 })
        ));
    }
}
