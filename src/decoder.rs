use bitstream::BitDStream;
use hufflpuff::Symbol;
use hufflpuff::Tree;
use hufflpuff::TreeSnapshot;
use log::*;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderState {
    pub decoded_symbols: Vec<Symbol>,
    pub tree_snapshot: TreeSnapshot,
}

/// Mirror of the [`Encoder`](crate::Encoder), keeps its own tree in lockstep by applying
/// the same update for every decoded symbol.
#[derive(Debug, Clone)]
pub struct Decoder {
    alphabet: Alphabet,
    tree: Tree,
    decoded: Vec<Symbol>,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(Alphabet::bytes())
    }
}

impl Decoder {
    pub fn new(alphabet: Alphabet) -> Self {
        Decoder {
            alphabet,
            tree: Tree::new(alphabet.size()),
            decoded: Vec::new(),
        }
    }

    /// Decodes the next symbol, `None` at the end of the stream.
    ///
    /// Walks from the root bit by bit. A symbol leaf yields its symbol, the NYT leaf is
    /// followed by the symbol in raw bits.
    pub fn decode_symbol(&mut self, stream: &mut BitDStream) -> Result<Option<Symbol>> {
        if stream.is_finished() {
            return Ok(None);
        }

        let mut id = self.tree.root();
        loop {
            let node = self.tree.get_node(id);
            let (left, right) = match (node.left(), node.right()) {
                (Some(left), Some(right)) => (left, right),
                _ => break,
            };
            let bit = stream.read_bit().ok_or(Error::TruncatedCode {
                position: stream.position(),
            })?;
            id = if bit { right } else { left };
        }

        let leaf = self.tree.get_node(id);
        let symbol = match (leaf.is_nyt(), leaf.symbol()) {
            (false, Some(symbol)) => symbol,
            _ => self.read_raw_symbol(stream)?,
        };
        self.tree.encode_update(symbol)?;
        self.decoded.push(symbol);
        Ok(Some(symbol))
    }

    fn read_raw_symbol(&self, stream: &mut BitDStream) -> Result<Symbol> {
        let position = stream.position();
        let symbol = stream
            .read_bits(self.alphabet.bit_width())
            .map_err(|_| Error::TruncatedCode {
                position: stream.position(),
            })?;
        self.alphabet.check(symbol)?;
        if self.tree.contains(symbol) {
            return Err(Error::SymbolAlreadyKnown { symbol, position });
        }
        Ok(symbol)
    }

    /// Decodes a complete stream as written by [`Encoder::finish`](crate::Encoder::finish).
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<Symbol>> {
        let mut stream = BitDStream::new(input)?;
        let mut symbols = Vec::new();
        while let Some(symbol) = self.decode_symbol(&mut stream)? {
            symbols.push(symbol);
        }
        debug!(
            "decoded {} symbols ({} distinct) from {} bytes",
            symbols.len(),
            self.tree.num_symbols(),
            input.len()
        );
        Ok(symbols)
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn decoded_symbols(&self) -> &[Symbol] {
        &self.decoded
    }

    pub fn state(&self) -> DecoderState {
        DecoderState {
            decoded_symbols: self.decoded.clone(),
            tree_snapshot: self.tree.snapshot(),
        }
    }

    pub fn reset(&mut self) {
        *self = Decoder::new(self.alphabet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Encoder;
    use bitstream::BitCstream;
    use bitstream::BitstreamError;

    #[test]
    fn test_decode_aab() {
        let mut decoder = Decoder::default();
        let symbols = decoder
            .decode(&[0b0100_0001, 0b1001_0000, 0b1010_0000])
            .unwrap();
        assert_eq!(symbols, vec![b'A' as Symbol, b'A' as Symbol, b'B' as Symbol]);
        assert_eq!(decoder.decoded_symbols(), &symbols[..]);
        assert_eq!(decoder.tree().total_weight(), 3);
    }

    #[test]
    fn test_trees_stay_in_lockstep() {
        let mut encoder = Encoder::default();
        let mut decoder = Decoder::default();
        let message = b"mississippi river";
        encoder.encode_bytes(message).unwrap();
        let out = encoder.clone().finish();

        let mut stream = BitDStream::new(&out).unwrap();
        for (i, &byte) in message.iter().enumerate() {
            let symbol = decoder.decode_symbol(&mut stream).unwrap();
            assert_eq!(symbol, Some(byte as Symbol), "symbol {}", i);
        }
        assert_eq!(decoder.decode_symbol(&mut stream).unwrap(), None);
        assert_eq!(decoder.state().tree_snapshot, encoder.state().tree_snapshot);
    }

    #[test]
    fn test_empty_stream() {
        let mut decoder = Decoder::default();
        assert_eq!(decoder.decode(&[0b1000_0000]).unwrap(), vec![]);
        assert!(matches!(
            decoder.decode(&[]),
            Err(Error::Bitstream(BitstreamError::MissingEndMark))
        ));
    }

    #[test]
    fn test_truncated_raw_symbol() {
        let mut stream = BitCstream::new();
        stream.add_bits(0b0100, 4);
        let out = stream.finish_stream();
        let mut decoder = Decoder::default();
        assert!(matches!(
            decoder.decode(&out),
            Err(Error::TruncatedCode { .. })
        ));
    }

    #[test]
    fn test_truncated_code() {
        // "AB" leaves A at "1" and the NYT at "00", a lone "0" ends inside a code
        let mut encoder = Encoder::default();
        encoder.encode_bytes(b"AB").unwrap();
        let mut stream = BitCstream::new();
        for bit in encoder.all_bits().iter().by_vals() {
            stream.add_bit(bit);
        }
        stream.add_bit(false);
        let out = stream.finish_stream();

        let mut decoder = Decoder::default();
        assert!(matches!(
            decoder.decode(&out),
            Err(Error::TruncatedCode { position: 18 })
        ));
        assert_eq!(decoder.decoded_symbols(), &[b'A' as Symbol, b'B' as Symbol]);
    }

    #[test]
    fn test_known_symbol_sent_raw() {
        let mut stream = BitCstream::new();
        stream.add_bits(b'A' as u32, 8);
        // NYT path "0", then 'A' again
        stream.add_bit(false);
        stream.add_bits(b'A' as u32, 8);
        let out = stream.finish_stream();

        let mut decoder = Decoder::default();
        assert!(matches!(
            decoder.decode(&out),
            Err(Error::SymbolAlreadyKnown { symbol: 65, position: 9 })
        ));
    }

    #[test]
    fn test_raw_symbol_outside_alphabet() {
        let mut stream = BitCstream::new();
        stream.add_bits(6, 3);
        let out = stream.finish_stream();

        let mut decoder = Decoder::new(Alphabet::new(5).unwrap());
        assert!(matches!(
            decoder.decode(&out),
            Err(Error::SymbolOutOfRange { symbol: 6, size: 5 })
        ));
    }
}
