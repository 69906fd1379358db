use bitstream::BitCstream;
use hufflpuff::bits_to_string;
use hufflpuff::BitSequence;
use hufflpuff::Symbol;
use hufflpuff::Tree;
use hufflpuff::TreeSnapshot;
use log::log_enabled;
use log::Level::Trace;
use log::*;

use crate::alphabet::Alphabet;
use crate::error::Result;

/// The bits sent for a single input symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSymbol {
    pub symbol: Symbol,
    /// the symbol was sent as NYT path + raw bits
    pub first_occurrence: bool,
    pub bits: BitSequence,
}

/// Everything a viewer needs to show the progress of an [`Encoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderState {
    pub processed_symbols: Vec<Symbol>,
    pub encoded: Vec<EncodedSymbol>,
    pub current_symbol: Option<Symbol>,
    pub tree_snapshot: TreeSnapshot,
}

/// One pass adaptive huffman encoder.
///
/// Known symbols are sent as their current code. A first occurence is sent as the path to
/// the NYT leaf followed by the symbol in `bit_width` raw bits. The tree is updated after
/// every symbol, in both cases.
#[derive(Debug, Clone)]
pub struct Encoder {
    alphabet: Alphabet,
    tree: Tree,
    stream: BitCstream,
    history: Vec<EncodedSymbol>,
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new(Alphabet::bytes())
    }
}

impl Encoder {
    pub fn new(alphabet: Alphabet) -> Self {
        Encoder {
            alphabet,
            tree: Tree::new(alphabet.size()),
            stream: BitCstream::new(),
            history: Vec::new(),
        }
    }

    /// Encodes a single symbol and returns the bits added to the stream for it.
    pub fn encode_symbol(&mut self, symbol: Symbol) -> Result<BitSequence> {
        self.alphabet.check(symbol)?;
        let (bits, first_occurrence) = match self.tree.code_for(symbol) {
            Some(code) => (code, false),
            None => {
                let mut bits = self.tree.path_to_nyt();
                for shift in (0..self.alphabet.bit_width()).rev() {
                    bits.push((symbol >> shift) & 1 == 1);
                }
                (bits, true)
            }
        };
        // a failed update must not leave bits behind in the stream
        self.tree.encode_update(symbol)?;

        for bit in bits.iter().by_vals() {
            self.stream.add_bit(bit);
        }
        if log_enabled!(Trace) {
            trace!(
                "symbol {} first:{} bits:{}",
                symbol,
                first_occurrence,
                bits_to_string(&bits)
            );
        }
        self.history.push(EncodedSymbol {
            symbol,
            first_occurrence,
            bits: bits.clone(),
        });
        Ok(bits)
    }

    /// Encodes `symbols` after everything encoded so far. The session is not reset, call
    /// [`Encoder::reset`] first to start a new message.
    pub fn encode(&mut self, symbols: &[Symbol]) -> Result<()> {
        for &symbol in symbols {
            self.encode_symbol(symbol)?;
        }
        Ok(())
    }

    /// Like [`Encoder::encode`], appends to the current session.
    pub fn encode_bytes(&mut self, input: &[u8]) -> Result<()> {
        for &byte in input {
            self.encode_symbol(byte as Symbol)?;
        }
        Ok(())
    }

    /// Closes the stream with the end mark and returns the compressed bytes.
    pub fn finish(self) -> Vec<u8> {
        let num_bits = self.stream.num_bits();
        let out = self.stream.finish_stream();
        debug!(
            "encoded {} symbols ({} distinct) into {} bits, {} bytes",
            self.history.len(),
            self.tree.num_symbols(),
            num_bits,
            out.len()
        );
        out
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// number of bits written so far, without the end mark
    pub fn num_bits(&self) -> usize {
        self.stream.num_bits()
    }

    pub fn history(&self) -> &[EncodedSymbol] {
        &self.history
    }

    pub fn processed_symbols(&self) -> Vec<Symbol> {
        self.history.iter().map(|encoded| encoded.symbol).collect()
    }

    /// all bits sent so far in one sequence
    pub fn all_bits(&self) -> BitSequence {
        let mut bits = BitSequence::with_capacity(self.num_bits());
        for encoded in &self.history {
            bits.extend_from_bitslice(encoded.bits.as_bitslice());
        }
        bits
    }

    pub fn state(&self) -> EncoderState {
        EncoderState {
            processed_symbols: self.processed_symbols(),
            encoded: self.history.clone(),
            current_symbol: self.history.last().map(|encoded| encoded.symbol),
            tree_snapshot: self.tree.snapshot(),
        }
    }

    /// Starts over with an empty tree and stream, keeping the alphabet.
    pub fn reset(&mut self) {
        *self = Encoder::new(self.alphabet);
    }
}
