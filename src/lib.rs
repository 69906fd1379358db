/*!
fgk_flex is a one-pass adaptive huffman coder in Rust, using the FGK (Faller-Gallager-Knuth)
algorithm.

Static huffman coding needs two passes: one to count the symbols and build the tree, and a
second one to encode. The tree then has to be sent along with the data. Adaptive huffman
coding instead starts with an empty tree on both sides and updates it after every symbol.
Encoder and decoder apply the exact same update, so their trees never diverge and no tree
is transmitted.

A symbol that was never seen before is sent as the code of the NYT (Not Yet Transmitted)
leaf, followed by the symbol in raw bits. After that the symbol has a code of its own, which
gets shorter the more often the symbol occurs.

The tree engine lives in the `hufflpuff` crate, the bit level I/O in `bitstream`.

```
let compressed = fgk_flex::compress(b"abracadabra").unwrap();
let decompressed = fgk_flex::decompress(&compressed).unwrap();
assert_eq!(decompressed, b"abracadabra");
```
*/

pub mod alphabet;
pub mod decoder;
pub mod encoder;
pub mod error;

#[cfg(test)]
mod proptests;

pub use crate::alphabet::{Alphabet, DEFAULT_ALPHABET_SIZE, MAX_ALPHABET_BITS};
pub use crate::decoder::{Decoder, DecoderState};
pub use crate::encoder::{EncodedSymbol, Encoder, EncoderState};
pub use crate::error::{Error, Result};
pub use hufflpuff::{BitSequence, Symbol, Tree, TreeSnapshot};

/// Compresses bytes with the byte alphabet.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Alphabet::bytes());
    encoder.encode_bytes(input)?;
    Ok(encoder.finish())
}

/// Reverses [`compress`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(Alphabet::bytes());
    let symbols = decoder.decode(input)?;
    // the byte alphabet only admits symbols below 256
    Ok(symbols.into_iter().map(|symbol| symbol as u8).collect())
}
