/*!
hufflpuff is the tree engine of an adaptive (one-pass) Huffman coder using the FGK
(Faller-Gallager-Knuth) update rule.

The tree starts as a single NYT (Not Yet Transmitted) leaf. Every observed symbol either
splits the NYT leaf (first occurrence) or increments an existing leaf. The increment walks
from that point up to the root, and at every step swaps the node with the highest numbered
node of the same weight (its block leader) before incrementing. This keeps the sibling
property intact without ever rebuilding the tree from frequency counts.

```
use hufflpuff::{bits_to_string, Tree};

let mut tree = Tree::default();
assert_eq!(tree.code_for(b'a' as u32), None);
assert!(tree.path_to_nyt().is_empty());

tree.encode_update(b'a' as u32).unwrap();
assert_eq!(bits_to_string(&tree.code_for(b'a' as u32).unwrap()), "1");
assert_eq!(bits_to_string(&tree.path_to_nyt()), "0");
```
*/

mod error;
pub mod tree;

use bitvec::prelude::*;

pub use crate::error::{CapacityError, InvariantViolation};
pub use crate::tree::snapshot::{NodeRecord, TreeSnapshot};
pub use crate::tree::tree_node::Node;
pub use crate::tree::Tree;

/// A symbol of the input alphabet, e.g. a byte or a codepoint.
pub type Symbol = u32;

/// Position of a node in the arena of its tree. Stable for the lifetime of the tree.
pub type NodeId = usize;

/// Path bits, MSB-first. A step into the left child is `0`, into the right child `1`.
pub type BitSequence = BitVec<u8, Msb0>;

/// The byte alphabet.
pub const DEFAULT_MAX_SYMBOLS: u32 = u8::MAX as u32 + 1;

/// renders the bits as a string of `0` and `1`
pub fn bits_to_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

#[test]
fn test_bits_to_string() {
    assert_eq!(bits_to_string(&BitSequence::new()), "");
    assert_eq!(bits_to_string(&bitvec![u8, Msb0; 0, 1, 1, 0]), "0110");
}
