#![no_main]

use hufflpuff::Symbol;
use hufflpuff::Tree;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // small alphabet so the capacity limit is hit as well
    let mut tree = Tree::new(200);
    for &byte in data {
        let known = tree.contains(byte as Symbol);
        if tree.encode_update(byte as Symbol).is_err() {
            assert!(!known && tree.num_symbols() == 200);
        }
        if let Err(violation) = tree.check_invariants() {
            panic!("{}", violation);
        }
    }
});
