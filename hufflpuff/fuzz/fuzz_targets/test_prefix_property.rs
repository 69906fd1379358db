#![no_main]

use hufflpuff::bits_to_string;
use hufflpuff::Symbol;
use hufflpuff::Tree;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let mut tree = Tree::default();
    for &byte in data {
        tree.encode_update(byte as Symbol).unwrap();
    }
    let mut codes: Vec<String> = tree.code_table().into_iter().map(|(_, code)| code).collect();
    codes.push(bits_to_string(&tree.path_to_nyt()));
    codes.sort();
    for pair in codes.windows(2) {
        assert!(!pair[1].starts_with(pair[0].as_str()));
    }
});
