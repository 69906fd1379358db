use super::*;

use proptest::prelude::*;

fn alphabet_and_message() -> impl Strategy<Value = (Alphabet, Vec<Symbol>)> {
    (2u32..2000).prop_flat_map(|size| {
        (
            Just(Alphabet::new(size).unwrap()),
            prop::collection::vec(0..size, 0..300),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn bytes_roundtrip(input in prop::collection::vec(any::<u8>(), 0..1000)) {
        let out = compress(&input).unwrap();
        prop_assert_eq!(decompress(&out).unwrap(), input);
    }

    #[test]
    fn skewed_bytes_roundtrip(input in prop::collection::vec(prop::sample::select(b"aaaaabbbcd ".to_vec()), 0..2000)) {
        let out = compress(&input).unwrap();
        prop_assert_eq!(decompress(&out).unwrap(), input);
    }

    #[test]
    fn alphabet_roundtrip((alphabet, message) in alphabet_and_message()) {
        let mut encoder = Encoder::new(alphabet);
        let mut decoder = Decoder::new(alphabet);
        encoder.encode(&message).unwrap();
        let encoded_bits = encoder.num_bits();
        let encoder_state = encoder.state();
        let out = encoder.finish();

        prop_assert_eq!(out.len(), encoded_bits / 8 + 1);
        prop_assert_eq!(&decoder.decode(&out).unwrap(), &message);
        prop_assert_eq!(decoder.state().tree_snapshot, encoder_state.tree_snapshot);
    }

    #[test]
    fn emitted_bits_match_code_queries(input in prop::collection::vec(0u8..16, 1..300)) {
        let mut encoder = Encoder::default();
        for &byte in &input {
            let symbol = byte as Symbol;
            let expected = match encoder.tree().code_for(symbol) {
                Some(code) => code,
                None => {
                    let mut bits = encoder.tree().path_to_nyt();
                    bits.extend((0..8).rev().map(|shift| (byte >> shift) & 1 == 1));
                    bits
                }
            };
            prop_assert_eq!(encoder.encode_symbol(symbol).unwrap(), expected);
        }
    }
}
