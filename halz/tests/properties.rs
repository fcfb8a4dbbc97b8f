//! Property tests over randomly generated inputs, capped to keep this
//! bounded: exhaustive fuzzing belongs in a separate campaign, not in every
//! test run.
use proptest::prelude::*;

use halz::core::DATA_SIZE;
use halz::{decode, encode, EncodeOptions};

fn any_input() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        // uniform random bytes
        prop::collection::vec(any::<u8>(), 0..4096),
        // biased toward a handful of values, to exercise RLE/back-ref search
        prop::collection::vec(0u8..4, 0..4096),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trips_in_every_option_combination(input in any_input()) {
        for fast in [false, true] {
            for optimal in [false, true] {
                let options = EncodeOptions { fast, optimal };
                let packed = encode(&input, options).unwrap();
                let (unpacked, _) = decode(&packed).unwrap();
                prop_assert_eq!(&unpacked, &input);
            }
        }
    }

    #[test]
    fn output_never_exceeds_the_data_size_cap(input in any_input()) {
        let packed = encode(&input, EncodeOptions::default()).unwrap();
        prop_assert!(packed.len() <= DATA_SIZE);
        let (unpacked, _) = decode(&packed).unwrap();
        prop_assert!(unpacked.len() <= DATA_SIZE);
    }

    #[test]
    fn optimal_mode_never_loses_badly_to_greedy(input in any_input()) {
        let greedy = encode(&input, EncodeOptions { fast: false, optimal: false }).unwrap();
        let optimal = encode(&input, EncodeOptions { fast: false, optimal: true }).unwrap();
        // the optimal search's admissible-but-loose literal edge cost (see
        // encode::optimal) means it is not guaranteed to strictly beat greedy,
        // only to stay within a literal-run header's worth of it.
        prop_assert!(optimal.len() <= greedy.len() + input.len() / 32 + 2);
    }

    #[test]
    fn rle16_size_field_is_halved_and_decremented(repeats in 2usize..400) {
        let mut input = Vec::with_capacity(repeats * 2);
        for _ in 0..repeats {
            input.push(0xAB);
            input.push(0xCD);
        }
        let packed = encode(&input, EncodeOptions::default()).unwrap();
        let (unpacked, _) = decode(&packed).unwrap();
        prop_assert_eq!(unpacked, input);
    }
}
