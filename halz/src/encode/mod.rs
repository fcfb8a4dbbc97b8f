//! # Encoder
//!
//! Turns raw bytes into a compressed stream. Candidate generation (RLE scan
//! plus back-reference search over a 4-byte tuple index) is shared by both
//! packing strategies: [`greedy`], which always takes the best local
//! candidate, and [`optimal`], which finds a minimum-cost path through the
//! whole input before writing anything.
mod candidates;
mod greedy;
mod optimal;
mod writer;

use log::debug;

use crate::core::{EncodeError, DATA_SIZE};
use candidates::TupleIndex;
use writer::Writer;

/// Tuning knobs for [`encode`].
///
/// `fast` skips the sequence-RLE and rotated/reverse back-reference search,
/// trading compression ratio for speed. `optimal` replaces the greedy
/// strategy with a shortest-path search over the whole input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub fast: bool,
    pub optimal: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            fast: false,
            optimal: false,
        }
    }
}

/// Compresses `input` into the wire format this crate's [`crate::decode`]
/// understands.
///
/// Fails with [`EncodeError::InputTooLarge`] if `input` exceeds the 64 KiB
/// domain, or [`EncodeError::EncodeOverflow`] if the compressed output would
/// itself exceed 64 KiB (only reachable on adversarially incompressible
/// near-64-KiB input).
pub fn encode(input: &[u8], options: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    if input.len() > DATA_SIZE {
        return Err(EncodeError::InputTooLarge { len: input.len() });
    }

    debug!(
        "encode: {} bytes, fast={} optimal={}",
        input.len(),
        options.fast,
        options.optimal
    );

    let index = TupleIndex::build(input);
    let mut writer = Writer::new();

    if !input.is_empty() {
        if options.optimal {
            optimal::pack_optimal(input, &index, options.fast, &mut writer)?;
        } else {
            greedy::pack_greedy(input, &index, options.fast, &mut writer)?;
        }
    }

    writer.write_terminator(input.len())?;
    let output = writer.into_output();
    debug!("encode: produced {} compressed bytes", output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode as decode_bytes;

    #[test]
    fn empty_input_encodes_to_just_the_terminator() {
        assert_eq!(encode(&[], EncodeOptions::default()).unwrap(), vec![0xFF]);
    }

    #[test]
    fn input_over_the_cap_is_rejected() {
        let input = vec![0u8; DATA_SIZE + 1];
        assert_eq!(
            encode(&input, EncodeOptions::default()).unwrap_err(),
            EncodeError::InputTooLarge { len: DATA_SIZE + 1 }
        );
    }

    #[test]
    fn round_trips_through_decode_in_every_option_combination() {
        let input = b"the quick brown fox jumps over the lazy dog, again and again and again and again";
        for fast in [false, true] {
            for optimal in [false, true] {
                let options = EncodeOptions { fast, optimal };
                let packed = encode(input, options).unwrap();
                let (unpacked, _) = decode_bytes(&packed).unwrap();
                assert_eq!(unpacked, input, "fast={} optimal={}", fast, optimal);
            }
        }
    }

    #[test]
    fn round_trips_an_input_too_short_for_any_backref() {
        let input = [0x01, 0x02];
        let packed = encode(&input, EncodeOptions::default()).unwrap();
        let (unpacked, _) = decode_bytes(&packed).unwrap();
        assert_eq!(unpacked, input);
    }

    #[test]
    fn round_trips_a_large_near_cap_incompressible_input() {
        // stays comfortably under DATA_SIZE so the literal-run header
        // overhead (a couple of bytes per 1024-byte flush) can't itself
        // push the compressed output over the cap.
        let mut state = 42u32;
        let input: Vec<u8> = (0..60_000)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) as u8
            })
            .collect();
        let packed = encode(&input, EncodeOptions::default()).unwrap();
        let (unpacked, _) = decode_bytes(&packed).unwrap();
        assert_eq!(unpacked, input);
    }
}
