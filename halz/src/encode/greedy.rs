//! Greedy packing strategy: take the best candidate at each position with
//! no lookahead.
use log::trace;

use crate::core::{EncodeError, LONG_RUN, MIN_BACKREF_SIZE};

use super::candidates::{ref_search, rle_check, BackrefCandidate, TupleIndex};
use super::writer::Writer;

pub(crate) fn pack_greedy(
    input: &[u8],
    index: &TupleIndex,
    fast: bool,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    let mut pos = 0usize;
    while pos < input.len() {
        let rle = rle_check(input, pos, fast);
        let remaining = input.len() - pos;
        let backref = if rle.size < LONG_RUN && remaining >= MIN_BACKREF_SIZE {
            ref_search(input, pos, index, fast)
        } else {
            BackrefCandidate::NONE
        };

        if backref.size > rle.size {
            trace!(
                "encode: greedy backref at {} -> offset {:#06x} size {} method {:?}",
                pos,
                backref.offset,
                backref.size,
                backref.method
            );
            writer.write_backref(&backref, pos)?;
            pos += backref.size;
        } else if rle.size >= 2 {
            trace!(
                "encode: greedy rle at {} -> size {} method {:?}",
                pos,
                rle.size,
                rle.method
            );
            writer.write_rle(&rle, pos)?;
            pos += rle.size;
        } else {
            writer.push_literal_byte(input[pos], pos)?;
            pos += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_backref_over_a_shorter_rle() {
        let input = b"abcdwxyzabcd";
        let index = TupleIndex::build(input);
        let mut writer = Writer::new();
        pack_greedy(input, &index, false, &mut writer).unwrap();
        writer.write_terminator(input.len()).unwrap();
        let out = writer.into_output();
        // a backref opcode's control byte has its top bit set
        assert!(out.iter().any(|&b| b & 0x80 != 0 && b != 0xFF));
    }

    #[test]
    fn falls_back_to_literals_for_incompressible_input() {
        let input = [1u8, 2, 3];
        let index = TupleIndex::build(&input);
        let mut writer = Writer::new();
        pack_greedy(&input, &index, false, &mut writer).unwrap();
        writer.write_terminator(input.len()).unwrap();
        assert_eq!(writer.into_output(), vec![0x02, 1, 2, 3, 0xFF]);
    }
}
