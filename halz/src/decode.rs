//! # Decoder
//!
//! A linear state machine that walks a compressed buffer opcode by opcode,
//! dispatching each one to the materialiser that appends the right bytes to
//! the output. The decoder is stateless across invocations: every call to
//! [`decode`] starts from a fresh, zero-filled output window.
use log::{debug, trace};

use crate::core::{rotate, BackrefKind, DecodeError, LzMethod, RleMethod, DATA_SIZE};
use crate::stats::DecodeStats;

/// Decodes a compressed byte stream into its original bytes.
///
/// `input` is read opcode by opcode until a `0xFF` terminator is found. The
/// decoded output is bounded to [`DATA_SIZE`] bytes; any operation that would
/// push past that cap fails the whole call rather than returning a partial
/// buffer.
///
/// Back-references read from the *decoded output itself*, including the span
/// currently being written (a self-extending copy). To keep that behaviour
/// byte-exact without risking an out-of-bounds panic on adversarial input,
/// the output is materialised into a fixed [`DATA_SIZE`]-byte window up
/// front; positions not yet written read as zero, matching the original
/// fixed-buffer implementation this format comes from.
pub fn decode(input: &[u8]) -> Result<(Vec<u8>, DecodeStats), DecodeError> {
    let mut output = vec![0u8; DATA_SIZE];
    let mut outpos: usize = 0;
    let mut inpos: usize = 0;
    let mut stats = DecodeStats::default();

    loop {
        let opcode = *input
            .get(inpos)
            .ok_or(DecodeError::TruncatedInput { at: inpos })?;
        inpos += 1;

        if opcode == 0xFF {
            debug!("decode: terminator at byte {}", inpos - 1);
            break;
        }

        let (raw_method, length): (u8, usize) = if opcode & 0xE0 == 0xE0 {
            let lsb = *input
                .get(inpos)
                .ok_or(DecodeError::TruncatedInput { at: inpos })?;
            inpos += 1;
            let method = (opcode >> 2) & 0x07;
            let length = ((((opcode & 0x03) as usize) << 8) | lsb as usize) + 1;
            (method, length)
        } else {
            ((opcode >> 5) & 0x07, ((opcode & 0x1F) as usize) + 1)
        };

        let write_len = if raw_method == 2 { 2 * length } else { length };
        if outpos + write_len > DATA_SIZE {
            return Err(DecodeError::OutputOverflow { at: inpos });
        }

        trace!(
            "decode: opcode={:#04x} method={} length={} inpos={} outpos={}",
            opcode,
            raw_method,
            length,
            inpos,
            outpos
        );

        match raw_method {
            // literal run
            0 => {
                let bytes = input
                    .get(inpos..inpos + length)
                    .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                output[outpos..outpos + length].copy_from_slice(bytes);
                outpos += length;
                inpos += length;
            }
            // RLE family: 1 (8-bit), 2 (16-bit), 3 (sequence)
            1..=3 => {
                match RleMethod::from_code(raw_method - 1) {
                    RleMethod::Rle8 => {
                        let byte = *input
                            .get(inpos)
                            .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                        inpos += 1;
                        for _ in 0..length {
                            output[outpos] = byte;
                            outpos += 1;
                        }
                    }
                    RleMethod::Rle16 => {
                        let x = *input
                            .get(inpos)
                            .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                        let y = *input
                            .get(inpos + 1)
                            .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                        inpos += 2;
                        for _ in 0..length {
                            output[outpos] = x;
                            output[outpos + 1] = y;
                            outpos += 2;
                        }
                    }
                    RleMethod::RleSeq => {
                        let start = *input
                            .get(inpos)
                            .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                        inpos += 1;
                        for i in 0..length {
                            output[outpos] = start.wrapping_add(i as u8);
                            outpos += 1;
                        }
                    }
                }
            }
            // back-reference family: 4 (forward), 5 (rotated), 6 (reverse),
            // 7 (quirk alias of 4)
            4..=7 => {
                let hi = *input
                    .get(inpos)
                    .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                let lo = *input
                    .get(inpos + 1)
                    .ok_or(DecodeError::TruncatedInput { at: inpos })?;
                inpos += 2;
                let offset = ((hi as u16) << 8) | lo as u16;
                // method 7 isn't assigned by the encoder, but the historical
                // decoder's bit mask leaks this value; it must behave exactly
                // like method 4, not like whatever LzMethod::from_code's mask
                // would otherwise map it to.
                let method = if raw_method == 7 {
                    LzMethod::Norm
                } else {
                    LzMethod::from_code(raw_method - 4)
                };

                match method {
                    LzMethod::Norm | LzMethod::Rot => {
                        if offset as usize + length > DATA_SIZE {
                            return Err(DecodeError::BadBackref {
                                kind: BackrefKind::from(method),
                                offset,
                                length: length as u16,
                            });
                        }
                        for i in 0..length {
                            let src = output[offset as usize + i];
                            output[outpos] = if method == LzMethod::Rot { rotate(src) } else { src };
                            outpos += 1;
                        }
                    }
                    LzMethod::Rev => {
                        if (offset as usize) < length.saturating_sub(1) {
                            return Err(DecodeError::BadBackref {
                                kind: BackrefKind::Reverse,
                                offset,
                                length: length as u16,
                            });
                        }
                        for i in 0..length {
                            let src = output[offset as usize - i];
                            output[outpos] = src;
                            outpos += 1;
                        }
                    }
                }
            }
            _ => unreachable!("raw_method is masked to 3 bits"),
        }

        stats.record(if raw_method == 7 { 4 } else { raw_method });
    }

    stats.bytes_consumed = inpos;
    output.truncate(outpos);
    debug!(
        "decode: consumed {} compressed bytes, produced {} decoded bytes",
        stats.bytes_consumed,
        output.len()
    );
    Ok((output, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_literal_byte() {
        let (out, stats) = decode(&[0x00, 0x00, 0xFF]).unwrap();
        assert_eq!(out, vec![0x00]);
        assert_eq!(stats.method_use_counts[0], 1);
        assert_eq!(stats.bytes_consumed, 3);
    }

    #[test]
    fn short_rle8_run() {
        // command=1 (rle_8), length=32 -> B = (1<<5) | (32-1) = 0x3F
        let (out, _) = decode(&[0x3F, 0x41, 0xFF]).unwrap();
        assert_eq!(out, vec![0x41; 32]);
    }

    #[test]
    fn sequence_rle() {
        let (out, _) = decode(&[0x7F, 0x00, 0xFF]).unwrap();
        let expected: Vec<u8> = (0u8..32).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn rle16_emits_pairs() {
        // method=1 (rle_16), length=3 -> B = 0x20 | (1<<5) | (3-1) = 0x42
        let (out, _) = decode(&[0x42, 0xAB, 0xCD, 0xFF]).unwrap();
        assert_eq!(out, vec![0xAB, 0xCD, 0xAB, 0xCD, 0xAB, 0xCD]);
    }

    #[test]
    fn forward_backref_can_self_extend() {
        // "ab" literal, then a forward backref to offset 0 length 4 builds
        // "ababab..." by reading bytes it has just written.
        let mut input = vec![0x01, b'a', b'b'];
        // method=0 (lz_norm), length=4 -> B = 0x80 | (0<<5) | (4-1) = 0x83
        input.extend_from_slice(&[0x83, 0x00, 0x00, 0xFF]);
        let (out, stats) = decode(&input).unwrap();
        assert_eq!(out, b"ababab");
        assert_eq!(stats.method_use_counts[4], 1);
    }

    #[test]
    fn rotated_backref_flips_bits() {
        let mut input = vec![0x00, 0x80]; // literal 0x80
        // method=1 (lz_rot), length=1 -> B = 0x80 | (1<<5) | 0 = 0xA0
        input.extend_from_slice(&[0xA0, 0x00, 0x00, 0xFF]);
        let (out, stats) = decode(&input).unwrap();
        assert_eq!(out, vec![0x80, 0x01]);
        assert_eq!(stats.method_use_counts[5], 1);
    }

    #[test]
    fn reverse_backref_walks_backwards() {
        let mut input = vec![0x02, 1, 2, 3]; // literal "1 2 3"
        // method=2 (lz_rev), length=3, offset=2 -> B = 0x80 | (2<<5) | 2 = 0xC2
        input.extend_from_slice(&[0xC2, 0x00, 0x02, 0xFF]);
        let (out, stats) = decode(&input).unwrap();
        assert_eq!(out, vec![1, 2, 3, 3, 2, 1]);
        assert_eq!(stats.method_use_counts[6], 1);
    }

    #[test]
    fn method_seven_quirk_behaves_like_method_four() {
        // Long form is the only envelope that can carry method 7 on the
        // wire (short form's top 3 bits would collide with the 0xFF
        // terminator), so both variants are built as long-form opcodes:
        // B = 0xE0 | (method << 2) | ((length-1) >> 8).
        let backref = |method: u8| -> Vec<u8> {
            let mut input = vec![0x01, b'x', b'y'];
            input.extend_from_slice(&[0xE0 | (method << 2), 0x03, 0x00, 0x00, 0xFF]);
            input
        };
        let (four, _) = decode(&backref(4)).unwrap();
        let (seven, _) = decode(&backref(7)).unwrap();
        assert_eq!(four, seven);
        assert_eq!(four, b"xyxyxy");
    }

    #[test]
    fn bad_forward_backref_reports_error() {
        // long-form method 7 (alias of 4), length 2, offset 0xFFFF:
        // B = 0xE0 | (7<<2) | 0 = 0xFC, length lsb = 0x01, offset = 0xFFFF.
        // offset 0xFFFF + length 1 lands exactly on the last valid byte, so
        // length must be 2 to actually walk past the 64 KiB window.
        let stream = [0xFC, 0x01, 0xFF, 0xFF];
        let err = decode(&stream).unwrap_err();
        assert_eq!(
            err,
            DecodeError::BadBackref {
                kind: BackrefKind::Forward,
                offset: 0xFFFF,
                length: 2,
            }
        );
    }

    #[test]
    fn bad_reverse_backref_reports_error() {
        // method=2 (lz_rev), length=5, offset=1 -> offset < length - 1
        let stream = [0x80 | (2 << 5) | 4, 0x00, 0x01, 0xFF];
        let err = decode(&stream).unwrap_err();
        assert_eq!(
            err,
            DecodeError::BadBackref {
                kind: BackrefKind::Reverse,
                offset: 1,
                length: 5,
            }
        );
    }

    #[test]
    fn truncated_opcode_operand_is_reported() {
        // short RLE-8 claims a data byte that never arrives.
        let stream = [0x20];
        assert_eq!(
            decode(&stream).unwrap_err(),
            DecodeError::TruncatedInput { at: 1 }
        );
    }

    #[test]
    fn output_overflow_is_reported() {
        // a long RLE-8 run of the maximum 1024 bytes, repeated until the
        // 64 KiB output cap would be exceeded by one more run.
        let mut stream = Vec::new();
        let runs = DATA_SIZE / 1024;
        for _ in 0..runs {
            // long-form rle_8 (command 1), size 1024:
            // B = 0xE0 | (1<<2) | ((1024-1)>>8) = 0xE7, size lsb = 0xFF
            stream.extend_from_slice(&[0xE7, 0xFF, 0x00]);
        }
        stream.extend_from_slice(&[0x00, 0x00]); // one more literal byte tips it over
        stream.push(0xFF);
        assert_eq!(
            decode(&stream).unwrap_err(),
            DecodeError::OutputOverflow { at: stream.len() - 2 }
        );
    }
}
