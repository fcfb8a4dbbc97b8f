//! Typed error hierarchy for the codec.
//!
//! The original tool suite signalled every failure with a `0` return value.
//! This reimplementation keeps that policy (nothing is retried, partial
//! output is never surfaced as success) but gives each failure a distinct,
//! inspectable variant instead of collapsing them into a sentinel.
use thiserror::Error;

use super::method::LzMethod;

/// Which back-reference opcode kind failed a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackrefKind {
    Forward,
    Rotated,
    Reverse,
}

impl From<LzMethod> for BackrefKind {
    fn from(method: LzMethod) -> Self {
        match method {
            LzMethod::Norm => BackrefKind::Forward,
            LzMethod::Rot => BackrefKind::Rotated,
            LzMethod::Rev => BackrefKind::Reverse,
        }
    }
}

/// Failure modes of [`crate::decode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// An opcode's operand (length byte, RLE data, or offset) ran past the
    /// end of the compressed input.
    #[error("truncated input: opcode at byte {at} needs more operand bytes than remain")]
    TruncatedInput { at: usize },

    /// A dispatched operation would write past the 64 KiB output cap.
    #[error("output overflow: operation at input byte {at} would exceed the 64 KiB output cap")]
    OutputOverflow { at: usize },

    /// A back-reference's offset/length combination reads outside the
    /// already-decoded output.
    #[error(
        "bad back-reference ({kind:?}): offset {offset:#06x} length {length} is out of bounds"
    )]
    BadBackref {
        kind: BackrefKind,
        offset: u16,
        length: u16,
    },
}

/// Failure modes of [`crate::encode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The input exceeds the 64 KiB domain the format can address.
    #[error("input too large: {len} bytes exceeds the 64 KiB codec limit")]
    InputTooLarge { len: usize },

    /// The compressed output would exceed the 64 KiB output cap.
    #[error("encode overflow: compressed output would exceed the 64 KiB cap at input byte {at}")]
    EncodeOverflow { at: usize },
}
