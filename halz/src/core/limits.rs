//! Architectural size caps shared by the decoder and encoder.
//!
//! These mirror the original tool suite's fixed-size buffers: both sides of
//! the codec operate on a single 64 KiB window and never grow beyond it.

/// Maximum size, in bytes, of either the decoded or the compressed stream.
pub const DATA_SIZE: usize = 65_536;

/// Maximum size of a single RLE or back-reference operation's length field
/// before it must be split across multiple opcodes (`rle_16` doubles this).
pub const LONG_RUN: usize = 1024;

/// Length threshold (inclusive) for the short opcode form; anything larger
/// uses the long form's 10-bit length field.
pub const RUN_SIZE: usize = 32;

/// Minimum match length for a back-reference candidate to be worth emitting.
pub const MIN_BACKREF_SIZE: usize = 4;

/// Minimum run length for an RLE candidate to be worth emitting.
pub const MIN_RLE_SIZE: usize = 3;
