//! Compression method tags.
//!
//! RLE and LZ back-references each have three variants. Both enumerations
//! share the same three-valued range (0, 1, 2) because the wire format packs
//! the method index into three bits of the opcode's control byte regardless
//! of which family the opcode belongs to.

/// Run-length encoding variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RleMethod {
    /// A single byte repeated `size` times.
    Rle8 = 0,
    /// A byte pair repeated `size / 2` times.
    Rle16 = 1,
    /// An arithmetic sequence `s, s+1, s+2, ...` (mod 256).
    RleSeq = 2,
}

impl RleMethod {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => RleMethod::Rle8,
            1 => RleMethod::Rle16,
            _ => RleMethod::RleSeq,
        }
    }
}

/// Back-reference (LZ) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzMethod {
    /// Forward copy, byte-for-byte.
    Norm = 0,
    /// Forward copy with each source byte bit-reversed.
    Rot = 1,
    /// Copy that walks the source backwards.
    Rev = 2,
}

impl LzMethod {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Self {
        match code & 0x03 {
            0 => LzMethod::Norm,
            1 => LzMethod::Rot,
            _ => LzMethod::Rev,
        }
    }
}
