//! # Core library
//!
//! This is the core library containing the shared abstractions used by both
//! the decoder and the encoder: the size caps the wire format is built
//! around, the two compression-method enumerations, the bit-rotation
//! primitive, and the typed error hierarchy.
//!
//! ## Terms
//!
//! - A *back-reference* reproduces a span of already-decoded output by
//!   referring to an earlier absolute offset.
//! - *RLE* (run-length encoding) replaces a repeated pattern with the pattern
//!   plus a count.
//! - The *tuple index* maps every 4-byte substring of the input to its
//!   earliest occurrence, used to seed back-reference search.
//! - *LONG_RUN* is the architectural cap of 1024 on any single operation's
//!   length field.
pub(crate) mod bits;
pub(crate) mod error;
pub(crate) mod limits;
pub(crate) mod method;

pub use bits::rotate;
pub use error::{BackrefKind, DecodeError, EncodeError};
pub use limits::{DATA_SIZE, LONG_RUN, MIN_BACKREF_SIZE, MIN_RLE_SIZE, RUN_SIZE};
pub use method::{LzMethod, RleMethod};
