//! # Statistics
//!
//! Counters and reporting helpers surfaced alongside the codec's main
//! operations. `DecodeStats` mirrors the original tool suite's
//! `unpack_stats_t`; `ProbTable` is a generic sorted occurrence counter
//! reused by the CLI's `sniff` subcommand to rank which compression methods
//! dominated a given hit.
mod probtable;

pub use probtable::ProbTable;

/// Per-decode statistics returned alongside the decoded bytes.
///
/// `method_use_counts` is indexed by the decoder's raw dispatch value
/// (0..=6); the method-7 alias (see [`crate::decode`]) is folded into slot 4
/// since it behaves identically to method 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    pub method_use_counts: [u32; 7],
    pub bytes_consumed: usize,
}

impl DecodeStats {
    pub(crate) fn record(&mut self, method: u8) {
        debug_assert!(method < 7);
        self.method_use_counts[method as usize] += 1;
    }

    /// Feed the per-opcode method counts into a [`ProbTable`] for ranked
    /// reporting (used by the `sniff` CLI subcommand).
    pub fn method_table(&self) -> ProbTable<u8> {
        let mut table = ProbTable::with_capacity(7);
        for (method, &count) in self.method_use_counts.iter().enumerate() {
            for _ in 0..count {
                table.insert(method as u8);
            }
        }
        table
    }
}
