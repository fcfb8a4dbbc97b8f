//! Optimal packing strategy: a shortest-path search over a per-position
//! candidate graph, admissible but intentionally not tight (see the literal
//! edge cost below).
use log::trace;

use crate::core::{EncodeError, LzMethod, RleMethod, LONG_RUN, MIN_BACKREF_SIZE};

use super::candidates::{ref_search, rle_check, BackrefCandidate, RleCandidate, TupleIndex};
use super::writer::{backref_outsize, rle_outsize, Writer};

#[derive(Clone, Copy)]
struct Node {
    distance: usize,
    prev: Option<usize>,
    next: Option<usize>,
    neighbor: usize,
    length: usize,
    is_backref: bool,
    data: u16,
    rle_method: RleMethod,
    lz_method: LzMethod,
}

impl Default for Node {
    fn default() -> Self {
        Node {
            distance: usize::MAX,
            prev: None,
            next: None,
            neighbor: 0,
            length: 0,
            is_backref: false,
            data: 0,
            rle_method: RleMethod::Rle8,
            lz_method: LzMethod::Norm,
        }
    }
}

pub(crate) fn pack_optimal(
    input: &[u8],
    index: &TupleIndex,
    fast: bool,
    writer: &mut Writer,
) -> Result<(), EncodeError> {
    let n = input.len();
    let mut nodes: Vec<Node> = (0..=n).map(|_| Node::default()).collect();

    for pos in 0..n {
        let rle = rle_check(input, pos, fast);
        let remaining = n - pos;
        let backref = if rle.size < LONG_RUN && remaining >= MIN_BACKREF_SIZE {
            ref_search(input, pos, index, fast)
        } else {
            BackrefCandidate::NONE
        };

        if backref.size > rle.size {
            nodes[pos].neighbor = backref.size;
            nodes[pos].length = backref_outsize(&backref);
            nodes[pos].is_backref = true;
            nodes[pos].data = backref.offset;
            nodes[pos].lz_method = backref.method;
        } else if rle.size >= 2 {
            nodes[pos].neighbor = rle.size;
            nodes[pos].length = rle_outsize(&rle);
            nodes[pos].is_backref = false;
            nodes[pos].data = rle.data;
            nodes[pos].rle_method = rle.method;
        }
    }

    // Shortest path search: every edge goes strictly forward, so a single
    // left-to-right sweep relaxes every edge exactly once (the graph is a
    // DAG ordered by input position).
    nodes[0].distance = 0;
    for i in 0..n {
        let dist = nodes[i].distance;

        // literal edge: one literal byte plus an amortised control byte.
        // This over-approximates the true cost of a long literal run (whose
        // header is shared across many bytes), making the search admissible
        // but not exact; that is intentional, see module docs.
        let literal_dist = dist + 2;
        if literal_dist < nodes[i + 1].distance {
            nodes[i + 1].distance = literal_dist;
            nodes[i + 1].prev = Some(i);
        }

        let neighbor = nodes[i].neighbor;
        if neighbor == 0 {
            continue;
        }
        let target = i + neighbor;
        let compressed_dist = dist + nodes[i].length;
        if compressed_dist < nodes[target].distance {
            nodes[target].distance = compressed_dist;
            nodes[target].prev = Some(i);
        }
    }

    trace!("encode: optimal path distance to end = {}", nodes[n].distance);

    let mut cursor = n;
    while let Some(prev) = nodes[cursor].prev {
        nodes[prev].next = Some(cursor);
        cursor = prev;
    }

    let mut pos = 0usize;
    while let Some(next) = nodes[pos].next {
        if next == pos + 1 {
            writer.push_literal_byte(input[pos], pos)?;
        } else if nodes[pos].is_backref {
            let backref = BackrefCandidate {
                offset: nodes[pos].data,
                size: next - pos,
                method: nodes[pos].lz_method,
            };
            writer.write_backref(&backref, pos)?;
        } else {
            let rle = RleCandidate {
                data: nodes[pos].data,
                size: next - pos,
                method: nodes[pos].rle_method,
            };
            writer.write_rle(&rle, pos)?;
        }
        pos = next;
    }

    Ok(())
}
