use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use petgraph::graph::NodeIndex;

/// Tentative label of a junction: total effective time, then arc count.
/// Compared lexicographically so equal-time paths prefer fewer arcs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(super) struct Label {
    pub(super) cost: OrderedFloat<f64>,
    pub(super) hops: u32,
}

impl Label {
    pub(super) const ZERO: Label = Label {
        cost: OrderedFloat(0.0),
        hops: 0,
    };
    pub(super) const UNREACHED: Label = Label {
        cost: OrderedFloat(f64::INFINITY),
        hops: u32::MAX,
    };
}

#[derive(Copy, Clone, Eq, PartialEq)]
pub(super) struct State {
    pub(super) label: Label,
    /// Push order, keeps pops deterministic between equal labels
    pub(super) seq: u64,
    pub(super) node: NodeIndex,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by label, then by push order (reversed from standard Rust BinaryHeap)
        other
            .label
            .cmp(&self.label)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
