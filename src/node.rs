use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// The immutable, interned quadtree value described by the data model: either
/// a single base cell (level 0) or four equal-level children tiling a
/// `2^level x 2^level` region as `nw | ne` over `sw | se`.
#[derive(Clone)]
pub enum NodeData {
    Leaf(bool),
    Branch {
        nw: Arc<Node>,
        ne: Arc<Node>,
        sw: Arc<Node>,
        se: Arc<Node>,
        level: u8,
        /// Participates in structural identity: a node built for warp-step
        /// semantics and one built for simple-step semantics never share a
        /// `result` slot even if their children are identical.
        warp_mode: bool,
    },
}

impl PartialEq for NodeData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeData::Leaf(a), NodeData::Leaf(b)) => a == b,
            (
                NodeData::Branch { nw: nw1, ne: ne1, sw: sw1, se: se1, level: l1, warp_mode: w1 },
                NodeData::Branch { nw: nw2, ne: ne2, sw: sw2, se: se2, level: l2, warp_mode: w2 },
            ) => {
                l1 == l2
                    && w1 == w2
                    && Arc::ptr_eq(nw1, nw2)
                    && Arc::ptr_eq(ne1, ne2)
                    && Arc::ptr_eq(sw1, sw2)
                    && Arc::ptr_eq(se1, se2)
            }
            _ => false,
        }
    }
}

impl Eq for NodeData {}

impl Hash for NodeData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            NodeData::Leaf(alive) => {
                0u8.hash(state);
                alive.hash(state);
            }
            NodeData::Branch { nw, ne, sw, se, level, warp_mode } => {
                1u8.hash(state);
                level.hash(state);
                warp_mode.hash(state);
                (Arc::as_ptr(nw) as usize).hash(state);
                (Arc::as_ptr(ne) as usize).hash(state);
                (Arc::as_ptr(sw) as usize).hash(state);
                (Arc::as_ptr(se) as usize).hash(state);
            }
        }
    }
}

pub struct Node {
    pub data: NodeData,
    pub population: u64,

    /// Memoized center next-generation result, lazily filled. Keyed by this
    /// node's identity alone: since `warp_mode` is part of that identity,
    /// simple-step and warp-step results never collide in the same slot.
    result: OnceLock<Arc<Node>>,
}

impl Node {
    pub(crate) fn new(data: NodeData, population: u64) -> Self {
        Node { data, population, result: OnceLock::new() }
    }

    pub fn level(&self) -> u8 {
        match &self.data {
            NodeData::Leaf(_) => 0,
            NodeData::Branch { level, .. } => *level,
        }
    }

    /// Cell state of a base (level 0) node. Panics on a branch node.
    pub fn alive(&self) -> bool {
        match &self.data {
            NodeData::Leaf(alive) => *alive,
            NodeData::Branch { .. } => panic!("alive() called on a branch node"),
        }
    }

    /// Whether this interior node was interned for warp-step semantics.
    /// Base nodes report `false`.
    pub fn is_warp(&self) -> bool {
        match &self.data {
            NodeData::Leaf(_) => false,
            NodeData::Branch { warp_mode, .. } => *warp_mode,
        }
    }

    /// `isEmpty`: true iff every base descendant is dead. Equivalent to
    /// `population == 0`, which is what this crate stores instead of a
    /// separate flag (same invariant, cheaper to maintain).
    pub fn is_empty(&self) -> bool {
        self.population == 0
    }

    /// Conway's rule applied to this base cell given a neighbor sum.
    pub fn next_alive(&self, sum: u8) -> bool {
        let alive = self.alive();
        sum == 3 || (alive && sum == 2)
    }

    pub fn children(&self) -> Option<(&Arc<Node>, &Arc<Node>, &Arc<Node>, &Arc<Node>)> {
        match &self.data {
            NodeData::Leaf(_) => None,
            NodeData::Branch { nw, ne, sw, se, .. } => Some((nw, ne, sw, se)),
        }
    }

    pub(crate) fn result(&self) -> Option<&Arc<Node>> {
        self.result.get()
    }

    /// Stores the memoized next-generation result. A no-op if already set
    /// (the recursion may race to compute the same value twice within a
    /// single thread only via re-entrant bugs; `OnceLock` makes either
    /// outcome safe and `result()` callers always observe the first value).
    pub(crate) fn set_result(&self, result: Arc<Node>) {
        let _ = self.result.set(result);
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self as *const Node as usize).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(alive: bool) -> Arc<Node> {
        Arc::new(Node::new(NodeData::Leaf(alive), alive as u64))
    }

    #[test]
    fn level_zero_is_leaf() {
        assert_eq!(leaf(true).level(), 0);
        assert_eq!(leaf(false).level(), 0);
    }

    #[test]
    fn next_alive_follows_conways_rule() {
        let dead = leaf(false);
        let alive = leaf(true);
        assert!(!dead.next_alive(2));
        assert!(dead.next_alive(3));
        assert!(alive.next_alive(2));
        assert!(alive.next_alive(3));
        assert!(!alive.next_alive(1));
        assert!(!alive.next_alive(4));
    }

    #[test]
    fn is_empty_matches_population() {
        assert!(leaf(false).is_empty());
        assert!(!leaf(true).is_empty());
    }

    #[test]
    #[should_panic]
    fn alive_panics_on_branch() {
        let nw = leaf(false);
        let ne = leaf(false);
        let sw = leaf(false);
        let se = leaf(false);
        let branch = Node::new(
            NodeData::Branch { nw, ne, sw, se, level: 1, warp_mode: false },
            0,
        );
        branch.alive();
    }
}
