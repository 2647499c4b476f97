use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::node::{Node, NodeData};

/// Process-independent interning table: structural key to canonical node,
/// plus a per-level ladder of the all-dead node. Keeping one of these per
/// thread or per test, rather than sharing a global singleton, is deliberate
/// and preferred; `NodeLife` owns one through an `Rc<RefCell<_>>`.
pub struct NodeCache {
    table: FxHashMap<NodeData, Arc<Node>>,
    zero_nodes: Vec<Arc<Node>>,
}

impl NodeCache {
    pub fn new() -> Self {
        NodeCache { table: FxHashMap::default(), zero_nodes: Vec::new() }
    }

    /// Returns the canonical node for the given structural key, building a
    /// fresh one only if none exists yet.
    pub fn intern(&mut self, data: NodeData) -> Arc<Node> {
        if let Some(existing) = self.table.get(&data) {
            return existing.clone();
        }
        let population = match &data {
            NodeData::Leaf(alive) => *alive as u64,
            NodeData::Branch { nw, ne, sw, se, .. } => {
                nw.population + ne.population + sw.population + se.population
            }
        };
        let node = Arc::new(Node::new(data.clone(), population));
        self.table.insert(data, node.clone());
        log::trace!("interned node at level {} (table size {})", node.level(), self.table.len());
        node
    }

    pub fn cell(&mut self, alive: bool) -> Arc<Node> {
        self.intern(NodeData::Leaf(alive))
    }

    /// Canonical `level(nw)+1` node. All four children must share a level;
    /// this is a programmer-error precondition, asserted in all builds since
    /// the check is O(1).
    pub fn quad(
        &mut self,
        nw: Arc<Node>,
        ne: Arc<Node>,
        sw: Arc<Node>,
        se: Arc<Node>,
        warp_mode: bool,
    ) -> Arc<Node> {
        let level = nw.level();
        assert!(
            ne.level() == level && sw.level() == level && se.level() == level,
            "quad() requires four children of equal level, got {}/{}/{}/{}",
            nw.level(),
            ne.level(),
            sw.level(),
            se.level(),
        );
        self.intern(NodeData::Branch { nw, ne, sw, se, level: level + 1, warp_mode })
    }

    /// Canonical all-dead node at `level`, building the ladder up from
    /// `zero(0)` as needed.
    pub fn zero(&mut self, level: u8) -> Arc<Node> {
        while (self.zero_nodes.len() as u8) <= level {
            let next_level = self.zero_nodes.len() as u8;
            let node = if next_level == 0 {
                self.cell(false)
            } else {
                let child = self.zero_nodes[next_level as usize - 1].clone();
                self.quad(child.clone(), child.clone(), child.clone(), child, false)
            };
            self.zero_nodes.push(node);
        }
        self.zero_nodes[level as usize].clone()
    }

    /// Number of rows of the all-dead ladder built so far (diagnostic).
    pub fn zero_levels(&self) -> usize {
        self.zero_nodes.len()
    }

    /// Empties the table. Invalidates every outstanding `Arc<Node>` the
    /// caller still holds: they must be discarded, not reused against a
    /// cleared cache.
    pub fn clear(&mut self) {
        log::debug!("clearing node cache ({} interned nodes)", self.table.len());
        self.table.clear();
        self.zero_nodes.clear();
    }

    /// Number of interned nodes (diagnostic only).
    pub fn size(&self) -> usize {
        self.table.len()
    }
}

impl Default for NodeCache {
    fn default() -> Self {
        Self::new()
    }
}
