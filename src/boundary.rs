//! Boundary transforms that compose with `step::simple_step`/`step::warp_step`
//! to realize each `LifeMode`.

use std::sync::Arc;

use crate::cache::NodeCache;
use crate::node::Node;
use crate::step::centered_sub;

/// Returns a level+1 node whose center holds `node` and whose eight outer
/// level-(L-1) slots are dead. `node` must be a branch node (`level() >= 1`)
/// since the padding is expressed in terms of its four quadrants.
pub fn zero_pad(cache: &mut NodeCache, node: &Arc<Node>) -> Arc<Node> {
    let level = node.level();
    assert!(level >= 1, "zero_pad requires a branch node, got level {level}");
    let warp = node.is_warp();
    let (nw, ne, sw, se) = node.children().expect("branch node");
    let zero = cache.zero(level - 1);

    let new_nw = cache.quad(zero.clone(), zero.clone(), zero.clone(), nw.clone(), warp);
    let new_ne = cache.quad(zero.clone(), zero.clone(), ne.clone(), zero.clone(), warp);
    let new_sw = cache.quad(zero.clone(), sw.clone(), zero.clone(), zero.clone(), warp);
    let new_se = cache.quad(se.clone(), zero.clone(), zero.clone(), zero, warp);

    cache.quad(new_nw, new_ne, new_sw, new_se, warp)
}

/// Returns a level+1 node whose four quadrants are each the 2x2 tiling
/// `quad(se, sw, ne, nw)` of `node` — a torus unfolded so that stepping the
/// center advances one generation on the wrapped topology.
pub fn torus_pad(cache: &mut NodeCache, node: &Arc<Node>) -> Arc<Node> {
    let level = node.level();
    assert!(level >= 1, "torus_pad requires a branch node, got level {level}");
    let warp = node.is_warp();
    let (nw, ne, sw, se) = node.children().expect("branch node");
    let tile = cache.quad(se.clone(), sw.clone(), ne.clone(), nw.clone(), warp);
    cache.quad(tile.clone(), tile.clone(), tile.clone(), tile, warp)
}

/// Shrinks `node` to the smallest square with a non-empty border, never
/// going below level 2. Three cases, applied repeatedly:
/// - a single non-empty quadrant: descend straight into it;
/// - all four quadrants empty: descend into the level-1 zero node;
/// - the 12 outer-rim grandchildren (all but the four that meet at the
///   center) are empty: collapse to the centered level-(L-1) node and keep
///   pruning;
/// - otherwise the node is already minimal; return it unchanged.
pub fn zero_prune(cache: &mut NodeCache, node: &Arc<Node>) -> Arc<Node> {
    let mut current = node.clone();
    while current.level() > 2 {
        let warp = current.is_warp();
        let (nw, ne, sw, se) = current.children().expect("branch node");
        let (nw, ne, sw, se) = (nw.clone(), ne.clone(), sw.clone(), se.clone());

        let nonempty = [&nw, &ne, &sw, &se].into_iter().filter(|q| !q.is_empty()).count();
        if nonempty <= 1 {
            current = if !nw.is_empty() {
                nw
            } else if !ne.is_empty() {
                ne
            } else if !sw.is_empty() {
                sw
            } else if !se.is_empty() {
                se
            } else {
                cache.zero(current.level() - 1)
            };
            continue;
        }

        if outer_rim_empty(&nw, &ne, &sw, &se) {
            current = centered_sub(cache, &nw, &ne, &sw, &se, warp);
            continue;
        }

        break;
    }
    current
}

fn outer_rim_empty(nw: &Arc<Node>, ne: &Arc<Node>, sw: &Arc<Node>, se: &Arc<Node>) -> bool {
    let (nw_nw, nw_ne, nw_sw, _nw_se) = nw.children().expect("branch node");
    let (ne_nw, ne_ne, _ne_sw, ne_se) = ne.children().expect("branch node");
    let (sw_nw, _sw_ne, sw_sw, sw_se) = sw.children().expect("branch node");
    let (_se_nw, se_ne, se_sw, se_se) = se.children().expect("branch node");

    nw_nw.is_empty()
        && nw_ne.is_empty()
        && nw_sw.is_empty()
        && ne_nw.is_empty()
        && ne_ne.is_empty()
        && ne_se.is_empty()
        && sw_nw.is_empty()
        && sw_sw.is_empty()
        && sw_se.is_empty()
        && se_ne.is_empty()
        && se_sw.is_empty()
        && se_se.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec_build(cache: &mut NodeCache, alive: &[Vec<bool>], x: usize, y: usize, size: usize) -> Arc<Node> {
        if size == 1 {
            return cache.cell(alive[y][x]);
        }
        let half = size / 2;
        let nw = rec_build(cache, alive, x, y, half);
        let ne = rec_build(cache, alive, x + half, y, half);
        let sw = rec_build(cache, alive, x, y + half, half);
        let se = rec_build(cache, alive, x + half, y + half, half);
        cache.quad(nw, ne, sw, se, false)
    }

    fn build(cache: &mut NodeCache, side: usize, live: &[(usize, usize)]) -> Arc<Node> {
        let mut grid = vec![vec![false; side]; side];
        for &(r, c) in live {
            grid[r][c] = true;
        }
        rec_build(cache, &grid, 0, 0, side)
    }

    #[test]
    fn zero_pad_increases_level_and_preserves_population() {
        let mut cache = NodeCache::new();
        let node = build(&mut cache, 4, &[(1, 1), (1, 2)]);
        let padded = zero_pad(&mut cache, &node);
        assert_eq!(padded.level(), node.level() + 1);
        assert_eq!(padded.population, node.population);
    }

    #[test]
    fn torus_pad_quadruples_population() {
        let mut cache = NodeCache::new();
        let node = build(&mut cache, 4, &[(0, 0), (3, 3)]);
        let padded = torus_pad(&mut cache, &node);
        assert_eq!(padded.level(), node.level() + 1);
        assert_eq!(padded.population, node.population * 4);
    }

    #[test]
    fn zero_prune_collapses_empty_universe_to_level_two() {
        let mut cache = NodeCache::new();
        let node = cache.zero(5);
        let pruned = zero_prune(&mut cache, &node);
        assert_eq!(pruned.level(), 2);
        assert!(pruned.is_empty());
    }

    #[test]
    fn zero_prune_is_idempotent() {
        let mut cache = NodeCache::new();
        let node = build(&mut cache, 8, &[(3, 3), (3, 4), (4, 3), (4, 4)]);
        let padded = zero_pad(&mut cache, &node);
        let once = zero_prune(&mut cache, &padded);
        let twice = zero_prune(&mut cache, &once);
        assert!(Arc::ptr_eq(&once, &twice));
    }

    #[test]
    fn zero_prune_leaves_a_non_collapsible_node_unchanged() {
        let mut cache = NodeCache::new();
        // Spread live cells across all four quadrants' outer rims so the
        // node cannot collapse any further.
        let node = build(&mut cache, 8, &[(0, 0), (0, 7), (7, 0), (7, 7)]);
        let pruned = zero_prune(&mut cache, &node);
        assert!(Arc::ptr_eq(&node, &pruned));
    }
}
