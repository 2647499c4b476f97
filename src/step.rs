//! Next-generation cores: the nine-subnode decomposition shared by the
//! simple (one-generation) and warp (`2^(level-1)`-generation) algorithms.
//! The two diverge only in how the nine once-stepped sub-results are
//! recombined: `simple_step` assembles the final node directly from them,
//! while `warp_step` joins them into a coarser grid and steps that again,
//! doubling the generations covered at every level of recursion.

use std::sync::Arc;

use crate::cache::NodeCache;
use crate::node::Node;

/// Advances the centered `2^(level-1) x 2^(level-1)` region by one
/// generation. `node` must have `level() >= 2` and must not be warp-tagged
/// (a node only ever serves one of `simple_step`/`warp_step`, enforced by
/// `warp_mode` being part of its structural identity).
pub fn simple_step(cache: &mut NodeCache, node: &Arc<Node>) -> Arc<Node> {
    assert!(node.level() >= 2, "next-generation requires level >= 2, got {}", node.level());
    assert!(!node.is_warp(), "simple_step called on a node interned for warp semantics");
    step_inner(cache, node, false)
}

/// Advances the centered region by `2^(level-1)` generations. `node` must
/// have `level() >= 2` and must be warp-tagged (`is_warp() == true`); calling
/// this on a node that was never interned with warp semantics is a
/// programmer error, not a recoverable one.
pub fn warp_step(cache: &mut NodeCache, node: &Arc<Node>) -> Arc<Node> {
    assert!(node.level() >= 2, "next-generation requires level >= 2, got {}", node.level());
    assert!(node.is_warp(), "warp_step requires a node interned with warp_mode = true");
    step_inner(cache, node, true)
}

fn step_inner(cache: &mut NodeCache, node: &Arc<Node>, warp: bool) -> Arc<Node> {
    debug_assert_eq!(node.is_warp(), warp);
    if let Some(result) = node.result() {
        return result.clone();
    }

    let result = if node.level() == 2 {
        base_case(cache, node, warp)
    } else {
        let (nw, ne, sw, se) = node.children().expect("branch node at level >= 3");

        let n00 = nw.clone();
        let n02 = ne.clone();
        let n20 = sw.clone();
        let n22 = se.clone();
        let n01 = centered_horizontal(cache, nw, ne, warp);
        let n21 = centered_horizontal(cache, sw, se, warp);
        let n10 = centered_vertical(cache, nw, sw, warp);
        let n12 = centered_vertical(cache, ne, se, warp);
        let n11 = centered_sub(cache, nw, ne, sw, se, warp);

        let r00 = step_inner(cache, &n00, warp);
        let r01 = step_inner(cache, &n01, warp);
        let r02 = step_inner(cache, &n02, warp);
        let r10 = step_inner(cache, &n10, warp);
        let r11 = step_inner(cache, &n11, warp);
        let r12 = step_inner(cache, &n12, warp);
        let r20 = step_inner(cache, &n20, warp);
        let r21 = step_inner(cache, &n21, warp);
        let r22 = step_inner(cache, &n22, warp);

        if warp {
            // Each r_ij already covers one recursion level's worth of
            // generations; joining them into a coarser grid and stepping
            // that again doubles the generations covered, which is exactly
            // the hyperstep's 2^(level-1) semantics.
            let q_nw = cache.quad(r00, r01.clone(), r10.clone(), r11.clone(), warp);
            let q_ne = cache.quad(r01, r02, r11.clone(), r12.clone(), warp);
            let q_sw = cache.quad(r10, r11.clone(), r20, r21.clone(), warp);
            let q_se = cache.quad(r11, r12, r21, r22, warp);

            let final_nw = step_inner(cache, &q_nw, warp);
            let final_ne = step_inner(cache, &q_ne, warp);
            let final_sw = step_inner(cache, &q_sw, warp);
            let final_se = step_inner(cache, &q_se, warp);

            cache.quad(final_nw, final_ne, final_sw, final_se, warp)
        } else {
            // r00..r22 are already the one-generation-later centers of the
            // nine overlapping subnodes; no second evolution is needed,
            // just the same overlapping-window extraction `centered_sub`
            // uses elsewhere, applied to the stepped results themselves.
            let final_nw = centered_sub(cache, &r00, &r01, &r10, &r11, warp);
            let final_ne = centered_sub(cache, &r01, &r02, &r11, &r12, warp);
            let final_sw = centered_sub(cache, &r10, &r11, &r20, &r21, warp);
            let final_se = centered_sub(cache, &r11, &r12, &r21, &r22, warp);

            cache.quad(final_nw, final_ne, final_sw, final_se, warp)
        }
    };

    node.set_result(result.clone());
    result
}

/// Builds the level-(L-1) node straddling `left`'s east edge and `right`'s
/// west edge, from their innermost grandchildren.
pub(crate) fn centered_horizontal(
    cache: &mut NodeCache,
    left: &Arc<Node>,
    right: &Arc<Node>,
    warp: bool,
) -> Arc<Node> {
    let (_, l_ne, _, l_se) = left.children().expect("centered_horizontal requires branch nodes");
    let (r_nw, _, r_sw, _) = right.children().expect("centered_horizontal requires branch nodes");
    cache.quad(l_ne.clone(), r_nw.clone(), l_se.clone(), r_sw.clone(), warp)
}

/// Builds the level-(L-1) node straddling `top`'s south edge and `bottom`'s
/// north edge.
pub(crate) fn centered_vertical(
    cache: &mut NodeCache,
    top: &Arc<Node>,
    bottom: &Arc<Node>,
    warp: bool,
) -> Arc<Node> {
    let (_, _, t_sw, t_se) = top.children().expect("centered_vertical requires branch nodes");
    let (b_nw, b_ne, _, _) = bottom.children().expect("centered_vertical requires branch nodes");
    cache.quad(t_sw.clone(), t_se.clone(), b_nw.clone(), b_ne.clone(), warp)
}

/// Builds the innermost level-(L-1) node from the single grandchild of each
/// quadrant nearest the center.
pub(crate) fn centered_sub(
    cache: &mut NodeCache,
    nw: &Arc<Node>,
    ne: &Arc<Node>,
    sw: &Arc<Node>,
    se: &Arc<Node>,
    warp: bool,
) -> Arc<Node> {
    let nw_se = nw.children().expect("centered_sub requires branch nodes").3.clone();
    let ne_sw = ne.children().expect("centered_sub requires branch nodes").2.clone();
    let sw_ne = sw.children().expect("centered_sub requires branch nodes").1.clone();
    let se_nw = se.children().expect("centered_sub requires branch nodes").0.clone();
    cache.quad(nw_se, ne_sw, sw_ne, se_nw, warp)
}

/// Shared recursion terminator: a level-2 node (16 base cells) advances to a
/// level-1 node (its center 2x2) by direct application of Conway's rule.
fn base_case(cache: &mut NodeCache, node: &Arc<Node>, warp: bool) -> Arc<Node> {
    let grid = cells_4x4(node);
    let next = |r: usize, c: usize| -> bool {
        let alive = grid[r][c];
        let mut sum = 0u8;
        for dr in [-1i32, 0, 1] {
            for dc in [-1i32, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let rr = r as i32 + dr;
                let cc = c as i32 + dc;
                if (0..4).contains(&rr) && (0..4).contains(&cc) && grid[rr as usize][cc as usize] {
                    sum += 1;
                }
            }
        }
        sum == 3 || (alive && sum == 2)
    };

    let nw = cache.cell(next(1, 1));
    let ne = cache.cell(next(1, 2));
    let sw = cache.cell(next(2, 1));
    let se = cache.cell(next(2, 2));
    cache.quad(nw, ne, sw, se, warp)
}

fn cells_4x4(node: &Arc<Node>) -> [[bool; 4]; 4] {
    let (nw, ne, sw, se) = node.children().expect("base_case requires a level-2 branch node");
    let quadrant = |n: &Arc<Node>| -> [[bool; 2]; 2] {
        let (a, b, c, d) = n.children().expect("level-1 children expected");
        [[a.alive(), b.alive()], [c.alive(), d.alive()]]
    };
    let a = quadrant(nw);
    let b = quadrant(ne);
    let c = quadrant(sw);
    let d = quadrant(se);
    [
        [a[0][0], a[0][1], b[0][0], b[0][1]],
        [a[1][0], a[1][1], b[1][0], b[1][1]],
        [c[0][0], c[0][1], d[0][0], d[0][1]],
        [c[1][0], c[1][1], d[1][0], d[1][1]],
    ]
}
