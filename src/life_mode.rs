//! `LifeModes` façade: binds a canonical `Node` to a boundary mode and
//! produces the next instance in the same mode.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::boundary::{torus_pad, zero_pad, zero_prune};
use crate::cache::NodeCache;
use crate::error::LifeError;
use crate::life::Life;
use crate::node::{Node, NodeData};
use crate::signature::signature_of;
use crate::step::{simple_step, warp_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeMode {
    Torus,
    Cropped,
    Open,
    Warp,
}

impl LifeMode {
    fn name(self) -> &'static str {
        match self {
            LifeMode::Torus => "torus",
            LifeMode::Cropped => "cropped",
            LifeMode::Open => "open",
            LifeMode::Warp => "warp",
        }
    }
}

pub struct NodeLife {
    cache: Rc<RefCell<NodeCache>>,
    root: Arc<Node>,
    mode: LifeMode,
}

impl NodeLife {
    /// Builds the initial canonical node from a square grid. The grid's side
    /// is padded up to a power of two at least 4 (the minimum level a
    /// next-generation operation can run on); cells outside the input are
    /// dead. In `Warp` mode, the tree is further zero-padded until its level
    /// is at least `warp_level`.
    pub fn create(
        grid: &[Vec<bool>],
        mode: LifeMode,
        warp_level: Option<u8>,
    ) -> Result<Self, LifeError> {
        let rows = grid.len();
        for row in grid {
            if row.len() != rows {
                return Err(LifeError::NonSquareGrid { rows, row_len: row.len() });
            }
        }

        let warp = matches!(mode, LifeMode::Warp);
        let mut level = 2u8;
        while (1u64 << level) < rows as u64 {
            level += 1;
        }

        let mut cache = NodeCache::new();
        let mut root = build_from_grid(&mut cache, grid, 0, 0, level, warp);

        if warp {
            let target = warp_level.unwrap_or(level).max(level);
            while root.level() < target {
                root = zero_pad(&mut cache, &root);
            }
        }

        log::info!("built {} universe at level {} ({} live cells)", mode.name(), root.level(), root.population);

        Ok(NodeLife { cache: Rc::new(RefCell::new(cache)), root, mode })
    }

    pub fn mode(&self) -> LifeMode {
        self.mode
    }

    /// The underlying quadtree's level (`size() == 2^level()`).
    pub fn level(&self) -> u8 {
        self.root.level()
    }

    /// Produces the next instance in the same mode, by composing a boundary
    /// transform with a step algorithm:
    /// - Torus: `TorusPad -> SimpleStep`
    /// - Cropped: `ZeroPad -> SimpleStep`
    /// - Open: `ZeroPad -> ZeroPad -> SimpleStep -> ZeroPrune`
    /// - Warp: `ZeroPad -> WarpStep`
    pub fn advance(&self) -> NodeLife {
        let mut cache = self.cache.borrow_mut();
        let new_root = match self.mode {
            LifeMode::Torus => {
                let padded = torus_pad(&mut cache, &self.root);
                simple_step(&mut cache, &padded)
            }
            LifeMode::Cropped => {
                let padded = zero_pad(&mut cache, &self.root);
                simple_step(&mut cache, &padded)
            }
            LifeMode::Open => {
                let padded = zero_pad(&mut cache, &self.root);
                let padded = zero_pad(&mut cache, &padded);
                let stepped = simple_step(&mut cache, &padded);
                zero_prune(&mut cache, &stepped)
            }
            LifeMode::Warp => {
                let padded = zero_pad(&mut cache, &self.root);
                warp_step(&mut cache, &padded)
            }
        };
        drop(cache);
        NodeLife { cache: self.cache.clone(), root: new_root, mode: self.mode }
    }

    fn bound(&self) -> Option<(i64, i64, i64, i64)> {
        let coords = self.alive_coords();
        if coords.is_empty() {
            return None;
        }
        let min_row = coords.iter().map(|&(r, _)| r).min().unwrap();
        let max_row = coords.iter().map(|&(r, _)| r).max().unwrap();
        let min_col = coords.iter().map(|&(_, c)| c).min().unwrap();
        let max_col = coords.iter().map(|&(_, c)| c).max().unwrap();
        Some((min_row, max_row, min_col, max_col))
    }
}

impl Life for NodeLife {
    fn name(&self) -> &str {
        self.mode.name()
    }

    fn size(&self) -> u64 {
        1u64 << self.root.level()
    }

    fn generation_step(&self) -> u64 {
        match self.mode {
            LifeMode::Warp => self.size() / 2,
            _ => 1,
        }
    }

    fn next(&self) -> Box<dyn Life> {
        Box::new(self.advance())
    }

    fn extract_grid(&self) -> Vec<Vec<bool>> {
        let size = self.size() as usize;
        let mut grid = vec![vec![false; size]; size];
        fill_grid(&self.root, 0, 0, size as i64, &mut grid);
        grid
    }

    fn alive_coords(&self) -> Vec<(i64, i64)> {
        let size = self.size() as i64;
        let mut out = Vec::new();
        collect_alive(&self.root, 0, 0, size, &mut out);
        out.sort();
        out
    }

    fn signature(&self) -> String {
        signature_of(&self.alive_coords())
    }

    fn alive_count(&self) -> u64 {
        self.root.population
    }

    fn extra_info(&self) -> Option<String> {
        let nodes = self.cache.borrow().size();
        match self.bound() {
            Some((min_row, max_row, min_col, max_col)) => Some(format!(
                "bound=({min_row},{max_row},{min_col},{max_col}) nodes={nodes}"
            )),
            None => Some(format!("bound=none nodes={nodes}")),
        }
    }
}

fn build_from_grid(
    cache: &mut NodeCache,
    grid: &[Vec<bool>],
    x: i64,
    y: i64,
    level: u8,
    warp: bool,
) -> Arc<Node> {
    if level == 0 {
        let alive = grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(false);
        return cache.cell(alive);
    }
    let half = 1i64 << (level - 1);
    let nw = build_from_grid(cache, grid, x, y, level - 1, warp);
    let ne = build_from_grid(cache, grid, x + half, y, level - 1, warp);
    let sw = build_from_grid(cache, grid, x, y + half, level - 1, warp);
    let se = build_from_grid(cache, grid, x + half, y + half, level - 1, warp);
    cache.quad(nw, ne, sw, se, warp)
}

fn collect_alive(node: &Arc<Node>, x: i64, y: i64, size: i64, out: &mut Vec<(i64, i64)>) {
    if node.is_empty() {
        return;
    }
    match &node.data {
        NodeData::Leaf(alive) => {
            if *alive {
                out.push((y, x));
            }
        }
        NodeData::Branch { nw, ne, sw, se, .. } => {
            let half = size / 2;
            collect_alive(nw, x, y, half, out);
            collect_alive(ne, x + half, y, half, out);
            collect_alive(sw, x, y + half, half, out);
            collect_alive(se, x + half, y + half, half, out);
        }
    }
}

fn fill_grid(node: &Arc<Node>, x: i64, y: i64, size: i64, grid: &mut [Vec<bool>]) {
    if node.is_empty() {
        return;
    }
    match &node.data {
        NodeData::Leaf(alive) => {
            if *alive {
                grid[y as usize][x as usize] = true;
            }
        }
        NodeData::Branch { nw, ne, sw, se, .. } => {
            let half = size / 2;
            fill_grid(nw, x, y, half, grid);
            fill_grid(ne, x + half, y, half, grid);
            fill_grid(sw, x, y + half, half, grid);
            fill_grid(se, x + half, y + half, half, grid);
        }
    }
}
