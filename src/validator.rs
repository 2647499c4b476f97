//! Compares two `Life` instances by advancing whichever has the smaller
//! virtual-generation counter until both are synchronized, then comparing
//! signatures — because `Warp` mode advances `2^(L-1)` generations per step,
//! validation against a per-generation oracle must align step *counters*
//! rather than step *indices*.

use std::time::{Duration, Instant};

use crate::config::ValidationConfig;
use crate::life::Life;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub matched: bool,
    pub generation: u64,
    pub signature_a: String,
    pub signature_b: String,
}

/// Safety net against a validator call whose two instances can never land on
/// a common synchronized generation (e.g. incompatible step sizes); not part
/// of the specified algorithm, just a bound on how long this can spin.
const MAX_SYNC_ITERATIONS: u64 = 10_000_000;

pub fn validate(
    mut life_a: Box<dyn Life>,
    mut life_b: Box<dyn Life>,
    budget: Duration,
    min_generations: u64,
) -> ValidationReport {
    let start = Instant::now();

    let sig_a = life_a.signature();
    let sig_b = life_b.signature();
    if sig_a != sig_b {
        return ValidationReport { matched: false, generation: 0, signature_a: sig_a, signature_b: sig_b };
    }

    let mut gen_a = 0u64;
    let mut gen_b = 0u64;

    for _ in 0..MAX_SYNC_ITERATIONS {
        if gen_a <= gen_b {
            gen_a += life_a.generation_step();
            life_a = life_a.next();
        } else {
            gen_b += life_b.generation_step();
            life_b = life_b.next();
        }

        if gen_a == gen_b {
            let sig_a = life_a.signature();
            let sig_b = life_b.signature();
            if sig_a != sig_b {
                log::debug!("validation mismatch at generation {gen_a}");
                return ValidationReport {
                    matched: false,
                    generation: gen_a,
                    signature_a: sig_a,
                    signature_b: sig_b,
                };
            }
            if start.elapsed() >= budget && gen_a >= min_generations {
                return ValidationReport {
                    matched: true,
                    generation: gen_a,
                    signature_a: sig_a,
                    signature_b: sig_b,
                };
            }
        }
    }

    let sig_a = life_a.signature();
    let sig_b = life_b.signature();
    ValidationReport { matched: sig_a == sig_b, generation: gen_a.max(gen_b), signature_a: sig_a, signature_b: sig_b }
}

pub fn validate_with_config(
    life_a: Box<dyn Life>,
    life_b: Box<dyn Life>,
    config: &ValidationConfig,
) -> ValidationReport {
    validate(life_a, life_b, config.budget(), config.min_generations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid_life::GridLife;
    use crate::life_mode::{LifeMode, NodeLife};

    fn blank(side: usize) -> Vec<Vec<bool>> {
        vec![vec![false; side]; side]
    }

    #[test]
    fn torus_matches_grid_oracle_on_a_blinker() {
        let side = 16;
        let mut grid = blank(side);
        grid[7][6] = true;
        grid[7][7] = true;
        grid[7][8] = true;

        let node_life = NodeLife::create(&grid, LifeMode::Torus, None).unwrap();
        let grid_life = GridLife::create(&grid);

        let report = validate(
            Box::new(node_life),
            Box::new(grid_life),
            Duration::from_millis(0),
            8,
        );
        assert!(report.matched, "expected Torus and GridLife to agree: {report:?}");
        assert!(report.generation >= 8);
    }

    #[test]
    fn torus_and_open_diverge_when_the_pattern_wraps() {
        // A glider placed to collide with the torus wrap quickly diverges
        // from Open mode, which has no wraparound at all.
        let side = 8;
        let mut grid = blank(side);
        grid[0][1] = true;
        grid[1][2] = true;
        grid[2][0] = true;
        grid[2][1] = true;
        grid[2][2] = true;

        let torus = NodeLife::create(&grid, LifeMode::Torus, None).unwrap();
        let open = NodeLife::create(&grid, LifeMode::Open, None).unwrap();

        let report = validate(Box::new(torus), Box::new(open), Duration::from_millis(0), 40);
        assert!(!report.matched);
    }
}
