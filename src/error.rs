use thiserror::Error;

/// Recoverable, caller-facing errors. Level mismatches, next-generation on a
/// node with level < 2, and warp-step on a non-warp node are programmer
/// errors and asserted instead, since those are bugs to abort on, not input
/// to report back to a caller.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("grid must be square, got a row of length {row_len} in a grid of {rows} rows")]
    NonSquareGrid { rows: usize, row_len: usize },
}
