//! The `Life` capability set: the polymorphism seam shared by the
//! quadtree-backed `NodeLife` and the flat-array `GridLife` oracle, so the
//! validator and any external benchmark driver can consume either uniformly.

/// A Game of Life instance advanced one logical step at a time.
///
/// `next()` is a pure function of `self`: invoking it twice against the same
/// node and a cache that retains prior results yields identity-equal
/// outputs for `NodeLife`, and value-equal outputs for `GridLife`.
pub trait Life {
    fn name(&self) -> &str;

    /// Side length of the square region this instance represents.
    fn size(&self) -> u64;

    /// Number of generations one call to `next()` advances by.
    fn generation_step(&self) -> u64;

    fn next(&self) -> Box<dyn Life>;

    fn extract_grid(&self) -> Vec<Vec<bool>>;

    /// Live cells as `(row, col)` pairs, in row/column order.
    fn alive_coords(&self) -> Vec<(i64, i64)>;

    /// Translation-invariant canonical signature (`signature.rs`).
    fn signature(&self) -> String;

    fn alive_count(&self) -> u64;

    /// Optional diagnostic string (bounding box, cache size, generation
    /// counter, ...); has no bearing on correctness.
    fn extra_info(&self) -> Option<String> {
        None
    }
}
