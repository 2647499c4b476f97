//! Size-independent, translation-invariant signature over a set of live
//! coordinates, shared by every `Life` implementation.

/// Translates `coords` so its minimum row and column sit at the origin,
/// formats each as `"r:c"`, sorts the tokens lexicographically *as strings*
/// (not numerically — this is a deliberate, preserved choice so signatures
/// stay byte-identical across implementations), and joins with commas.
/// Empty input maps to the empty string.
pub fn signature_of(coords: &[(i64, i64)]) -> String {
    if coords.is_empty() {
        return String::new();
    }
    let min_row = coords.iter().map(|&(r, _)| r).min().unwrap();
    let min_col = coords.iter().map(|&(_, c)| c).min().unwrap();
    let mut tokens: Vec<String> =
        coords.iter().map(|&(r, c)| format!("{}:{}", r - min_row, c - min_col)).collect();
    tokens.sort();
    tokens.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_maps_to_empty_string() {
        assert_eq!(signature_of(&[]), "");
    }

    #[test]
    fn translation_invariant() {
        let base = [(7, 6), (7, 7), (7, 8)];
        let shifted: Vec<(i64, i64)> = base.iter().map(|&(r, c)| (r + 5, c - 3)).collect();
        assert_eq!(signature_of(&base), signature_of(&shifted));
    }

    #[test]
    fn tokens_sort_lexicographically_not_numerically() {
        // "10:0" sorts before "2:0" as a string, after it as a number; this
        // checks the implementation preserves the string ordering.
        let coords = [(0, 0), (2, 0), (10, 0)];
        let sig = signature_of(&coords);
        assert_eq!(sig, "0:0,10:0,2:0");
    }

    #[test]
    fn blinker_signature_matches_reference() {
        let vertical = [(6, 7), (7, 7), (8, 7)];
        let horizontal = [(7, 6), (7, 7), (7, 8)];
        assert_eq!(signature_of(&horizontal), "0:0,0:1,0:2");
        assert_eq!(signature_of(&vertical), "0:0,1:0,2:0");
    }
}
