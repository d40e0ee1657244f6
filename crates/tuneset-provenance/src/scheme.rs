//! Descending-rank weight scheme
//!
//! Position `i` of an `n`-long list gets `(n - i) / (n (n + 1) / 2)`.
//! Earlier-listed fields are the more salient ones.

use indexmap::IndexMap;

/// Normalized ramp weights for `n` positions; empty for `n == 0`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weight_scheme(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let total = (n * (n + 1) / 2) as f64;
    (0..n).map(|i| (n - i) as f64 / total).collect()
}

/// Code → ramp weight, in field-list order
///
/// A code listed more than once accumulates the weight of every position
/// it occupies, so the map always sums to 1 for a non-empty list. Later
/// positions never overwrite earlier ones.
#[must_use]
pub fn base_weights<S: AsRef<str>>(fields: &[S]) -> IndexMap<String, f64> {
    let ramp = weight_scheme(fields.len());
    let mut out: IndexMap<String, f64> = IndexMap::with_capacity(fields.len());
    for (code, weight) in fields.iter().zip(ramp) {
        *out.entry(code.as_ref().to_string()).or_insert(0.0) += weight;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_weights() {
        assert!(weight_scheme(0).is_empty());
        assert!(base_weights::<&str>(&[]).is_empty());
    }

    #[test]
    fn single_field_takes_everything() {
        assert_eq!(weight_scheme(1), vec![1.0]);
    }

    #[test]
    fn three_fields_ramp() {
        let w = weight_scheme(3);
        assert_eq!(w, vec![3.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0]);
    }

    #[test]
    fn base_weights_keep_list_order() {
        let w = base_weights(&["z", "a", "m"]);
        let keys: Vec<_> = w.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(w["z"], 0.5);
    }

    #[test]
    fn duplicate_code_accumulates() {
        let w = base_weights(&["a", "b", "a"]);
        assert_eq!(w.len(), 2);
        assert!((w["a"] - (3.0 + 1.0) / 6.0).abs() < 1e-12);
        assert!((w.values().sum::<f64>() - 1.0).abs() < 1e-12);
    }
}
