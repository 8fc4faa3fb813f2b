//! NaN-aware numeric comparison between two same-shaped arrays.
//!
//! Missing positions are NaN. The mask signal (do the NaN positions
//! match?) and the value signal (do the jointly non-missing values
//! match?) are independent; the values stage decides pass/fail from the
//! value signal alone.

use ndarray::ArrayD;

/// Outcome of comparing two value arrays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericDiff {
    /// The NaN/missing positions differ between the two arrays.
    pub mask_mismatch: bool,
    /// Some pair of jointly non-missing values differs.
    pub values_differ: bool,
    /// Maximum `|baseline - new|` over jointly non-missing positions.
    /// Defined only when `values_differ`.
    pub max_abs_diff: Option<f64>,
    /// `max_abs_diff / max(|baseline|)` over jointly non-missing
    /// positions. `None` when every non-missing baseline value is zero.
    pub max_rel_diff: Option<f64>,
}

impl NumericDiff {
    /// No mask mismatch and no value difference.
    pub fn is_clean(&self) -> bool {
        !self.mask_mismatch && !self.values_differ
    }
}

/// Cheap exact-equality test, with NaN positions equal to each other.
///
/// Shapes are a caller-guaranteed precondition: variables with differing
/// shapes never reach the values stage.
pub fn arrays_identical(baseline: &ArrayD<f64>, new: &ArrayD<f64>) -> bool {
    baseline.len() == new.len()
        && baseline
            .iter()
            .zip(new.iter())
            .all(|(&a, &b)| (a.is_nan() && b.is_nan()) || a == b)
}

/// Full masked comparison. Normalization for the relative difference is
/// global (the maximum unmasked baseline magnitude), not element-wise.
pub fn diff_values(baseline: &ArrayD<f64>, new: &ArrayD<f64>) -> NumericDiff {
    debug_assert_eq!(baseline.shape(), new.shape());

    let mut mask_mismatch = false;
    let mut values_differ = false;
    let mut max_abs = 0.0_f64;
    let mut max_base_mag = 0.0_f64;

    for (&a, &b) in baseline.iter().zip(new.iter()) {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => {}
            (false, false) => {
                max_base_mag = max_base_mag.max(a.abs());
                if a != b {
                    values_differ = true;
                    max_abs = max_abs.max((a - b).abs());
                }
            }
            _ => mask_mismatch = true,
        }
    }

    let max_abs_diff = values_differ.then_some(max_abs);
    let max_rel_diff =
        (values_differ && max_base_mag > 0.0).then(|| max_abs / max_base_mag);

    NumericDiff {
        mask_mismatch,
        values_differ,
        max_abs_diff,
        max_rel_diff,
    }
}
