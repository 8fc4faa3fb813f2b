//! Structural diff of two attribute mappings.

use std::collections::BTreeMap;

use ncd_core::AttrValue;

/// Differences between a baseline and a new attribute mapping.
///
/// Equality is exact; there is no tolerance for float-valued attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataDiff {
    /// Keys present in baseline only, in baseline enumeration order.
    pub missing_in_new: Vec<String>,
    /// Keys present in new only, in new enumeration order.
    pub missing_in_baseline: Vec<String>,
    /// Keys present in both with unequal values: `(key, baseline, new)`,
    /// in intersection enumeration order.
    pub changed: Vec<(String, AttrValue, AttrValue)>,
}

impl MetadataDiff {
    /// True when the two mappings are exactly equal.
    pub fn is_empty(&self) -> bool {
        self.missing_in_new.is_empty()
            && self.missing_in_baseline.is_empty()
            && self.changed.is_empty()
    }

    /// One line per difference, in reporting order: keys missing from
    /// new, keys missing from baseline, then changed values.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for k in &self.missing_in_new {
            lines.push(format!("attribute '{}' is in baseline but not in new", k));
        }
        for k in &self.missing_in_baseline {
            lines.push(format!("attribute '{}' is in new but not in baseline", k));
        }
        for (k, a, b) in &self.changed {
            lines.push(format!("attribute '{}' is {} in baseline but {} in new", k, a, b));
        }
        lines
    }
}

/// Diff two attribute mappings.
pub fn diff_attributes(
    baseline: &BTreeMap<String, AttrValue>,
    new: &BTreeMap<String, AttrValue>,
) -> MetadataDiff {
    let mut diff = MetadataDiff::default();

    for (key, value) in baseline {
        match new.get(key) {
            None => diff.missing_in_new.push(key.clone()),
            Some(other) if other != value => {
                diff.changed.push((key.clone(), value.clone(), other.clone()));
            }
            Some(_) => {}
        }
    }
    for key in new.keys() {
        if !baseline.contains_key(key) {
            diff.missing_in_baseline.push(key.clone());
        }
    }

    diff
}
