//! Read-only view over one loaded dataset.

use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::attr::AttrValue;
use crate::dtype::DType;

/// One named variable: declared type, named dimensions, attributes,
/// and the values materialized as an N-dimensional `f64` array.
///
/// Missing/masked positions are NaN. Invariant: `dims.len() == shape.len()`
/// and `shape` describes `values` exactly; the loader enforces both.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub dtype: DType,
    pub dims: Vec<String>,
    pub shape: Vec<usize>,
    pub attributes: BTreeMap<String, AttrValue>,
    pub values: ArrayD<f64>,
}

impl Variable {
    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }
}

/// A fully loaded dataset. Immutable for the lifetime of a comparison
/// run; the comparison core only ever borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    attributes: BTreeMap<String, AttrValue>,
    variables: BTreeMap<String, Variable>,
}

impl Dataset {
    pub fn new(
        name: String,
        attributes: BTreeMap<String, AttrValue>,
        variables: BTreeMap<String, Variable>,
    ) -> Self {
        Self {
            name,
            attributes,
            variables,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dataset-level attributes.
    pub fn attributes(&self) -> &BTreeMap<String, AttrValue> {
        &self.attributes
    }

    /// Variable names in enumeration (sorted) order.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Look up a variable by name.
    ///
    /// # Panics
    /// Panics if `name` is not present. Callers confirm presence first;
    /// the pipeline only ever looks up names from the working set.
    pub fn variable(&self, name: &str) -> &Variable {
        match self.variables.get(name) {
            Some(v) => v,
            None => panic!("variable '{}' not present in dataset '{}'", name, self.name),
        }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    fn scalar_var(v: f64) -> Variable {
        Variable {
            dtype: DType::Float64,
            dims: vec![],
            shape: vec![],
            attributes: BTreeMap::new(),
            values: ArrayD::from_elem(IxDyn(&[]), v),
        }
    }

    #[test]
    fn test_names_are_sorted() {
        let mut vars = BTreeMap::new();
        vars.insert("salt".to_string(), scalar_var(35.0));
        vars.insert("depth".to_string(), scalar_var(10.0));
        let ds = Dataset::new("test".into(), BTreeMap::new(), vars);
        let names: Vec<&str> = ds.variable_names().collect();
        assert_eq!(names, vec!["depth", "salt"]);
    }

    #[test]
    #[should_panic(expected = "not present")]
    fn test_missing_lookup_panics() {
        let ds = Dataset::new("test".into(), BTreeMap::new(), BTreeMap::new());
        ds.variable("temp");
    }
}
