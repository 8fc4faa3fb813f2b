//! JSON dataset documents.
//!
//! A dataset file is a single JSON object `{name?, attributes?, variables}`
//! where each variable carries `dtype`, `dims`, `shape`, `attributes`, and
//! a flat row-major `values` array (`null` = missing, stored as NaN).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::Deserialize;
use thiserror::Error;

use crate::attr::AttrValue;
use crate::dataset::{Dataset, Variable};
use crate::dtype::DType;

/// Load failures. All are fatal: a dataset that cannot be loaded is
/// reported to the caller before any comparison stage runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {path}")]
    NotFound { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("variable '{variable}': {count} values do not fill shape {shape:?}")]
    ShapeMismatch {
        variable: String,
        shape: Vec<usize>,
        count: usize,
    },

    #[error("variable '{variable}': {ndims} dimension names for {nsizes} sizes")]
    DimsMismatch {
        variable: String,
        ndims: usize,
        nsizes: usize,
    },
}

#[derive(Deserialize)]
struct DatasetDoc {
    name: Option<String>,
    #[serde(default)]
    attributes: BTreeMap<String, AttrValue>,
    variables: BTreeMap<String, VariableDoc>,
}

#[derive(Deserialize)]
struct VariableDoc {
    dtype: DType,
    #[serde(default)]
    dims: Vec<String>,
    #[serde(default)]
    shape: Vec<usize>,
    #[serde(default)]
    attributes: BTreeMap<String, AttrValue>,
    values: Vec<Option<f64>>,
}

/// Read and validate a dataset file.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.display().to_string(),
        });
    }
    let file = File::open(path)?;
    let fallback = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_dataset(BufReader::new(file), fallback)
}

/// Parse a dataset document from any reader. `fallback_name` is used when
/// the document carries no `name` field.
pub fn parse_dataset<R: std::io::Read>(
    reader: R,
    fallback_name: String,
) -> Result<Dataset, LoadError> {
    let doc: DatasetDoc = serde_json::from_reader(reader)?;

    let mut variables = BTreeMap::new();
    for (name, var) in doc.variables {
        if var.dims.len() != var.shape.len() {
            return Err(LoadError::DimsMismatch {
                variable: name,
                ndims: var.dims.len(),
                nsizes: var.shape.len(),
            });
        }
        let expected: usize = var.shape.iter().product();
        if var.values.len() != expected {
            return Err(LoadError::ShapeMismatch {
                variable: name,
                shape: var.shape,
                count: var.values.len(),
            });
        }
        let data: Vec<f64> = var
            .values
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        let count = data.len();
        let values =
            ArrayD::from_shape_vec(IxDyn(&var.shape), data).map_err(|_| {
                LoadError::ShapeMismatch {
                    variable: name.clone(),
                    shape: var.shape.clone(),
                    count,
                }
            })?;
        variables.insert(
            name,
            Variable {
                dtype: var.dtype,
                dims: var.dims,
                shape: var.shape,
                attributes: var.attributes,
                values,
            },
        );
    }

    Ok(Dataset::new(
        doc.name.unwrap_or(fallback_name),
        doc.attributes,
        variables,
    ))
}
