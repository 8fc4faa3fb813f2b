//! ncd-core: Dataset data model for ncdiff
//!
//! This crate contains the read-only dataset view the comparison core
//! operates on, plus the JSON dataset loader. It holds no comparison
//! logic; see `ncd-compare` for the pipeline.

pub mod attr;
pub mod dataset;
pub mod dtype;
pub mod load;

pub use attr::AttrValue;
pub use dataset::{Dataset, Variable};
pub use dtype::DType;
pub use load::{LoadError, load_dataset};
