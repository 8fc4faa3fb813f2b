//! ncd-compare: Comparison pipeline for structured scientific datasets.
//!
//! Compares a baseline and a new version of the same dataset across four
//! ordered stages (variable presence, types and dimensions, metadata,
//! values), producing one `TestResult` per executed stage and an integer
//! verdict equal to the number of failed stages.

pub mod metadata;
pub mod numeric;
pub mod pipeline;
pub mod report;
pub mod sink;

pub use metadata::{MetadataDiff, diff_attributes};
pub use numeric::{NumericDiff, arrays_identical, diff_values};
pub use pipeline::{RunParams, run};
pub use report::{Report, Stage, TestResult};
pub use sink::{Level, MemorySink, Sink};
