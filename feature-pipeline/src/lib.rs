pub mod clean;
pub mod columns;
pub mod compose;
pub mod extract;
pub mod records;
pub mod table;

pub use compose::{compose_candidate_table, compose_job_table};
pub use table::{FeatureTable, TableBuilder};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("duplicate feature column: '{0}'")]
    DuplicateColumn(String),
    #[error("column '{name}' has {actual} values for {expected} rows")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("positional merge over mismatched tables: {left} rows vs {right} rows")]
    RowCountMismatch { left: usize, right: usize },
    #[error("positional merge over mismatched tables: row {index} is '{left}' on one side and '{right}' on the other")]
    RowIdMismatch {
        index: usize,
        left: String,
        right: String,
    },
    #[error("no usable {0} rows left after extraction")]
    NoUsableRows(&'static str),
}
