use arrow::error::ArrowError;
use localframe_core::ValueTypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("cannot create RecordBatch from empty rows")]
    EmptyRows,
    /// A row is wider or narrower than the schema.
    #[error("row {row} has {actual} values, schema has {expected} fields")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A value does not fit the Arrow type of its column.
    #[error("value out of range for {data_type}: {value}")]
    OutOfRange { data_type: String, value: String },
    #[error("value type mismatch: {0}")]
    ValueType(#[from] ValueTypeError),
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
