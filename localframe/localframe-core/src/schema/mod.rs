//! Canonical type model, schema rendering, and schema merge.

mod format;
mod merge;
mod types;

pub use format::format_schema;
pub use merge::{merge_schemas, merge_types};
pub use types::{
    DataType, DataTypeKind, INFERRED_DECIMAL, MAX_DECIMAL_PRECISION, Schema, StructField,
};
