//! Arrow export for `localframe`.
//!
//! Two entry points:
//! - [`schema_to_arrow`] converts a canonical schema to an Arrow `Schema`.
//! - [`rows_to_record_batch`] converts rows laid out in schema order into a
//!   `RecordBatch`.
//!
//! Dates become `Date32`, times `Time64(Nanosecond)` and timestamps
//! `Timestamp(Microsecond)` without a time zone.
//!
//! # Typical Flow
//! ```rust
//! use localframe_arrow::{rows_to_record_batch, schema_to_arrow};
//! use localframe_core::{DataType, Schema, StructField, Value};
//!
//! let schema = Schema::new(vec![StructField::new("v", DataType::Long, true)]);
//! let arrow_schema = schema_to_arrow(&schema);
//! let batch = rows_to_record_batch(&schema, &[vec![Value::Long(1)], vec![Value::Null]]).unwrap();
//! assert_eq!(batch.schema().as_ref(), &arrow_schema);
//! assert_eq!(batch.num_rows(), 2);
//! ```
pub mod arrow_convert;
pub mod error;
pub mod schema_convert;

pub use arrow;
pub use arrow_convert::rows_to_record_batch;
pub use error::ArrowConvertError;
pub use schema_convert::{schema_to_arrow, to_arrow_type};
