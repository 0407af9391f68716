//! Conversion from row-oriented values to Arrow `RecordBatch`.

mod append;
mod builder;
mod scalar;

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use localframe_core::{DataType, Schema, Value};

use crate::error::ArrowConvertError;

/// Convert rows laid out in schema order to a RecordBatch.
///
/// Fails on an empty row set, on rows whose width differs from the schema and
/// on values that do not fit their column type.
pub fn rows_to_record_batch(
    schema: &Schema,
    rows: &[Vec<Value>],
) -> Result<RecordBatch, ArrowConvertError> {
    if rows.is_empty() {
        return Err(ArrowConvertError::EmptyRows);
    }
    if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != schema.len()) {
        return Err(ArrowConvertError::RowWidth {
            row,
            expected: schema.len(),
            actual: values.len(),
        });
    }

    let arrow_schema = Arc::new(crate::schema_convert::schema_to_arrow(schema));
    let arrays = schema
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let values: Vec<&Value> = rows.iter().map(|r| &r[i]).collect();
            build_array_from_values(&field.data_type, &values)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecordBatch::try_new(arrow_schema, arrays)?)
}

fn build_array_from_values(
    dt: &DataType,
    values: &[&Value],
) -> Result<ArrayRef, ArrowConvertError> {
    let mut builder = builder::make_builder(dt, builder::capacity_for(dt, values.len()));
    for value in values {
        append::append_value_to_builder(&mut builder, dt, value)?;
    }
    Ok(builder.finish())
}
