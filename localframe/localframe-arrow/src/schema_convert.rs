use std::sync::Arc;

use arrow::datatypes::{DataType as ArrowType, Field, Fields, Schema as ArrowSchema, TimeUnit};
use localframe_core::{DataType, Schema, StructField};

/// Converts a canonical [`Schema`] into an Arrow schema.
///
/// `Variant` and `Geography` columns are carried as UTF-8 text.
pub fn schema_to_arrow(schema: &Schema) -> ArrowSchema {
    ArrowSchema::new(struct_fields(schema))
}

pub(crate) fn struct_fields(fields: &[StructField]) -> Fields {
    fields
        .iter()
        .map(|f| Field::new(&f.name, to_arrow_type(&f.data_type), f.nullable))
        .collect()
}

/// Arrow type for a canonical type.
pub fn to_arrow_type(data_type: &DataType) -> ArrowType {
    match data_type {
        DataType::Null => ArrowType::Null,
        DataType::Boolean => ArrowType::Boolean,
        DataType::Byte => ArrowType::Int8,
        DataType::Short => ArrowType::Int16,
        DataType::Integer => ArrowType::Int32,
        DataType::Long => ArrowType::Int64,
        DataType::Float => ArrowType::Float32,
        DataType::Double => ArrowType::Float64,
        DataType::Decimal { precision, scale } => ArrowType::Decimal128(*precision, *scale as i8),
        DataType::String | DataType::Variant | DataType::Geography => ArrowType::Utf8,
        DataType::Binary => ArrowType::Binary,
        DataType::Date => ArrowType::Date32,
        DataType::Time => ArrowType::Time64(TimeUnit::Nanosecond),
        DataType::Timestamp => ArrowType::Timestamp(TimeUnit::Microsecond, None),
        DataType::Array(element) => {
            ArrowType::List(Arc::new(Field::new("item", to_arrow_type(element), true)))
        }
        DataType::Map { key, value } => {
            let key_field = Field::new("key", to_arrow_type(key), false);
            let value_field = Field::new("value", to_arrow_type(value), true);
            let entry_struct = ArrowType::Struct(vec![key_field, value_field].into());
            ArrowType::Map(Arc::new(Field::new("entries", entry_struct, false)), false)
        }
        DataType::Struct(fields) => ArrowType::Struct(struct_fields(fields)),
    }
}
