use arrow::array::{
    ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, Decimal128Builder,
    Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
    ListBuilder, MapBuilder, MapFieldNames, NullBuilder, StringBuilder, StructBuilder,
    Time64NanosecondBuilder, TimestampMicrosecondBuilder,
};
use arrow::datatypes::{DataType as ArrowType, Field};
use localframe_core::DataType;

use crate::schema_convert::{struct_fields, to_arrow_type};

pub(super) fn make_builder(dt: &DataType, capacity: usize) -> Box<dyn ArrayBuilder> {
    match dt {
        DataType::Null => Box::new(NullBuilder::new()),
        DataType::Boolean => Box::new(BooleanBuilder::with_capacity(capacity)),
        DataType::Byte => Box::new(Int8Builder::with_capacity(capacity)),
        DataType::Short => Box::new(Int16Builder::with_capacity(capacity)),
        DataType::Integer => Box::new(Int32Builder::with_capacity(capacity)),
        DataType::Long => Box::new(Int64Builder::with_capacity(capacity)),
        DataType::Float => Box::new(Float32Builder::with_capacity(capacity)),
        DataType::Double => Box::new(Float64Builder::with_capacity(capacity)),
        DataType::Decimal { .. } => Box::new(
            Decimal128Builder::with_capacity(capacity).with_data_type(to_arrow_type(dt)),
        ),
        DataType::String | DataType::Variant | DataType::Geography => {
            Box::new(StringBuilder::with_capacity(capacity, 64))
        }
        DataType::Binary => Box::new(BinaryBuilder::with_capacity(capacity, 64)),
        DataType::Date => Box::new(Date32Builder::with_capacity(capacity)),
        DataType::Time => Box::new(Time64NanosecondBuilder::with_capacity(capacity)),
        DataType::Timestamp => Box::new(TimestampMicrosecondBuilder::with_capacity(capacity)),
        DataType::Array(element) => {
            let child = make_builder(element, capacity);
            let field = Field::new("item", to_arrow_type(element), true);
            Box::new(ListBuilder::new(child).with_field(field))
        }
        DataType::Map { key, value } => {
            let key_field = Field::new("key", to_arrow_type(key), false);
            let value_field = Field::new("value", to_arrow_type(value), true);
            Box::new(
                MapBuilder::new(
                    Some(MapFieldNames {
                        entry: "entries".to_string(),
                        key: "key".to_string(),
                        value: "value".to_string(),
                    }),
                    make_builder(key, capacity),
                    make_builder(value, capacity),
                )
                .with_keys_field(key_field)
                .with_values_field(value_field),
            )
        }
        DataType::Struct(fields) => {
            let child_builders: Vec<Box<dyn ArrayBuilder>> = fields
                .iter()
                .map(|f| make_builder(&f.data_type, capacity))
                .collect();
            Box::new(StructBuilder::new(struct_fields(fields), child_builders))
        }
    }
}

/// Builder capacity hint: nested columns usually hold several children per row.
pub(super) fn capacity_for(dt: &DataType, rows: usize) -> usize {
    match to_arrow_type(dt) {
        ArrowType::List(_) | ArrowType::Map(_, _) => rows.saturating_mul(4),
        _ => rows,
    }
}
