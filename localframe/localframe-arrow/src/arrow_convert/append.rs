use arrow::array::{
    ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, Decimal128Builder,
    Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
    ListBuilder, MapBuilder, NullBuilder, StringBuilder, StructBuilder, Time64NanosecondBuilder,
    TimestampMicrosecondBuilder,
};
use localframe_core::{DataType, StructField, Value, ValueTypeError};

use super::scalar::{ScalarValue, scalar_value_for_datatype};
use crate::error::ArrowConvertError;

type DynMapBuilder = MapBuilder<Box<dyn ArrayBuilder>, Box<dyn ArrayBuilder>>;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .expect(concat!("expected builder type: ", stringify!($T)))
    };
}

fn append_scalar_dyn(builder: &mut Box<dyn ArrayBuilder>, scalar: ScalarValue<'_>) {
    match scalar {
        ScalarValue::Null => cast_builder!(builder, NullBuilder).append_null(),
        ScalarValue::Boolean(v) => cast_builder!(builder, BooleanBuilder).append_option(v),
        ScalarValue::Int8(v) => cast_builder!(builder, Int8Builder).append_option(v),
        ScalarValue::Int16(v) => cast_builder!(builder, Int16Builder).append_option(v),
        ScalarValue::Int32(v) => cast_builder!(builder, Int32Builder).append_option(v),
        ScalarValue::Int64(v) => cast_builder!(builder, Int64Builder).append_option(v),
        ScalarValue::Float32(v) => cast_builder!(builder, Float32Builder).append_option(v),
        ScalarValue::Float64(v) => cast_builder!(builder, Float64Builder).append_option(v),
        ScalarValue::Decimal128(v) => cast_builder!(builder, Decimal128Builder).append_option(v),
        ScalarValue::Utf8(v) => cast_builder!(builder, StringBuilder).append_option(v),
        ScalarValue::Binary(v) => cast_builder!(builder, BinaryBuilder).append_option(v),
        ScalarValue::Date32(v) => cast_builder!(builder, Date32Builder).append_option(v),
        ScalarValue::Time64Nanosecond(v) => {
            cast_builder!(builder, Time64NanosecondBuilder).append_option(v)
        }
        ScalarValue::TimestampMicrosecond(v) => {
            cast_builder!(builder, TimestampMicrosecondBuilder).append_option(v)
        }
    }
}

fn append_list_elements(
    child_builder: &mut Box<dyn ArrayBuilder>,
    element: &DataType,
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Buffer(buffer) => &buffer.items,
        Value::Null => return Ok(false),
        _ => return Err(value.type_mismatch("Array").into()),
    };
    for item in items {
        append_value_to_builder(child_builder, element, item)?;
    }
    Ok(true)
}

fn append_map_entries(
    map_builder: &mut DynMapBuilder,
    key: &DataType,
    map_value: &DataType,
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    match value {
        Value::Map(entries) => {
            for (k, v) in entries {
                if k.is_null() {
                    return Err(ValueTypeError::new("non-null map key", "Null").into());
                }
                append_value_to_builder(map_builder.keys(), key, k)?;
                append_value_to_builder(map_builder.values(), map_value, v)?;
            }
            Ok(true)
        }
        Value::Null => Ok(false),
        _ => Err(value.type_mismatch("Map").into()),
    }
}

/// Struct members are matched to fields by name; absent members are null.
fn append_struct_members(
    builder: &mut StructBuilder,
    fields: &[StructField],
    value: &Value,
) -> Result<bool, ArrowConvertError> {
    let members = match value {
        Value::Struct(members) => Some(members),
        Value::Null => None,
        _ => return Err(value.type_mismatch("Struct").into()),
    };
    for (i, field) in fields.iter().enumerate() {
        let member = members
            .and_then(|m| m.iter().find(|(name, _)| *name == field.name))
            .map_or(&Value::Null, |(_, v)| v);
        append_value_to_builder(&mut builder.field_builders_mut()[i], &field.data_type, member)?;
    }
    Ok(members.is_some())
}

pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &Value,
) -> Result<(), ArrowConvertError> {
    if let Some(scalar) = scalar_value_for_datatype(dt, value)? {
        append_scalar_dyn(builder, scalar);
        return Ok(());
    }

    match dt {
        DataType::Array(element) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            let valid = append_list_elements(b.values(), element, value)?;
            b.append(valid);
        }
        DataType::Map { key, value: map_value } => {
            let b = cast_builder!(builder, DynMapBuilder);
            let valid = append_map_entries(b, key, map_value, value)?;
            b.append(valid)?;
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            let valid = append_struct_members(b, fields, value)?;
            b.append(valid);
        }
        _ => unreachable!("scalar types are handled by scalar_value_for_datatype"),
    }
    Ok(())
}
