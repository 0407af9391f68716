//! Inference of canonical types from native values and of schemas from rows.

use crate::{
    error::TypeError,
    schema::{DataType, INFERRED_DECIMAL, Schema, StructField},
    value::{TypedBuffer, Value},
};

/// Infer the canonical type of a single value.
pub fn infer_type(value: &Value) -> Result<DataType, TypeError> {
    Ok(match value {
        Value::Null => DataType::Null,
        Value::Boolean(_) => DataType::Boolean,
        Value::Byte(_) => DataType::Byte,
        Value::Short(_) => DataType::Short,
        Value::Integer(_) => DataType::Integer,
        Value::Long(_) => DataType::Long,
        Value::Float(_) => DataType::Float,
        Value::Double(_) => DataType::Double,
        Value::Decimal(_) => DataType::Decimal {
            precision: INFERRED_DECIMAL.0,
            scale: INFERRED_DECIMAL.1,
        },
        Value::String(_) => DataType::String,
        Value::Binary(_) => DataType::Binary,
        Value::Date(_) => DataType::Date,
        Value::Time(_) => DataType::Time,
        Value::Timestamp(_) => DataType::Timestamp,
        Value::Map(entries) => match entries.iter().find(|(k, v)| !k.is_null() && !v.is_null()) {
            Some((k, v)) => DataType::map(infer_type(k)?, infer_type(v)?),
            None => DataType::map(DataType::Null, DataType::Null),
        },
        Value::Array(items) => match items.iter().find(|v| !v.is_null()) {
            Some(first) => DataType::array(infer_type(first)?),
            None => DataType::array(DataType::Null),
        },
        Value::Buffer(buffer) => DataType::array(buffer_element_type(buffer)?),
        Value::Struct(members) => DataType::Struct(
            members
                .iter()
                .map(|(name, v)| Ok(StructField::new(name.clone(), infer_type(v)?, true)))
                .collect::<Result<Schema, TypeError>>()?,
        ),
        Value::Custom(custom) => {
            custom
                .get()
                .declared_type()
                .ok_or_else(|| TypeError::UnsupportedValue {
                    value_type: custom.get().type_name().to_string(),
                })?
        }
    })
}

/// Bit width and signedness of each integer buffer code.
const INTEGER_BUFFER_CODES: [(char, u32, bool); 10] = [
    ('b', 8, true),
    ('h', 16, true),
    ('i', 32, true),
    ('l', 64, true),
    ('q', 64, true),
    ('B', 8, false),
    ('H', 16, false),
    ('I', 32, false),
    ('L', 64, false),
    ('Q', 64, false),
];

fn buffer_element_type(buffer: &TypedBuffer) -> Result<DataType, TypeError> {
    let unsupported = || TypeError::UnsupportedValue {
        value_type: format!("buffer({})", buffer.code),
    };

    match buffer.code {
        'f' => return Ok(DataType::Float),
        'd' => return Ok(DataType::Double),
        'u' => return Ok(DataType::String),
        _ => {}
    }

    let (_, bits, signed) = INTEGER_BUFFER_CODES
        .iter()
        .find(|(code, _, _)| *code == buffer.code)
        .ok_or_else(unsupported)?;
    // Canonical integers are signed: unsigned values need one more bit.
    let bits = if *signed { *bits } else { bits + 1 };
    int_size_to_type(bits).ok_or_else(unsupported)
}

fn int_size_to_type(bits: u32) -> Option<DataType> {
    match bits {
        0..=8 => Some(DataType::Byte),
        9..=16 => Some(DataType::Short),
        17..=32 => Some(DataType::Integer),
        33..=64 => Some(DataType::Long),
        _ => None,
    }
}

/// Infer the schema of one row.
///
/// `names` supplies field names for positional rows; missing names default to
/// `_<i>` (1-based). Named rows (maps with string keys and structs) take their
/// names from the row itself.
pub fn infer_schema(row: &Value, names: Option<&[String]>) -> Result<Schema, TypeError> {
    let first_name = || {
        names
            .and_then(|n| n.first())
            .cloned()
            .unwrap_or_else(|| "_1".to_string())
    };

    let items: Vec<(String, &Value)> = match row {
        Value::Null => vec![(first_name(), &Value::Null)],
        Value::Array(items) if items.is_empty() => vec![(first_name(), &Value::Null)],
        Value::Map(entries) if entries.is_empty() => vec![(first_name(), &Value::Null)],
        Value::Struct(members) if members.is_empty() => vec![(first_name(), &Value::Null)],
        Value::Map(entries) => entries
            .iter()
            .map(|(k, v)| match k {
                Value::String(name) => Ok((name.to_string(), v)),
                other => Err(TypeError::UnsupportedRowShape {
                    shape: format!("map with {} key", other.variant_name()),
                }),
            })
            .collect::<Result<_, _>>()?,
        Value::Struct(members) => members.iter().map(|(name, v)| (name.clone(), v)).collect(),
        Value::Array(items) => {
            let names = positional_names(names, items.len());
            names.into_iter().zip(items.iter()).collect()
        }
        v if v.is_scalar() => vec![(first_name(), v)],
        other => {
            return Err(TypeError::UnsupportedRowShape {
                shape: other.variant_name().to_string(),
            });
        }
    };

    items
        .into_iter()
        .map(|(name, v)| match infer_type(v) {
            Ok(data_type) => Ok(StructField::new(name, data_type, true)),
            Err(e) => Err(TypeError::SchemaInference {
                field: name,
                source: Box::new(e),
            }),
        })
        .collect()
}

fn positional_names(names: Option<&[String]>, len: usize) -> Vec<String> {
    let mut out: Vec<String> = names.map(<[String]>::to_vec).unwrap_or_default();
    out.extend((out.len() + 1..=len).map(|i| format!("_{i}")));
    out
}
