//! Hashable projection of [`Value`] used as a partition key.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use localframe_core::Value;
use rust_decimal::Decimal;

/// Group-key component with `Eq + Hash`.
///
/// Integers of every width compare equal when numerically equal. Floats are
/// compared by bit pattern after folding `-0.0` into `0.0` and every NaN into
/// one canonical NaN. Custom values group by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Decimal(Decimal),
    Str(Arc<str>),
    Bytes(Arc<[u8]>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    List(Vec<KeyValue>),
    Pairs(Vec<(KeyValue, KeyValue)>),
    Named(Vec<(String, KeyValue)>),
    Buffer(char, Vec<KeyValue>),
    Custom(usize),
}

impl From<&Value> for KeyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => KeyValue::Null,
            Value::Boolean(v) => KeyValue::Bool(*v),
            Value::Byte(v) => KeyValue::Int((*v).into()),
            Value::Short(v) => KeyValue::Int((*v).into()),
            Value::Integer(v) => KeyValue::Int((*v).into()),
            Value::Long(v) => KeyValue::Int(*v),
            Value::Float(v) => KeyValue::Float(float_bits((*v).into())),
            Value::Double(v) => KeyValue::Float(float_bits(*v)),
            Value::Decimal(v) => KeyValue::Decimal(v.normalize()),
            Value::String(v) => KeyValue::Str(Arc::clone(v)),
            Value::Binary(v) => KeyValue::Bytes(Arc::clone(v)),
            Value::Date(v) => KeyValue::Date(*v),
            Value::Time(v) => KeyValue::Time(*v),
            Value::Timestamp(v) => KeyValue::Timestamp(*v),
            Value::Array(items) => KeyValue::List(items.iter().map(KeyValue::from).collect()),
            Value::Map(entries) => KeyValue::Pairs(
                entries
                    .iter()
                    .map(|(k, v)| (KeyValue::from(k), KeyValue::from(v)))
                    .collect(),
            ),
            Value::Struct(members) => KeyValue::Named(
                members
                    .iter()
                    .map(|(name, v)| (name.clone(), KeyValue::from(v)))
                    .collect(),
            ),
            Value::Buffer(buffer) => {
                KeyValue::Buffer(buffer.code, buffer.items.iter().map(KeyValue::from).collect())
            }
            Value::Custom(c) => KeyValue::Custom(Arc::as_ptr(&c.0).cast::<()>() as usize),
        }
    }
}

fn float_bits(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}
