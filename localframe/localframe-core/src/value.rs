//! Native value model accepted by type and schema inference.

use std::{
    collections::BTreeMap,
    fmt::{self, Debug, Display},
    sync::Arc,
};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::{error::ValueTypeError, schema::DataType};

/// In-memory value as supplied by client code.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    String(Arc<str>),
    Binary(Arc<[u8]>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Key/value container; entries keep insertion order.
    Map(Vec<(Value, Value)>),
    /// Record with named members, in declaration order.
    Struct(Vec<(String, Value)>),
    /// Fixed-width numeric buffer.
    Buffer(TypedBuffer),
    /// Value of a client-defined type.
    Custom(CustomRef),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn binary(bytes: impl AsRef<[u8]>) -> Self {
        Self::Binary(Arc::from(bytes.as_ref()))
    }

    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Self::Custom(CustomRef(Arc::new(value)))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value is a single literal rather than a container.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Array(_) | Value::Map(_) | Value::Struct(_) | Value::Buffer(_) | Value::Custom(_)
        )
    }

    /// Whether the value is an integer, float or decimal.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Integer(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
                | Value::Decimal(_)
        )
    }

    pub fn try_bool(&self) -> Result<Option<bool>, ValueTypeError> {
        match self {
            Value::Boolean(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Boolean")),
        }
    }

    /// Integer access, widening any signed integer variant to `i64`.
    pub fn try_i64(&self) -> Result<Option<i64>, ValueTypeError> {
        match self {
            Value::Byte(v) => Ok(Some((*v).into())),
            Value::Short(v) => Ok(Some((*v).into())),
            Value::Integer(v) => Ok(Some((*v).into())),
            Value::Long(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Long")),
        }
    }

    /// Floating-point access, converting any numeric variant to `f64`.
    pub fn try_f64(&self) -> Result<Option<f64>, ValueTypeError> {
        match self {
            Value::Float(v) => Ok(Some((*v).into())),
            Value::Double(v) => Ok(Some(*v)),
            Value::Decimal(v) => {
                use rust_decimal::prelude::ToPrimitive;
                Ok(v.to_f64())
            }
            Value::Null => Ok(None),
            other => match other.try_i64() {
                Ok(v) => Ok(v.map(|v| v as f64)),
                Err(_) => Err(self.type_mismatch("Double")),
            },
        }
    }

    /// Exact numeric access for integers and decimals.
    pub fn try_decimal(&self) -> Result<Option<Decimal>, ValueTypeError> {
        match self {
            Value::Decimal(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            other => match other.try_i64() {
                Ok(v) => Ok(v.map(Decimal::from)),
                Err(_) => Err(self.type_mismatch("Decimal")),
            },
        }
    }

    pub fn try_str(&self) -> Result<Option<&str>, ValueTypeError> {
        match self {
            Value::String(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<Option<&[u8]>, ValueTypeError> {
        match self {
            Value::Binary(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Binary")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    pub fn variant_name(&self) -> &str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Integer(_) => "Integer",
            Value::Long(_) => "Long",
            Value::Float(_) => "Float",
            Value::Double(_) => "Double",
            Value::Decimal(_) => "Decimal",
            Value::String(_) => "String",
            Value::Binary(_) => "Binary",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::Timestamp(_) => "Timestamp",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::Struct(_) => "Struct",
            Value::Buffer(_) => "Buffer",
            Value::Custom(c) => c.0.type_name(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Binary(v) => {
                for byte in v.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Value::Date(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Struct(members) => {
                f.write_str("{")?;
                for (i, (name, v)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Buffer(buffer) => write!(f, "buffer('{}', {})", buffer.code, buffer.items.len()),
            Value::Custom(c) => write!(f, "<{}>", c.0.type_name()),
        }
    }
}

/// Fixed-width numeric buffer, tagged with a one-character element code.
///
/// Signed codes are `b`, `h`, `i`, `l`, `q`; their unsigned counterparts are
/// upper case. `f` and `d` are single and double precision floats, `u` is a
/// character buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedBuffer {
    pub code: char,
    pub items: Vec<Value>,
}

impl TypedBuffer {
    pub fn new(code: char, items: Vec<Value>) -> Self {
        Self { code, items }
    }
}

/// Client-defined value that may declare its own canonical type.
pub trait CustomValue: Debug + Send + Sync {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str;

    /// Canonical type this value maps to, if it declares one.
    fn declared_type(&self) -> Option<DataType> {
        None
    }
}

/// Shared handle to a [`CustomValue`]; equality is identity.
#[derive(Clone)]
pub struct CustomRef(pub Arc<dyn CustomValue>);

impl CustomRef {
    pub fn get(&self) -> &dyn CustomValue {
        self.0.as_ref()
    }
}

impl Debug for CustomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl PartialEq for CustomRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(Arc::from(v))
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::binary(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
