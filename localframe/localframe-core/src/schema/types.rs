use std::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
};

use crate::error::TypeError;

/// Largest precision a decimal type may carry.
pub const MAX_DECIMAL_PRECISION: u8 = 38;

/// Precision and scale assigned to every inferred decimal value.
///
/// Per-value precision varies from row to row, so inference uses a stable
/// upper bound that keeps schemas of a batch mergeable.
pub const INFERRED_DECIMAL: (u8, u8) = (38, 18);

/// Warehouse-independent data type.
///
/// Composite variants are built bottom-up from already resolved types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Null,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    /// Build through [`DataType::decimal`] to keep `scale <= precision <= 38`.
    Decimal { precision: u8, scale: u8 },
    String,
    Binary,
    Date,
    Time,
    Timestamp,
    Array(Box<DataType>),
    Map {
        key: Box<DataType>,
        value: Box<DataType>,
    },
    Struct(Schema),
    /// Untyped semi-structured value.
    Variant,
    Geography,
}

impl DataType {
    /// Checked decimal constructor enforcing `scale <= precision <= 38`.
    pub fn decimal(precision: u8, scale: u8) -> std::result::Result<Self, TypeError> {
        if precision > MAX_DECIMAL_PRECISION || scale > precision {
            return Err(TypeError::InvalidDecimal {
                precision: precision.into(),
                scale: scale.into(),
            });
        }
        Ok(DataType::Decimal { precision, scale })
    }

    pub fn array(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn kind(&self) -> DataTypeKind {
        match self {
            DataType::Null => DataTypeKind::Null,
            DataType::Boolean => DataTypeKind::Boolean,
            DataType::Byte => DataTypeKind::Byte,
            DataType::Short => DataTypeKind::Short,
            DataType::Integer => DataTypeKind::Integer,
            DataType::Long => DataTypeKind::Long,
            DataType::Float => DataTypeKind::Float,
            DataType::Double => DataTypeKind::Double,
            DataType::Decimal { .. } => DataTypeKind::Decimal,
            DataType::String => DataTypeKind::String,
            DataType::Binary => DataTypeKind::Binary,
            DataType::Date => DataTypeKind::Date,
            DataType::Time => DataTypeKind::Time,
            DataType::Timestamp => DataTypeKind::Timestamp,
            DataType::Array(_) => DataTypeKind::Array,
            DataType::Map { .. } => DataTypeKind::Map,
            DataType::Struct(_) => DataTypeKind::Struct,
            DataType::Variant => DataTypeKind::Variant,
            DataType::Geography => DataTypeKind::Geography,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            DataType::Array(_) | DataType::Map { .. } | DataType::Struct(_)
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Byte
                | DataType::Short
                | DataType::Integer
                | DataType::Long
                | DataType::Float
                | DataType::Double
                | DataType::Decimal { .. }
        )
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DataType::Decimal { precision, scale } => write!(f, "decimal({precision}, {scale})"),
            DataType::Array(element) => write!(f, "array<{element}>"),
            DataType::Map { key, value } => write!(f, "map<{key}, {value}>"),
            DataType::Struct(fields) => {
                f.write_str("struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.data_type)?;
                }
                f.write_str(">")
            }
            other => f.write_str(other.type_name()),
        }
    }
}

/// Parameterless tag for each [`DataType`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeKind {
    Null,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Binary,
    Date,
    Time,
    Timestamp,
    Array,
    Map,
    Struct,
    Variant,
    Geography,
}

impl DataTypeKind {
    /// Every variant, each exactly once.
    pub const ALL: [DataTypeKind; 19] = [
        DataTypeKind::Null,
        DataTypeKind::Boolean,
        DataTypeKind::Byte,
        DataTypeKind::Short,
        DataTypeKind::Integer,
        DataTypeKind::Long,
        DataTypeKind::Float,
        DataTypeKind::Double,
        DataTypeKind::Decimal,
        DataTypeKind::String,
        DataTypeKind::Binary,
        DataTypeKind::Date,
        DataTypeKind::Time,
        DataTypeKind::Timestamp,
        DataTypeKind::Array,
        DataTypeKind::Map,
        DataTypeKind::Struct,
        DataTypeKind::Variant,
        DataTypeKind::Geography,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DataTypeKind::Null => "null",
            DataTypeKind::Boolean => "boolean",
            DataTypeKind::Byte => "byte",
            DataTypeKind::Short => "short",
            DataTypeKind::Integer => "integer",
            DataTypeKind::Long => "long",
            DataTypeKind::Float => "float",
            DataTypeKind::Double => "double",
            DataTypeKind::Decimal => "decimal",
            DataTypeKind::String => "string",
            DataTypeKind::Binary => "binary",
            DataTypeKind::Date => "date",
            DataTypeKind::Time => "time",
            DataTypeKind::Timestamp => "timestamp",
            DataTypeKind::Array => "array",
            DataTypeKind::Map => "map",
            DataTypeKind::Struct => "struct",
            DataTypeKind::Variant => "variant",
            DataTypeKind::Geography => "geography",
        }
    }

    /// The type constructed when the kind is named without parameters.
    ///
    /// Decimal defaults to the warehouse `NUMBER` default of `(38, 0)`;
    /// composite kinds default to string elements.
    pub fn default_type(self) -> DataType {
        match self {
            DataTypeKind::Null => DataType::Null,
            DataTypeKind::Boolean => DataType::Boolean,
            DataTypeKind::Byte => DataType::Byte,
            DataTypeKind::Short => DataType::Short,
            DataTypeKind::Integer => DataType::Integer,
            DataTypeKind::Long => DataType::Long,
            DataTypeKind::Float => DataType::Float,
            DataTypeKind::Double => DataType::Double,
            DataTypeKind::Decimal => DataType::Decimal {
                precision: MAX_DECIMAL_PRECISION,
                scale: 0,
            },
            DataTypeKind::String => DataType::String,
            DataTypeKind::Binary => DataType::Binary,
            DataTypeKind::Date => DataType::Date,
            DataTypeKind::Time => DataType::Time,
            DataTypeKind::Timestamp => DataType::Timestamp,
            DataTypeKind::Array => DataType::array(DataType::String),
            DataTypeKind::Map => DataType::map(DataType::String, DataType::String),
            DataTypeKind::Struct => DataType::Struct(Schema::default()),
            DataTypeKind::Variant => DataType::Variant,
            DataTypeKind::Geography => DataType::Geography,
        }
    }
}

/// Named, typed member of a [`Schema`] or struct type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl StructField {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }
}

/// Ordered sequence of [`StructField`]; order defines row column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Schema(pub Vec<StructField>);

impl Schema {
    pub fn new(fields: Vec<StructField>) -> Self {
        Self(fields)
    }

    pub fn as_slice(&self) -> &[StructField] {
        &self.0
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.0.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|f| f.name.as_str())
    }

    /// Returns the first field name that occurs more than once.
    pub fn duplicate_name(&self) -> Option<&str> {
        self.0.iter().enumerate().find_map(|(i, f)| {
            self.0[..i]
                .iter()
                .any(|prev| prev.name == f.name)
                .then_some(f.name.as_str())
        })
    }
}

impl From<Vec<StructField>> for Schema {
    fn from(value: Vec<StructField>) -> Self {
        Self(value)
    }
}

impl From<Schema> for Vec<StructField> {
    fn from(value: Schema) -> Self {
        value.0
    }
}

impl FromIterator<StructField> for Schema {
    fn from_iter<T: IntoIterator<Item = StructField>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[StructField]> for Schema {
    fn as_ref(&self) -> &[StructField] {
        self.as_slice()
    }
}

impl Deref for Schema {
    type Target = [StructField];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_schema(self.as_slice())?;
        f.write_str(&text)
    }
}
