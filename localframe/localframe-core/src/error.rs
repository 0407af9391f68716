//! Error types for the type model, inference and codec layers.

/// Error returned by inference, merge, codec and type-hint operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A value has no mapping to a canonical [`DataType`](crate::DataType).
    #[error("not supported type: {value_type}")]
    UnsupportedValue { value_type: String },

    /// A row does not have a shape schema inference understands.
    #[error("cannot infer schema for type: {shape}")]
    UnsupportedRowShape { shape: String },

    /// Inference of one field of a row failed.
    #[error("unable to infer the type of the field {field}: {source}")]
    SchemaInference {
        field: String,
        #[source]
        source: Box<TypeError>,
    },

    /// Two types disagree and cannot be unified.
    #[error("{}cannot merge type {left} and {right}", path_prefix(.path.as_deref()))]
    TypeMerge {
        path: Option<String>,
        left: String,
        right: String,
    },

    /// A canonical type has no warehouse type-name string.
    #[error("unsupported data type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    /// A warehouse type-name string has no canonical type.
    #[error("'{input}' is not a supported type")]
    UnknownTypeString { input: String },

    /// Decimal parameters outside `0 <= scale <= precision <= 38`.
    #[error("invalid decimal precision/scale ({precision}, {scale})")]
    InvalidDecimal { precision: u64, scale: u64 },

    /// A native type hint could not be mapped.
    #[error("invalid type hint '{hint}': {detail}")]
    InvalidTypeHint { hint: String, detail: String },
}

/// Error returned by typed [`Value`](crate::Value) accessors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: String,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

fn path_prefix(path: Option<&str>) -> String {
    path.map(|p| format!("{p}: ")).unwrap_or_default()
}
