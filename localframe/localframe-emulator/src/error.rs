//! Error types for the emulation layer.

use localframe_core::{TypeError, ValueTypeError};

/// Errors produced by the function registry, aggregate implementations and
/// the group-by engine.
#[derive(Debug, thiserror::Error)]
pub enum EmulationError {
    /// The aggregate has no real implementation registered.
    #[error("aggregate function '{name}' is not implemented; register an implementation first")]
    AggregateNotImplemented { name: String },

    /// A group key or aggregate input names a column the table does not have.
    #[error("column '{name}' not found")]
    UnknownColumn { name: String },

    /// A row does not match the width of the table schema.
    #[error("row {row} has {actual} values, schema has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// An aggregate returned more than one value for a partition.
    #[error("aggregate '{function}' returned {len} values, expected a single value")]
    NonScalarResult { function: String, len: usize },

    /// An aggregate was called with columns or extra arguments it does not accept.
    #[error("invalid argument for '{function}': {detail}")]
    InvalidArgument { function: String, detail: String },

    /// Exact integer accumulation exceeded the result type.
    #[error("numeric overflow in '{function}'")]
    Overflow { function: String },

    #[error("value type mismatch: {0}")]
    ValueType(#[from] ValueTypeError),

    #[error(transparent)]
    Type(#[from] TypeError),

    /// An error raised by a client-registered implementation.
    #[error("aggregate '{function}' failed: {source}")]
    Callback {
        function: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EmulationError {
    pub fn invalid_argument(function: &str, detail: impl Into<String>) -> Self {
        Self::InvalidArgument {
            function: function.to_string(),
            detail: detail.into(),
        }
    }

    pub fn callback(
        function: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Callback {
            function: function.to_string(),
            source: source.into(),
        }
    }
}
