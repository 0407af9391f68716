//! Session owning the function registry and frame construction.

use std::sync::Arc;

use localframe_core::{
    DataType, Schema, StructField, TypeError, Value, infer_schema, merge_schemas,
};
use localframe_emulator::{
    AggregateFunction, EmulatedColumn, EmulationError, EmulatorOptions, FuncArgs,
    FunctionRegistry, Table,
};

use crate::{error::FrameError, frame::LocalFrame};

/// Local stand-in for a warehouse connection.
///
/// Owns the aggregate [`FunctionRegistry`]; frames are evaluated against the
/// session they are passed to.
#[derive(Debug, Clone)]
pub struct Session {
    registry: FunctionRegistry,
    options: EmulatorOptions,
}

/// Builder for configuring [`Session`].
#[derive(Debug, Default)]
pub struct SessionBuilder {
    registry: Option<FunctionRegistry>,
    builtins: bool,
    options: EmulatorOptions,
}

impl Session {
    /// Create a builder for [`Session`].
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    /// Session whose registry holds only stubs.
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::new(),
            options: EmulatorOptions::default(),
        }
    }

    /// Register a closure as the implementation of aggregate `name`.
    pub fn register<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[EmulatedColumn], &FuncArgs) -> Result<EmulatedColumn, EmulationError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register(name, function);
    }

    /// Register a shared implementation of aggregate `name`.
    pub fn register_function(&mut self, name: &str, function: Arc<dyn AggregateFunction>) {
        self.registry.register_function(name, function);
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn options(&self) -> EmulatorOptions {
        self.options
    }

    /// Build a frame from rows of native values.
    ///
    /// Each row is inferred on its own and the row schemas are merged into one.
    /// Rows are then laid out in the merged schema order; members a row does
    /// not have become `Null`.
    pub fn create_frame(
        &self,
        rows: Vec<Value>,
        names: Option<&[&str]>,
    ) -> Result<LocalFrame, FrameError> {
        let names: Option<Vec<String>> = names.map(|n| n.iter().map(|s| s.to_string()).collect());
        let names = names.as_deref();

        let row_schemas = rows
            .iter()
            .map(|row| infer_schema(row, names))
            .collect::<Result<Vec<_>, TypeError>>()?;

        let schema = match row_schemas.split_first() {
            Some((first, rest)) => rest
                .iter()
                .try_fold(first.clone(), |acc, s| merge_schemas(&acc, s))?,
            None => names
                .unwrap_or_default()
                .iter()
                .map(|name| StructField::new(name.clone(), DataType::Null, true))
                .collect(),
        };
        if let Some(name) = schema.duplicate_name() {
            return Err(FrameError::DuplicateColumn {
                name: name.to_string(),
            });
        }

        let table_rows = rows
            .iter()
            .zip(&row_schemas)
            .map(|(row, row_schema)| layout_row(&schema, row_schema, row))
            .collect();
        tracing::debug!(rows = rows.len(), columns = schema.len(), "created local frame");
        Ok(LocalFrame::from_table(Table::new(schema, table_rows)?))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// Start from an existing registry instead of an empty one.
    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register the built-in aggregates (`sum`, `min`, `avg`, ...).
    pub fn with_builtin_aggregates(mut self) -> Self {
        self.builtins = true;
        self
    }

    /// Evaluate partitions in parallel.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.options = self.options.with_parallel(parallel);
        self
    }

    pub fn build(self) -> Session {
        let mut registry = self.registry.unwrap_or_default();
        if self.builtins {
            localframe_emulator::register_builtins(&mut registry);
        }
        Session {
            registry,
            options: self.options,
        }
    }
}

/// Values of `row` in the order [`infer_schema`] produced `row_schema`.
fn row_values(row: &Value) -> Vec<&Value> {
    match row {
        Value::Map(entries) if !entries.is_empty() => entries.iter().map(|(_, v)| v).collect(),
        Value::Struct(members) if !members.is_empty() => members.iter().map(|(_, v)| v).collect(),
        Value::Array(items) if !items.is_empty() => items.iter().collect(),
        Value::Null | Value::Map(_) | Value::Struct(_) | Value::Array(_) => vec![&Value::Null],
        scalar => vec![scalar],
    }
}

fn layout_row(schema: &Schema, row_schema: &Schema, row: &Value) -> Vec<Value> {
    let values = row_values(row);
    schema
        .iter()
        .map(|field| {
            row_schema
                .index_of(&field.name)
                .and_then(|i| values.get(i))
                .map_or(Value::Null, |v| (*v).clone())
        })
        .collect()
}
