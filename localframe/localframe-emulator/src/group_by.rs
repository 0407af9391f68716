//! Partitioning and per-partition aggregate dispatch.
//!
//! The pipeline is a chain of owned stages, [`Table`] → [`Partitioned`] →
//! [`Aggregated`] → [`Table`]; each stage can only move forward.

use std::sync::Arc;

use indexmap::IndexMap;
use localframe_core::{DataType, Schema, StructField, Value, infer_type, merge_types};
use rayon::prelude::*;

use crate::{
    args::FuncArgs,
    column::EmulatedColumn,
    error::EmulationError,
    key::KeyValue,
    registry::{AggregateFunction, FunctionRegistry},
    table::Table,
};

/// One requested aggregate: function name, input columns, extra arguments and
/// an optional output name.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSpec {
    pub function: String,
    pub inputs: Vec<String>,
    pub args: FuncArgs,
    pub alias: Option<String>,
}

impl AggregateSpec {
    pub fn new<S: Into<String>>(function: &str, inputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            function: function.to_string(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            args: FuncArgs::new(),
            alias: None,
        }
    }

    pub fn with_args(mut self, args: FuncArgs) -> Self {
        self.args = args;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Alias if set, otherwise `FUNCTION(INPUT, ...)`.
    pub fn output_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => format!(
                "{}({})",
                self.function.to_ascii_uppercase(),
                self.inputs.join(", ").to_ascii_uppercase()
            ),
        }
    }
}

/// Execution knobs for the emulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmulatorOptions {
    /// Evaluate partitions on the rayon thread pool.
    pub parallel: bool,
}

impl EmulatorOptions {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[derive(Debug)]
struct Partition {
    key: Vec<Value>,
    rows: Vec<usize>,
}

/// A table split into partitions in first-occurrence order of their keys.
#[derive(Debug)]
pub struct Partitioned<'a> {
    table: &'a Table,
    key_indices: Vec<usize>,
    partitions: Vec<Partition>,
}

/// Per-partition output rows: key values followed by aggregate results.
#[derive(Debug)]
pub struct Aggregated {
    key_fields: Vec<StructField>,
    output_names: Vec<String>,
    rows: Vec<Vec<Value>>,
}

struct ResolvedSpec<'s> {
    spec: &'s AggregateSpec,
    function: Arc<dyn AggregateFunction>,
    inputs: Vec<usize>,
}

impl Table {
    /// Split rows by the tuple of values in `keys`. Nulls group together.
    /// With no keys the whole table is one partition.
    pub fn partition_by(&self, keys: &[&str]) -> Result<Partitioned<'_>, EmulationError> {
        let key_indices = keys
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let partitions = if key_indices.is_empty() {
            vec![Partition {
                key: Vec::new(),
                rows: (0..self.num_rows()).collect(),
            }]
        } else {
            let mut groups: IndexMap<Vec<KeyValue>, Partition> = IndexMap::new();
            for (i, row) in self.rows().iter().enumerate() {
                let key: Vec<KeyValue> =
                    key_indices.iter().map(|&k| KeyValue::from(&row[k])).collect();
                groups
                    .entry(key)
                    .or_insert_with(|| Partition {
                        key: key_indices.iter().map(|&k| row[k].clone()).collect(),
                        rows: Vec::new(),
                    })
                    .rows
                    .push(i);
            }
            groups.into_values().collect()
        };

        tracing::debug!(
            keys = ?keys,
            rows = self.num_rows(),
            partitions = partitions.len(),
            "partitioned table"
        );
        Ok(Partitioned {
            table: self,
            key_indices,
            partitions,
        })
    }
}

impl Partitioned<'_> {
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Key values of each partition, in output order.
    pub fn keys(&self) -> impl Iterator<Item = &[Value]> {
        self.partitions.iter().map(|p| p.key.as_slice())
    }

    /// Evaluate every aggregate on every partition.
    ///
    /// All functions and input columns are resolved before any partition is
    /// evaluated. The first failure aborts the whole call.
    pub fn aggregate(
        self,
        specs: &[AggregateSpec],
        registry: &FunctionRegistry,
        options: EmulatorOptions,
    ) -> Result<Aggregated, EmulationError> {
        let resolved = specs
            .iter()
            .map(|spec| {
                let function = registry.resolve(&spec.function)?;
                let inputs = spec
                    .inputs
                    .iter()
                    .map(|name| self.table.column_index(name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ResolvedSpec {
                    spec,
                    function,
                    inputs,
                })
            })
            .collect::<Result<Vec<_>, EmulationError>>()?;

        tracing::debug!(
            partitions = self.partitions.len(),
            aggregates = resolved.len(),
            parallel = options.parallel,
            "evaluating aggregates"
        );

        let evaluate = |partition: &Partition| self.evaluate_partition(partition, &resolved);
        let rows = if options.parallel {
            self.partitions
                .par_iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.partitions
                .iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        };

        let schema = self.table.schema();
        Ok(Aggregated {
            key_fields: self
                .key_indices
                .iter()
                .map(|&k| schema[k].clone())
                .collect(),
            output_names: specs.iter().map(AggregateSpec::output_name).collect(),
            rows,
        })
    }

    fn evaluate_partition(
        &self,
        partition: &Partition,
        specs: &[ResolvedSpec<'_>],
    ) -> Result<Vec<Value>, EmulationError> {
        let mut row = partition.key.clone();
        row.reserve(specs.len());
        for resolved in specs {
            let columns: Vec<EmulatedColumn> = resolved
                .inputs
                .iter()
                .map(|&index| {
                    let rows = partition
                        .rows
                        .iter()
                        .map(|&r| self.table.rows()[r].as_slice());
                    self.table.column_at(index, rows)
                })
                .collect();
            let result = resolved.function.call(&columns, &resolved.spec.args)?;
            tracing::trace!(
                function = %resolved.spec.function,
                rows = partition.rows.len(),
                "aggregate evaluated"
            );
            row.push(scalar_result(&resolved.spec.function, result)?);
        }
        Ok(row)
    }
}

impl Aggregated {
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Emit the output table. Aggregate column types are inferred from the
    /// results and merged across partitions.
    pub fn into_table(self) -> Result<Table, EmulationError> {
        let offset = self.key_fields.len();
        let mut fields = self.key_fields;
        for (i, name) in self.output_names.into_iter().enumerate() {
            let data_type = self.rows.iter().try_fold(DataType::Null, |acc, row| {
                merge_types(&acc, &infer_type(&row[offset + i])?, Some(name.as_str()))
            })?;
            fields.push(StructField::new(name, data_type, true));
        }
        Table::new(Schema::new(fields), self.rows)
    }
}

/// Reduce an implementation's output to the single broadcast value.
fn scalar_result(function: &str, column: EmulatedColumn) -> Result<Value, EmulationError> {
    match column.len() {
        0 => Ok(Value::Null),
        1 => Ok(column.into_values().swap_remove(0)),
        len => Err(EmulationError::NonScalarResult {
            function: function.to_string(),
            len,
        }),
    }
}

/// Group `table` by `group_keys` and evaluate `specs` per group.
///
/// Output rows follow first-occurrence order of the keys; each row holds the
/// key values followed by the aggregate results in request order.
pub fn execute_aggregate(
    table: &Table,
    group_keys: &[&str],
    specs: &[AggregateSpec],
    registry: &FunctionRegistry,
    options: EmulatorOptions,
) -> Result<Table, EmulationError> {
    table
        .partition_by(group_keys)?
        .aggregate(specs, registry, options)?
        .into_table()
}
