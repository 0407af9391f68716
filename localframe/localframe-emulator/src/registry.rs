//! Name-keyed registry of aggregate implementations.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{args::FuncArgs, builtins, column::EmulatedColumn, error::EmulationError};

/// Aggregate names the registry knows about out of the box.
///
/// Names without a built-in implementation resolve to a stub until a client
/// registers one.
pub const SUPPORTED_AGGREGATES: &[&str] = &[
    "approx_percentile",
    "approx_percentile_combine",
    "array_agg",
    "avg",
    "count",
    "count_distinct",
    "covar_pop",
    "covar_samp",
    "grouping",
    "listagg",
    "max",
    "mean",
    "median",
    "min",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "sum",
    "var_pop",
    "var_samp",
    "variance",
];

/// Local implementation of an aggregate function.
///
/// `columns` are the partition-restricted input columns in request order.
/// The returned column must hold at most one value, which becomes the
/// aggregate result for the partition.
pub trait AggregateFunction: Send + Sync {
    fn call(
        &self,
        columns: &[EmulatedColumn],
        args: &FuncArgs,
    ) -> Result<EmulatedColumn, EmulationError>;
}

impl<F> AggregateFunction for F
where
    F: Fn(&[EmulatedColumn], &FuncArgs) -> Result<EmulatedColumn, EmulationError> + Send + Sync,
{
    fn call(
        &self,
        columns: &[EmulatedColumn],
        args: &FuncArgs,
    ) -> Result<EmulatedColumn, EmulationError> {
        self(columns, args)
    }
}

/// Placeholder returned for names without a real implementation.
struct NotImplemented {
    name: String,
}

impl AggregateFunction for NotImplemented {
    fn call(&self, _: &[EmulatedColumn], _: &FuncArgs) -> Result<EmulatedColumn, EmulationError> {
        Err(EmulationError::AggregateNotImplemented {
            name: self.name.clone(),
        })
    }
}

#[derive(Clone)]
enum Entry {
    Stub,
    Implemented(Arc<dyn AggregateFunction>),
}

/// Maps aggregate names to implementations.
///
/// Names are matched exactly, including case. Registering a name replaces
/// any previous entry.
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Entry>,
}

impl FunctionRegistry {
    /// Registry with a stub for every name in [`SUPPORTED_AGGREGATES`].
    pub fn new() -> Self {
        Self {
            functions: SUPPORTED_AGGREGATES
                .iter()
                .map(|name| (name.to_string(), Entry::Stub))
                .collect(),
        }
    }

    /// Registry with the built-in implementations registered on top of the stubs.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_builtins(&mut registry);
        registry
    }

    /// Register a closure under `name`.
    pub fn register<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[EmulatedColumn], &FuncArgs) -> Result<EmulatedColumn, EmulationError>
            + Send
            + Sync
            + 'static,
    {
        self.register_function(name, Arc::new(function));
    }

    /// Register a shared implementation under `name`.
    pub fn register_function(&mut self, name: &str, function: Arc<dyn AggregateFunction>) {
        let replaced = matches!(self.functions.get(name), Some(Entry::Implemented(_)));
        tracing::debug!(function = %name, replaced, "registering aggregate");
        self.functions.insert(name.to_string(), Entry::Implemented(function));
    }

    /// The implementation for `name`, or a stub that fails with
    /// [`EmulationError::AggregateNotImplemented`] when called.
    pub fn lookup(&self, name: &str) -> Arc<dyn AggregateFunction> {
        match self.functions.get(name) {
            Some(Entry::Implemented(function)) => Arc::clone(function),
            _ => Arc::new(NotImplemented {
                name: name.to_string(),
            }),
        }
    }

    /// Like [`lookup`](Self::lookup), but fails instead of returning a stub.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn AggregateFunction>, EmulationError> {
        match self.functions.get(name) {
            Some(Entry::Implemented(function)) => Ok(Arc::clone(function)),
            _ => Err(EmulationError::AggregateNotImplemented {
                name: name.to_string(),
            }),
        }
    }

    pub fn is_implemented(&self, name: &str) -> bool {
        matches!(self.functions.get(name), Some(Entry::Implemented(_)))
    }

    /// Every known name, stubbed or implemented, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up `name` and call it.
    pub fn call(
        &self,
        name: &str,
        columns: &[EmulatedColumn],
        args: &FuncArgs,
    ) -> Result<EmulatedColumn, EmulationError> {
        self.lookup(name).call(columns, args)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let implemented: Vec<&str> = self
            .names()
            .into_iter()
            .filter(|name| self.is_implemented(name))
            .collect();
        f.debug_struct("FunctionRegistry")
            .field("implemented", &implemented)
            .finish()
    }
}
