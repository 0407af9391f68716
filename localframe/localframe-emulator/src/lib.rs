//! Local emulation of warehouse aggregate functions.
//!
//! Aggregates are looked up by name in a [`FunctionRegistry`] and evaluated
//! per partition of a row-oriented [`Table`]. Names the registry knows but has
//! no implementation for fail with
//! [`EmulationError::AggregateNotImplemented`] until a client registers one.

mod args;
mod builtins;
mod column;
mod error;
mod group_by;
mod key;
mod registry;
mod table;

pub use args::FuncArgs;
pub use builtins::{AVG_SCALE, MEDIAN_SCALE, compare_values, register_builtins};
pub use column::EmulatedColumn;
pub use error::EmulationError;
pub use group_by::{AggregateSpec, Aggregated, EmulatorOptions, Partitioned, execute_aggregate};
pub use key::KeyValue;
pub use registry::{AggregateFunction, FunctionRegistry, SUPPORTED_AGGREGATES};
pub use table::Table;
