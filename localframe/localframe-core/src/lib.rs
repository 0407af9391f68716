//! Canonical type model and type mapping for `localframe`.
//!
//! This crate provides the warehouse-independent [`DataType`] / [`Schema`]
//! representation, the native [`Value`] model, and the conversions between
//! them:
//! - [`infer_type`] / [`infer_schema`] derive types from values and rows.
//! - [`merge_types`] / [`merge_schemas`] unify per-row schemas.
//! - [`to_type_string`] / [`from_type_string`] map to and from warehouse
//!   type names.
//! - [`hint_to_type`] maps native type hints.

mod codec;
mod error;
mod hint;
mod infer;
mod schema;
mod value;

pub use codec::{from_type_string, to_type_string};
pub use error::{TypeError, ValueTypeError};
pub use hint::{FunctionSignature, hint_to_type};
pub use infer::{infer_schema, infer_type};
pub use schema::{
    DataType, DataTypeKind, INFERRED_DECIMAL, MAX_DECIMAL_PRECISION, Schema, StructField,
    format_schema, merge_schemas, merge_types,
};
pub use value::{CustomRef, CustomValue, TypedBuffer, Value};
