//! Mapping between canonical types and warehouse type-name strings.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::{
    error::TypeError,
    schema::{DataType, DataTypeKind, MAX_DECIMAL_PRECISION},
};

/// Matches parametrized decimals such as `"  decimal  (  2  ,  1  )  "`.
static DECIMAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(numeric|number|decimal)\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)\s*$")
        .expect("decimal pattern is valid")
});

/// Normalized type name to kind: one entry per canonical kind plus warehouse aliases.
static TYPE_NAMES: LazyLock<HashMap<&'static str, DataTypeKind>> = LazyLock::new(|| {
    let mut names: HashMap<&'static str, DataTypeKind> = DataTypeKind::ALL
        .iter()
        .map(|kind| (kind.name(), *kind))
        .collect();
    for (alias, kind) in [
        ("int", DataTypeKind::Integer),
        ("smallint", DataTypeKind::Short),
        ("byteint", DataTypeKind::Byte),
        ("bigint", DataTypeKind::Long),
        ("number", DataTypeKind::Decimal),
        ("numeric", DataTypeKind::Decimal),
        ("object", DataTypeKind::Map),
    ] {
        names.insert(alias, kind);
    }
    names
});

/// Render a canonical type as a warehouse type name.
///
/// `Null` renders as `STRING` so that all-null sample columns still get a
/// concrete column type. Decimals outside `scale <= precision <= 38` fail with
/// [`TypeError::InvalidDecimal`].
pub fn to_type_string(data_type: &DataType) -> Result<String, TypeError> {
    let name = match data_type {
        DataType::Decimal { precision, scale } => {
            DataType::decimal(*precision, *scale)?;
            return Ok(format!("NUMBER({precision}, {scale})"));
        }
        DataType::Integer => "INT",
        DataType::Short => "SMALLINT",
        DataType::Byte => "BYTEINT",
        DataType::Long => "BIGINT",
        DataType::Float => "FLOAT",
        DataType::Double => "DOUBLE",
        DataType::String | DataType::Null => "STRING",
        DataType::Boolean => "BOOLEAN",
        DataType::Date => "DATE",
        DataType::Time => "TIME",
        DataType::Timestamp => "TIMESTAMP",
        DataType::Binary => "BINARY",
        DataType::Array(_) => "ARRAY",
        DataType::Map { .. } => "OBJECT",
        DataType::Variant => "VARIANT",
        DataType::Geography => "GEOGRAPHY",
        DataType::Struct(_) => {
            return Err(TypeError::UnsupportedType {
                type_name: data_type.type_name(),
            });
        }
    };
    Ok(name.to_string())
}

/// Parse a warehouse type name into a canonical type.
///
/// Parametrized decimals are matched first; other names are compared after
/// removing all whitespace and lower-casing. Names without parameters build
/// [`DataTypeKind::default_type`].
pub fn from_type_string(input: &str) -> Result<DataType, TypeError> {
    if let Some(caps) = DECIMAL_RE.captures(input) {
        // Digit runs too long for u64 are out of range either way.
        let precision = caps[2].parse::<u64>().unwrap_or(u64::MAX);
        let scale = caps[3].parse::<u64>().unwrap_or(u64::MAX);
        return decimal_from_parts(precision, scale);
    }

    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    TYPE_NAMES
        .get(normalized.as_str())
        .map(|kind| kind.default_type())
        .ok_or_else(|| TypeError::UnknownTypeString {
            input: input.to_string(),
        })
}

fn decimal_from_parts(precision: u64, scale: u64) -> Result<DataType, TypeError> {
    if precision > u64::from(MAX_DECIMAL_PRECISION) || scale > precision {
        return Err(TypeError::InvalidDecimal { precision, scale });
    }
    // Both fit in u8 after the range check above.
    DataType::decimal(precision as u8, scale as u8)
}
