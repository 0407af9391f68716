use std::fmt::{Error, Result, Write as _};

use super::{DataType, StructField};

/// Format a schema in a readable style:
/// primitive fields are rendered in one line, composite fields are pretty-printed.
/// Nested fields follow the same rule.
pub fn format_schema(fields: impl AsRef<[StructField]>) -> std::result::Result<String, Error> {
    let mut out = String::new();

    for field in fields.as_ref() {
        format_labeled_type(&field.name, &field.data_type, Some(field.nullable), 0, &mut out)?;
    }

    Ok(out)
}

fn format_data_type(
    data_type: &DataType,
    nullable: Option<bool>,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {}", data_type.type_name())?;
    if let Some(nullable) = nullable {
        writeln!(out, "{pad}nullable: {nullable}")?;
    }

    match data_type {
        DataType::Struct(fields) => {
            writeln!(out, "{pad}fields:")?;
            for child in fields.iter() {
                format_labeled_type(
                    &child.name,
                    &child.data_type,
                    Some(child.nullable),
                    indent + 4,
                    out,
                )?;
            }
        }
        DataType::Array(element) => {
            format_labeled_type("element", element, None, indent, out)?;
        }
        DataType::Map { key, value } => {
            format_labeled_type("key", key, None, indent, out)?;
            format_labeled_type("value", value, None, indent, out)?;
        }
        _ => unreachable!("{data_type:?} is not a composite type"),
    }

    Ok(())
}

fn format_labeled_type(
    label: &str,
    data_type: &DataType,
    nullable: Option<bool>,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    if data_type.is_primitive() {
        match nullable {
            Some(nullable) => {
                writeln!(out, "{pad}{label}: {{ type: {data_type}, nullable: {nullable} }}")?
            }
            None => writeln!(out, "{pad}{label}: {{ type: {data_type} }}")?,
        }
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_data_type(data_type, nullable, indent + 4, out)?;
    }
    Ok(())
}
