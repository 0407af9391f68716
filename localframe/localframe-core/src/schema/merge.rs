use super::{DataType, Schema, StructField};
use crate::error::TypeError;

/// Unify two types into one.
///
/// `Null` is the identity: merging it with any type yields the other type.
/// Types of the same variant are merged structurally; anything else fails
/// with [`TypeError::TypeMerge`] carrying `path` for diagnosis.
pub fn merge_types(a: &DataType, b: &DataType, path: Option<&str>) -> Result<DataType, TypeError> {
    match (a, b) {
        (DataType::Null, _) => return Ok(b.clone()),
        (_, DataType::Null) => return Ok(a.clone()),
        _ if a.kind() != b.kind() => return Err(mismatch(a, b, path)),
        _ => {}
    }

    match (a, b) {
        (DataType::Struct(fa), DataType::Struct(fb)) => {
            merge_fields(fa, fb, path).map(DataType::Struct)
        }
        (DataType::Array(ea), DataType::Array(eb)) => {
            let element = merge_types(ea, eb, Some(nested("element in array", path).as_str()))?;
            Ok(DataType::array(element))
        }
        (
            DataType::Map {
                key: ka,
                value: va,
            },
            DataType::Map {
                key: kb,
                value: vb,
            },
        ) => {
            let key = merge_types(ka, kb, Some(nested("key of map", path).as_str()))?;
            let value = merge_types(va, vb, Some(nested("value of map", path).as_str()))?;
            Ok(DataType::map(key, value))
        }
        // NUMBER(10, 2) and NUMBER(38, 18) are distinct concrete types.
        (DataType::Decimal { .. }, DataType::Decimal { .. }) if a != b => {
            Err(mismatch(a, b, path))
        }
        _ => Ok(a.clone()),
    }
}

/// Merge two row schemas into one, treating them as struct types.
pub fn merge_schemas(a: &Schema, b: &Schema) -> Result<Schema, TypeError> {
    merge_fields(a, b, None)
}

fn merge_fields(a: &Schema, b: &Schema, path: Option<&str>) -> Result<Schema, TypeError> {
    let mut fields = Vec::with_capacity(a.len().max(b.len()));

    for field in a.iter() {
        let field_path = match path {
            Some(p) => format!("field {} in {p}", field.name),
            None => format!("field {}", field.name),
        };
        let merged = match b.field(&field.name) {
            Some(other) => StructField::new(
                field.name.clone(),
                merge_types(&field.data_type, &other.data_type, Some(field_path.as_str()))?,
                field.nullable || other.nullable,
            ),
            None => StructField::new(field.name.clone(), field.data_type.clone(), true),
        };
        fields.push(merged);
    }

    for field in b.iter() {
        if a.field(&field.name).is_none() {
            fields.push(StructField::new(field.name.clone(), field.data_type.clone(), true));
        }
    }

    Ok(Schema::new(fields))
}

fn nested(prefix: &str, path: Option<&str>) -> String {
    match path {
        Some(p) => format!("{prefix} {p}"),
        None => prefix.to_string(),
    }
}

fn mismatch(a: &DataType, b: &DataType, path: Option<&str>) -> TypeError {
    TypeError::TypeMerge {
        path: path.map(str::to_string),
        left: a.to_string(),
        right: b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_path_names_enclosing_struct() {
        let inner_a = DataType::Struct(vec![StructField::new("x", DataType::Long, true)].into());
        let inner_b = DataType::Struct(vec![StructField::new("x", DataType::String, true)].into());
        let err = merge_types(&inner_a, &inner_b, Some("field s")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field x in field s: cannot merge type long and string"
        );
    }

    #[test]
    fn array_path_is_prefixed() {
        let err = merge_types(
            &DataType::array(DataType::Long),
            &DataType::array(DataType::Boolean),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TypeError::TypeMerge { path: Some(ref p), .. } if p == "element in array"
        ));
    }
}
