//! JSON Lines input.

use std::{
    fs,
    io::{self, BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};
use localframe::core::Value;

/// Read one row per JSON value from `path`, or from stdin when `path` is `None`.
///
/// Arrays become positional rows, objects become named rows and anything else
/// is a single-column row.
pub fn read_rows(path: Option<&Path>) -> Result<Vec<Value>> {
    let reader: Box<dyn Read> = match path {
        Some(path) => Box::new(BufReader::new(
            fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };
    serde_json::Deserializer::from_reader(reader)
        .into_iter::<serde_json::Value>()
        .enumerate()
        .map(|(i, row)| {
            row.map(json_to_value)
                .with_context(|| format!("invalid JSON in row {}", i + 1))
        })
        .collect()
}

pub fn json_to_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Long(i),
            None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::string(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(members) => Value::Struct(
            members
                .into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_keep_integer_precision() {
        let value = json_to_value(serde_json::json!([1, 2.5, null, "x"]));
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Long(1),
                Value::Double(2.5),
                Value::Null,
                Value::string("x"),
            ])
        );
    }

    #[test]
    fn objects_keep_member_order() {
        let value = json_to_value(serde_json::json!({"b": 1, "a": true}));
        assert_eq!(
            value,
            Value::Struct(vec![
                ("b".to_string(), Value::Long(1)),
                ("a".to_string(), Value::Boolean(true)),
            ])
        );
    }
}
