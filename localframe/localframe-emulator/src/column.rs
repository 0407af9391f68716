//! In-memory column handed to aggregate implementations.

use std::ops::Index;

use localframe_core::{DataType, TypeError, Value, infer_type, merge_types};

/// Ordered, named sequence of values with one declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatedColumn {
    name: String,
    data_type: DataType,
    values: Vec<Value>,
}

impl EmulatedColumn {
    pub fn new(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    /// Build a column whose declared type is inferred from and merged across `values`.
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Result<Self, TypeError> {
        let data_type = column_type(&values)?;
        Ok(Self::new(name, data_type, values))
    }

    /// Single-value column; the engine broadcasts it as the aggregate result.
    pub fn broadcast(value: impl Into<Value>) -> Result<Self, TypeError> {
        Self::from_values("", vec![value.into()])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Values that are not `Null`, in order.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.values.clone()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Unnamed column; values whose types do not unify are declared as `Variant`.
impl From<Vec<Value>> for EmulatedColumn {
    fn from(values: Vec<Value>) -> Self {
        let data_type = column_type(&values).unwrap_or(DataType::Variant);
        Self::new("", data_type, values)
    }
}

impl Index<usize> for EmulatedColumn {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<EmulatedColumn> for Vec<Value> {
    fn from(value: EmulatedColumn) -> Self {
        value.values
    }
}

impl<'a> IntoIterator for &'a EmulatedColumn {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn column_type(values: &[Value]) -> Result<DataType, TypeError> {
    values.iter().try_fold(DataType::Null, |acc, value| {
        merge_types(&acc, &infer_type(value)?, None)
    })
}
