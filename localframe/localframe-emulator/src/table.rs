//! Row-oriented in-memory table.

use localframe_core::{Schema, Value};

use crate::{column::EmulatedColumn, error::EmulationError};

/// Rows of values laid out in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Fails with [`EmulationError::RowWidth`] when a row does not have one
    /// value per schema field.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self, EmulationError> {
        let expected = schema.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(EmulationError::RowWidth {
                row,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { schema, rows })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.len()
    }

    pub fn column_index(&self, name: &str) -> Result<usize, EmulationError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| EmulationError::UnknownColumn {
                name: name.to_string(),
            })
    }

    /// Materialize the named column over all rows.
    pub fn column(&self, name: &str) -> Result<EmulatedColumn, EmulationError> {
        let index = self.column_index(name)?;
        Ok(self.column_at(index, self.rows.iter().map(Vec::as_slice)))
    }

    pub(crate) fn column_at<'a>(
        &self,
        index: usize,
        rows: impl Iterator<Item = &'a [Value]>,
    ) -> EmulatedColumn {
        let field = &self.schema[index];
        EmulatedColumn::new(
            field.name.clone(),
            field.data_type.clone(),
            rows.map(|row| row[index].clone()).collect(),
        )
    }
}
