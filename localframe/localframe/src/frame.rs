//! Materialized local frames and grouped views over them.

#[cfg(feature = "arrow")]
use localframe_arrow::arrow::record_batch::RecordBatch;
use localframe_core::{Schema, Value};
use localframe_emulator::{AggregateSpec, Table, execute_aggregate};

use crate::{error::FrameError, session::Session};

/// Materialized rows with a merged schema.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    table: Table,
}

/// A frame together with the columns to group by.
#[derive(Debug)]
pub struct GroupedFrame<'a> {
    frame: &'a LocalFrame,
    keys: Vec<String>,
}

impl LocalFrame {
    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    pub fn schema(&self) -> &Schema {
        self.table.schema()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn num_rows(&self) -> usize {
        self.table.num_rows()
    }

    pub fn columns(&self) -> Vec<&str> {
        self.schema().names().collect()
    }

    /// Rows in schema order.
    pub fn collect(&self) -> Vec<Vec<Value>> {
        self.table.rows().to_vec()
    }

    /// Aggregate the whole frame into a single row.
    pub fn agg(
        &self,
        session: &Session,
        specs: &[AggregateSpec],
    ) -> Result<LocalFrame, FrameError> {
        self.group_by(&[]).agg(session, specs)
    }

    pub fn group_by(&self, keys: &[&str]) -> GroupedFrame<'_> {
        GroupedFrame {
            frame: self,
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Export the frame as an Arrow `RecordBatch`. Empty frames are rejected.
    #[cfg(feature = "arrow")]
    pub fn to_record_batch(&self) -> Result<RecordBatch, FrameError> {
        Ok(localframe_arrow::rows_to_record_batch(
            self.table.schema(),
            self.table.rows(),
        )?)
    }
}

impl GroupedFrame<'_> {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// One output row per distinct key tuple, in first-occurrence order.
    pub fn agg(
        &self,
        session: &Session,
        specs: &[AggregateSpec],
    ) -> Result<LocalFrame, FrameError> {
        let keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        let table = execute_aggregate(
            &self.frame.table,
            &keys,
            specs,
            session.registry(),
            session.options(),
        )?;
        Ok(LocalFrame::from_table(table))
    }
}
