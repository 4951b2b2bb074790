//! The immutable in-memory table.

use std::sync::Arc;

use super::record::{Columns, Record};
use super::value::Value;

/// Ordered, immutable collection of records sharing one header.
#[derive(Debug, Default, PartialEq)]
pub struct Table {
    columns: Arc<Columns>,
    records: Vec<Record>,
}

impl Table {
    /// The table served when nothing could be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from normalized column names and zero-filled rows.
    ///
    /// Every row must have exactly one value per column.
    pub(crate) fn from_rows(names: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let columns = Arc::new(Columns::new(names));
        let records = rows
            .into_iter()
            .map(|values| Record::new(Arc::clone(&columns), values))
            .collect();
        Self { columns, records }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
