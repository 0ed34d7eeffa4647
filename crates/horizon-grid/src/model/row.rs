//! Row storage with stable row identity.
//!
//! Rows are uniform records mapping field names to JSON values. Every row is
//! given a [`RowId`] when it is ingested; the id, not the row's contents,
//! identifies it. Two rows with identical values are distinct entities.
//!
//! Replacing the data invalidates every previously issued id, so an id held
//! across a `set_rows` call never resolves to an unrelated new row.

use serde_json::Value;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};

new_key_type! {
    /// Stable identity of an ingested row.
    pub struct RowId;
}

/// A uniform data record bound to one grid line.
pub type Row = serde_json::Map<String, Value>;

/// Holds the current rows in ingestion order.
#[derive(Debug, Default)]
pub struct RowStore {
    rows: SlotMap<RowId, Row>,
    order: Vec<RowId>,
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all rows. Ids issued before this call stop resolving.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        // `clear` bumps slot versions, so stale keys never match new rows.
        self.rows.clear();
        self.order.clear();
        self.order.reserve(rows.len());
        for row in rows {
            let id = self.rows.insert(row);
            self.order.push(id);
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Row ids in ingestion order.
    pub fn ids(&self) -> &[RowId] {
        &self.order
    }

    /// Looks up a row by id.
    pub fn get(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id)
    }

    /// Returns `true` if the id refers to a current row.
    pub fn contains(&self, id: RowId) -> bool {
        self.rows.contains_key(id)
    }

    /// The first row in ingestion order.
    pub fn first(&self) -> Option<&Row> {
        self.order.first().and_then(|&id| self.rows.get(id))
    }

    /// Iterates rows in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Row)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.rows.get(id).map(|row| (id, row)))
    }
}

/// Converts a JSON array of objects into rows.
pub fn rows_from_json(value: Value) -> Result<Vec<Row>> {
    let Value::Array(items) = value else {
        return Err(Error::invalid_rows("expected an array of objects"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(Error::invalid_rows(format!(
                "element {position} is {} instead of an object",
                json_kind(&other)
            ))),
        })
        .collect()
}

/// Parses a JSON document holding an array of objects into rows.
pub fn rows_from_json_str(source: &str) -> Result<Vec<Row>> {
    rows_from_json(serde_json::from_str(source)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
