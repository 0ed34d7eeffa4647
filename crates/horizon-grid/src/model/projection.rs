//! The data projection interface and its JSON row implementation.
//!
//! A [`DataProjection`] owns the rows, the field list that maps columns to
//! row keys, the display headers and the filtered view. The behavior layer
//! only talks to it through this trait.

use serde_json::Value;

use horizon_grid_core::logging::targets;

use crate::config::GridConfig;

use super::column::{Column, ColumnDefinition, headerify};
use super::filter::filter_rows;
use super::groups::{self, ColumnDescriptor};
use super::matrix::{self, FieldValues, Matrix};
use super::row::{Row, RowId, RowStore};
use super::selection::SelectionRect;
use super::signals::ModelSignals;

static NULL: Value = Value::Null;

/// The row source a grid behavior projects into columns.
///
/// Row coordinates (`y`) are indices into the filtered view; column
/// coordinates (`x`) are indices into the field list.
pub trait DataProjection {
    /// Number of data columns, one per field.
    fn column_count(&self) -> usize;

    /// Number of rows in the filtered view.
    fn row_count(&self) -> usize;

    /// The field each column projects.
    fn fields(&self) -> &[String];

    /// Replaces the field list.
    fn set_fields(&mut self, fields: Vec<String>);

    /// The display header of each column.
    fn headers(&self) -> &[String];

    /// Replaces the display headers.
    fn set_headers(&mut self, headers: Vec<String>);

    /// Sets headers and fields from column definitions.
    fn set_columns(&mut self, definitions: &[ColumnDefinition]) {
        self.set_headers(definitions.iter().map(|d| d.title.clone()).collect());
        self.set_fields(definitions.iter().map(|d| d.field.clone()).collect());
    }

    /// Replaces all rows. The filtered view is reset to every row.
    fn set_data(&mut self, rows: Vec<Row>);

    /// Row ids of the filtered view in display order.
    fn filtered_rows(&self) -> &[RowId];

    /// Looks up a row by id.
    fn row(&self, id: RowId) -> Option<&Row>;

    /// The filtered row at `y`.
    fn filtered_row(&self, y: usize) -> Option<&Row> {
        self.filtered_rows().get(y).and_then(|&id| self.row(id))
    }

    /// The value at column `x` of filtered row `y`. `Value::Null` when out
    /// of range or when the row lacks the field.
    fn value(&self, x: usize, y: usize) -> &Value;

    /// Recomputes the filtered view from the columns' predicates.
    fn apply_filters(&mut self, columns: &[Column]);

    /// Active group column ids in group order.
    fn group_bys(&self) -> &[usize];

    /// Replaces the active groups.
    fn set_groups(&mut self, group_bys: Vec<usize>);

    /// Returns `true` if rows are grouped and a hierarchy column applies.
    fn has_hierarchy_column(&self) -> bool {
        !self.group_bys().is_empty()
    }

    /// Summary rows displayed above the data.
    fn top_totals(&self) -> &[Vec<Value>];

    /// Replaces the summary rows displayed above the data.
    fn set_top_totals(&mut self, totals: Vec<Vec<Value>>);

    /// Summary rows displayed below the data.
    fn bottom_totals(&self) -> &[Vec<Value>];

    /// Replaces the summary rows displayed below the data.
    fn set_bottom_totals(&mut self, totals: Vec<Vec<Value>>);

    /// Change notifications.
    fn signals(&self) -> &ModelSignals;

    /// Describes the active groups.
    fn groups(&self) -> Vec<ColumnDescriptor> {
        groups::groups(self.headers(), self.fields(), self.group_bys())
    }

    /// Describes every column that is not grouped on.
    fn available_groups(&self) -> Vec<ColumnDescriptor> {
        groups::available_groups(self.headers(), self.fields(), self.group_bys())
    }

    /// See [`matrix::row_selection_matrix`].
    fn row_selection_matrix(&self, rows: &[usize]) -> Matrix {
        matrix::row_selection_matrix(self, rows)
    }

    /// See [`matrix::column_selection_matrix`].
    fn column_selection_matrix(&self, columns: &[usize]) -> Matrix {
        matrix::column_selection_matrix(self, columns)
    }

    /// See [`matrix::selection_matrix`].
    fn selection_matrix(&self, rects: &[SelectionRect]) -> Vec<Matrix> {
        matrix::selection_matrix(self, rects)
    }

    /// See [`matrix::row_selection`].
    fn row_selection(&self, rows: &[usize]) -> FieldValues {
        matrix::row_selection(self, rows)
    }

    /// See [`matrix::column_selection`].
    fn column_selection(&self, columns: &[usize]) -> FieldValues {
        matrix::column_selection(self, columns)
    }

    /// See [`matrix::selection`].
    fn selection(&self, rects: &[SelectionRect]) -> Vec<FieldValues> {
        matrix::selection(self, rects)
    }
}

/// A [`DataProjection`] over JSON object rows.
///
/// Without an explicit field list the fields are the keys of the first row,
/// minus keys starting with the hidden prefix. Without explicit headers the
/// headers are derived from the fields.
///
/// # Example
///
/// ```
/// use horizon_grid::model::{DataProjection, JsonDataModel, rows_from_json};
/// use serde_json::json;
///
/// let mut model = JsonDataModel::new();
/// model.set_data(rows_from_json(json!([
///     {"first_name": "Ada", "__key": 7},
///     {"first_name": "Grace", "__key": 8},
/// ])).unwrap());
///
/// assert_eq!(model.fields(), ["first_name"]);
/// assert_eq!(model.headers(), ["First Name"]);
/// assert_eq!(model.value(0, 1), &json!("Grace"));
/// ```
pub struct JsonDataModel {
    store: RowStore,
    filtered: Vec<RowId>,
    explicit_fields: Option<Vec<String>>,
    derived_fields: Vec<String>,
    explicit_headers: Vec<String>,
    derived_headers: Vec<String>,
    group_bys: Vec<usize>,
    top_totals: Vec<Vec<Value>>,
    bottom_totals: Vec<Vec<Value>>,
    hidden_field_prefix: String,
    derive_headers: bool,
    signals: ModelSignals,
}

static_assertions::assert_impl_all!(JsonDataModel: Send, Sync);

impl Default for JsonDataModel {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDataModel {
    /// Creates an empty model with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&GridConfig::default())
    }

    /// Creates an empty model.
    pub fn with_config(config: &GridConfig) -> Self {
        Self {
            store: RowStore::new(),
            filtered: Vec::new(),
            explicit_fields: None,
            derived_fields: Vec::new(),
            explicit_headers: Vec::new(),
            derived_headers: Vec::new(),
            group_bys: Vec::new(),
            top_totals: Vec::new(),
            bottom_totals: Vec::new(),
            hidden_field_prefix: config.hidden_field_prefix.clone(),
            derive_headers: config.derive_headers,
            signals: ModelSignals::new(),
        }
    }

    /// The unfiltered rows.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// The rows of the filtered view in display order.
    pub fn filtered_data(&self) -> Vec<&Row> {
        self.filtered
            .iter()
            .filter_map(|&id| self.store.get(id))
            .collect()
    }

    /// Drops the explicit field list so fields are derived from the data again.
    pub fn reset_fields(&mut self) {
        self.explicit_fields = None;
        self.refresh_derived();
        self.signals.fields_changed.emit(self.column_count());
    }

    fn is_hidden_field(&self, key: &str) -> bool {
        !self.hidden_field_prefix.is_empty() && key.starts_with(&self.hidden_field_prefix)
    }

    /// Recomputes derived fields and headers, then drops groups on columns
    /// that no longer exist.
    fn refresh_derived(&mut self) {
        self.derived_fields = match self.store.first() {
            Some(row) => row
                .keys()
                .filter(|key| !self.is_hidden_field(key))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        let headers = if self.derive_headers {
            self.fields().iter().map(|field| headerify(field)).collect()
        } else {
            self.fields().to_vec()
        };
        self.derived_headers = headers;

        let count = self.column_count();
        if self.group_bys.iter().any(|&id| id >= count) {
            let kept = dedup_groups(std::mem::take(&mut self.group_bys), count);
            self.group_bys = kept.clone();
            self.signals.groups_changed.emit(kept);
        }
    }
}

/// Keeps the first occurrence of each group id below `count`.
fn dedup_groups(group_bys: Vec<usize>, count: usize) -> Vec<usize> {
    let mut ids: Vec<usize> = Vec::with_capacity(group_bys.len());
    for id in group_bys {
        if id >= count {
            tracing::debug!(target: targets::GROUPS, id, count, "ignoring group on unknown column");
        } else if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

impl DataProjection for JsonDataModel {
    fn column_count(&self) -> usize {
        self.fields().len()
    }

    fn row_count(&self) -> usize {
        self.filtered.len()
    }

    fn fields(&self) -> &[String] {
        self.explicit_fields.as_deref().unwrap_or(&self.derived_fields)
    }

    fn set_fields(&mut self, fields: Vec<String>) {
        self.explicit_fields = Some(fields);
        self.refresh_derived();
        self.signals.fields_changed.emit(self.column_count());
    }

    fn headers(&self) -> &[String] {
        if self.explicit_headers.is_empty() {
            &self.derived_headers
        } else {
            &self.explicit_headers
        }
    }

    fn set_headers(&mut self, headers: Vec<String>) {
        self.explicit_headers = headers;
        let count = self.headers().len();
        if count > 0 {
            self.signals.header_data_changed.emit((0, count - 1));
        }
    }

    fn set_data(&mut self, rows: Vec<Row>) {
        let store = &mut self.store;
        let filtered = &mut self.filtered;
        self.signals.emit_reset(|| {
            store.set_rows(rows);
            *filtered = store.ids().to_vec();
        });
        self.refresh_derived();
        tracing::debug!(
            target: targets::FILTER,
            rows = self.store.len(),
            columns = self.column_count(),
            "data replaced"
        );
    }

    fn filtered_rows(&self) -> &[RowId] {
        &self.filtered
    }

    fn row(&self, id: RowId) -> Option<&Row> {
        self.store.get(id)
    }

    fn value(&self, x: usize, y: usize) -> &Value {
        let Some(field) = self.fields().get(x) else {
            return &NULL;
        };
        self.filtered_row(y)
            .and_then(|row| row.get(field))
            .unwrap_or(&NULL)
    }

    fn apply_filters(&mut self, columns: &[Column]) {
        let store = &self.store;
        let filtered = &mut self.filtered;
        self.signals.emit_layout_changed(|| {
            *filtered = filter_rows(store, columns);
        });
    }

    fn group_bys(&self) -> &[usize] {
        &self.group_bys
    }

    fn set_groups(&mut self, group_bys: Vec<usize>) {
        let ids = dedup_groups(group_bys, self.column_count());
        self.group_bys = ids.clone();
        self.signals.groups_changed.emit(ids);
    }

    fn top_totals(&self) -> &[Vec<Value>] {
        &self.top_totals
    }

    fn set_top_totals(&mut self, totals: Vec<Vec<Value>>) {
        self.top_totals = totals;
    }

    fn bottom_totals(&self) -> &[Vec<Value>] {
        &self.bottom_totals
    }

    fn set_bottom_totals(&mut self, totals: Vec<Vec<Value>>) {
        self.bottom_totals = totals;
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}
