//! The host-facing grid behavior.
//!
//! [`Behavior`] binds a [`DataProjection`] to a [`GridHost`]. It owns the
//! derived columns, runs filter passes with identity-based selection
//! reconciliation, projects the host's selection into values and schedules
//! the deferred side effects of loading data.
//!
//! # Example
//!
//! ```
//! use horizon_grid::JsonBehavior;
//! use horizon_grid::host::{GridHost, HeadlessHost};
//! use serde_json::json;
//!
//! let mut behavior = JsonBehavior::new(HeadlessHost::new(1));
//! behavior.set_data_json(r#"[
//!     {"id": 1, "v": "a"},
//!     {"id": 2, "v": "b"},
//!     {"id": 3, "v": "c"}
//! ]"#).unwrap();
//!
//! // Select the 'a' row. Grid row 0 is the header row.
//! behavior.host_mut().selection_mut().select_row(1);
//!
//! behavior.set_column_filter(1, |v| *v != "b").unwrap();
//! let report = behavior.apply_filters();
//!
//! assert!(report.is_complete());
//! assert_eq!(behavior.selected_rows(), vec![0]);
//! assert_eq!(behavior.get_row_selection()["v"], json!(["a"]));
//! ```

use serde_json::Value;

use horizon_grid_core::logging::{span_names, targets};
use horizon_grid_core::{PerfSpan, Signal, TaskId, TaskQueue};

use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::host::{DeferredTask, GridHost};
use crate::model::{
    Column, ColumnAlignment, ColumnDefinition, ColumnDescriptor, ColumnLists, ColumnRef,
    ConfigurationMismatch, DataProjection, FieldValues, JsonDataModel, Matrix, ReconcileReport,
    Row, SelectionAnchor, SelectionRect, derive_columns, group_ids, hidden_columns,
    rebuild_live_columns, rows_from_json, rows_from_json_str, visible_columns,
};

/// A grid behavior over data projection `M`.
///
/// # Signals
///
/// - `columns_rebuilt`: emitted after every column rebuild. Args: data column count
/// - `filters_applied`: emitted after every filter pass. Args: the reconciliation report
pub struct Behavior<H, M = JsonDataModel> {
    host: H,
    model: M,
    config: GridConfig,
    /// Data columns, one per field.
    all_columns: Vec<Column>,
    tree_column: Column,
    /// Live (visible) column order.
    columns: Vec<ColumnRef>,
    tasks: TaskQueue<DeferredTask>,
    pending_refresh: Vec<TaskId>,
    last_mismatch: Option<ConfigurationMismatch>,

    /// Emitted after every column rebuild.
    pub columns_rebuilt: Signal<usize>,

    /// Emitted after every filter pass.
    pub filters_applied: Signal<ReconcileReport>,
}

/// A behavior over JSON rows.
pub type JsonBehavior<H> = Behavior<H, JsonDataModel>;

impl<H: GridHost> Behavior<H, JsonDataModel> {
    /// Creates a behavior over an empty JSON model.
    pub fn new(host: H) -> Self {
        Self::with_config(host, GridConfig::default())
    }

    /// Creates a behavior over an empty JSON model configured by `config`.
    pub fn with_config(host: H, config: GridConfig) -> Self {
        let model = JsonDataModel::with_config(&config);
        Self::with_model(host, model, config)
    }
}

impl<H: GridHost, M: DataProjection> Behavior<H, M> {
    /// Creates a behavior over an existing projection.
    pub fn with_model(host: H, model: M, config: GridConfig) -> Self {
        let tree_column = Column::tree(config.tree_column_label.clone());
        let mut behavior = Self {
            host,
            model,
            config,
            all_columns: Vec::new(),
            tree_column,
            columns: Vec::new(),
            tasks: TaskQueue::new(),
            pending_refresh: Vec::new(),
            last_mismatch: None,
            columns_rebuilt: Signal::new(),
            filters_applied: Signal::new(),
        };
        behavior.create_columns();
        behavior
    }

    /// The host grid.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host grid.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The data projection.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the data projection.
    ///
    /// Changes made here do not rebuild columns; call
    /// [`create_columns`](Self::create_columns) afterwards if fields or
    /// headers were touched.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// The active configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    // =========================================================================
    // Data and column configuration
    // =========================================================================

    /// Replaces all rows, rebuilds the columns and schedules an auto-size
    /// pass and a change notification.
    ///
    /// Field and header configuration survives the reload.
    #[tracing::instrument(skip_all, target = "horizon_grid::behavior", level = "debug", fields(rows = rows.len()))]
    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.model.set_data(rows);
        self.create_columns();
        self.schedule_refresh();
    }

    /// Parses a JSON array of objects and loads it with [`set_data`](Self::set_data).
    pub fn set_data_json(&mut self, source: &str) -> Result<()> {
        let rows = rows_from_json_str(source)?;
        self.set_data(rows);
        Ok(())
    }

    /// Loads an already parsed JSON array of objects.
    pub fn set_data_value(&mut self, value: Value) -> Result<()> {
        let rows = rows_from_json(value)?;
        self.set_data(rows);
        Ok(())
    }

    /// The field each data column projects.
    pub fn fields(&self) -> &[String] {
        self.model.fields()
    }

    /// Replaces the field list and rebuilds the columns.
    pub fn set_fields(&mut self, fields: Vec<String>) {
        self.model.set_fields(fields);
        self.create_columns();
    }

    /// The display header of each data column.
    pub fn headers(&self) -> &[String] {
        self.model.headers()
    }

    /// Replaces the display headers.
    ///
    /// Columns are not rebuilt; the new labels apply at the next rebuild.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.model.set_headers(headers);
    }

    /// Sets headers and fields from column definitions and rebuilds the
    /// columns.
    pub fn set_columns(&mut self, definitions: &[ColumnDefinition]) {
        self.model.set_columns(definitions);
        self.create_columns();
    }

    /// Discards every column and derives new ones from the projection.
    ///
    /// Property bags, including filters, do not survive. The live order
    /// becomes the hierarchy column (while groups are active) followed by
    /// every data column.
    #[tracing::instrument(skip_all, target = "horizon_grid::behavior", level = "debug")]
    pub fn create_columns(&mut self) {
        let _perf = PerfSpan::new(span_names::CREATE_COLUMNS);
        let column_count = self.model.column_count();
        let derived = derive_columns(column_count, self.model.headers(), self.model.fields());

        tracing::debug!(
            target: targets::COLUMNS,
            column_count,
            header_count = self.model.headers().len(),
            field_count = self.model.fields().len(),
            "columns rebuilt"
        );
        if let Some(mismatch) = derived.mismatch
            && self.config.report_configuration_mismatch
        {
            tracing::warn!(target: targets::COLUMNS, %mismatch, "column configuration mismatch");
        }

        self.all_columns = derived.columns;
        self.last_mismatch = derived.mismatch;
        self.tree_column = Column::tree(self.config.tree_column_label.clone());

        self.columns.clear();
        if self.model.has_hierarchy_column() {
            self.columns.push(ColumnRef::Tree);
        }
        self.columns.extend((0..self.all_columns.len()).map(ColumnRef::Data));

        self.columns_rebuilt.emit(self.all_columns.len());
    }

    /// The mismatch found by the latest column rebuild, if any.
    pub fn last_mismatch(&self) -> Option<ConfigurationMismatch> {
        self.last_mismatch
    }

    /// Number of data columns.
    pub fn column_count(&self) -> usize {
        self.all_columns.len()
    }

    /// Data columns in field order.
    pub fn all_columns(&self) -> &[Column] {
        &self.all_columns
    }

    /// The live (visible) column order.
    pub fn column_order(&self) -> &[ColumnRef] {
        &self.columns
    }

    /// Live columns in display order.
    pub fn columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter_map(|&column| self.resolve(column))
            .collect()
    }

    /// The live column at display position `x`.
    pub fn column(&self, x: usize) -> Option<&Column> {
        self.columns.get(x).and_then(|&column| self.resolve(column))
    }

    /// Mutable access to the live column at display position `x`.
    pub fn column_mut(&mut self, x: usize) -> Option<&mut Column> {
        match self.columns.get(x).copied()? {
            ColumnRef::Tree => Some(&mut self.tree_column),
            ColumnRef::Data(index) => self.all_columns.get_mut(index),
        }
    }

    fn resolve(&self, column: ColumnRef) -> Option<&Column> {
        match column {
            ColumnRef::Tree => Some(&self.tree_column),
            ColumnRef::Data(index) => self.all_columns.get(index),
        }
    }

    /// Alignment of the live column at display position `x`.
    pub fn column_alignment(&self, x: usize) -> ColumnAlignment {
        if x == 0 && self.has_hierarchy_column() {
            return ColumnAlignment::Left;
        }
        self.column(x)
            .and_then(|column| column.properties().alignment)
            .unwrap_or_default()
    }

    /// Returns `true` if groups are active.
    pub fn has_hierarchy_column(&self) -> bool {
        self.model.has_hierarchy_column()
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Attaches a predicate to data column `index`. Applied by the next
    /// [`apply_filters`](Self::apply_filters).
    pub fn set_column_filter<F>(&mut self, index: usize, filter: F) -> Result<()>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let count = self.all_columns.len();
        let column = self
            .all_columns
            .get_mut(index)
            .ok_or_else(|| Error::column_out_of_range(index, count))?;
        column.set_complex_filter(filter);
        Ok(())
    }

    /// Removes the predicate of data column `index`.
    pub fn clear_column_filter(&mut self, index: usize) -> Result<()> {
        let count = self.all_columns.len();
        let column = self
            .all_columns
            .get_mut(index)
            .ok_or_else(|| Error::column_out_of_range(index, count))?;
        column.clear_complex_filter();
        Ok(())
    }

    /// Removes every column predicate.
    pub fn clear_column_filters(&mut self) {
        self.all_columns.iter_mut().for_each(Column::clear_complex_filter);
    }

    /// Recomputes the filtered view and reconciles the row selection.
    ///
    /// Selected rows that pass the filters stay selected at their new grid
    /// rows; the others are deselected and reported as misses. Column and
    /// range selections are untouched. Without a row selection the
    /// selection is not touched at all.
    #[tracing::instrument(skip_all, target = "horizon_grid::behavior", level = "debug")]
    pub fn apply_filters(&mut self) -> ReconcileReport {
        let _perf = PerfSpan::new(span_names::APPLY_FILTERS);
        let header_rows = self.host.header_row_count();

        let anchor =
            SelectionAnchor::capture(self.host.selection(), self.model.filtered_rows(), header_rows);
        self.model.apply_filters(&self.all_columns);

        let report = match anchor {
            Some(anchor) => {
                anchor.restore(self.host.selection_mut(), self.model.filtered_rows(), header_rows)
            }
            None => ReconcileReport::default(),
        };

        tracing::debug!(
            target: targets::BEHAVIOR,
            rows = self.model.row_count(),
            restored = report.restored.len(),
            dropped = report.misses.len(),
            "filters applied"
        );
        self.filters_applied.emit(report.clone());
        report
    }

    /// Number of rows in the filtered view.
    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    /// The filtered row displayed at grid row `grid_y`.
    pub fn row_at(&self, grid_y: usize) -> Option<&Row> {
        let y = grid_y.checked_sub(self.host.header_row_count())?;
        self.model.filtered_row(y)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Summary rows displayed above the data.
    pub fn top_totals(&self) -> &[Vec<Value>] {
        self.model.top_totals()
    }

    /// Replaces the summary rows displayed above the data.
    pub fn set_top_totals(&mut self, totals: Vec<Vec<Value>>) {
        self.model.set_top_totals(totals);
    }

    /// Summary rows displayed below the data.
    pub fn bottom_totals(&self) -> &[Vec<Value>] {
        self.model.bottom_totals()
    }

    /// Replaces the summary rows displayed below the data.
    pub fn set_bottom_totals(&mut self, totals: Vec<Vec<Value>>) {
        self.model.set_bottom_totals(totals);
    }

    // =========================================================================
    // Selection projections
    // =========================================================================

    /// Selected rows as filtered-view indices. Selected header rows are
    /// left out.
    pub fn selected_rows(&self) -> Vec<usize> {
        let offset = self.host.header_row_count();
        self.host
            .selection()
            .selected_rows()
            .into_iter()
            .filter_map(|row| row.checked_sub(offset))
            .collect()
    }

    /// Selected columns.
    pub fn selected_columns(&self) -> Vec<usize> {
        self.host.selection().selected_columns()
    }

    /// Selected cell ranges in filtered-view rows, clipped to the data.
    pub fn selections(&self) -> Vec<SelectionRect> {
        let offset = self.host.header_row_count();
        self.host
            .selection()
            .selections()
            .iter()
            .filter_map(|rect| rect.shifted_up(offset))
            .collect()
    }

    /// Values of the selected rows keyed by field.
    pub fn get_row_selection(&self) -> FieldValues {
        self.model.row_selection(&self.selected_rows())
    }

    /// Values of the selected columns keyed by field.
    pub fn get_column_selection(&self) -> FieldValues {
        self.model.column_selection(&self.selected_columns())
    }

    /// Values of each selected range keyed by field.
    pub fn get_selection(&self) -> Vec<FieldValues> {
        self.model.selection(&self.selections())
    }

    /// Selected rows × data columns.
    pub fn get_row_selection_matrix(&self) -> Matrix {
        self.model.row_selection_matrix(&self.selected_rows())
    }

    /// Selected columns × filtered rows.
    pub fn get_column_selection_matrix(&self) -> Matrix {
        self.model.column_selection_matrix(&self.selected_columns())
    }

    /// One column-major matrix per selected range.
    pub fn get_selection_matrix(&self) -> Vec<Matrix> {
        self.model.selection_matrix(&self.selections())
    }

    // =========================================================================
    // Groups and visibility
    // =========================================================================

    /// Active groups in group order.
    pub fn groups(&self) -> Vec<ColumnDescriptor> {
        self.model.groups()
    }

    /// Columns available for grouping.
    pub fn available_groups(&self) -> Vec<ColumnDescriptor> {
        self.model.available_groups()
    }

    /// Data columns missing from the live order, sorted by label.
    pub fn hidden_columns(&self) -> Vec<ColumnDescriptor> {
        hidden_columns(&self.all_columns, &self.columns)
    }

    /// Visible data columns in display order.
    pub fn visible_columns(&self) -> Vec<ColumnDescriptor> {
        visible_columns(&self.all_columns, &self.columns)
    }

    /// All four picker lists.
    pub fn column_lists(&self) -> ColumnLists {
        ColumnLists {
            group: self.groups(),
            available_groups: self.available_groups(),
            hidden: self.hidden_columns(),
            visible: self.visible_columns(),
        }
    }

    /// Applies edited picker lists: the visible list becomes the live order
    /// and the group list becomes the active groups.
    ///
    /// The hierarchy column stays pinned at position 0 while groups are
    /// active and is removed once they are cleared.
    pub fn set_column_descriptors(&mut self, lists: &ColumnLists) {
        self.columns = rebuild_live_columns(&self.columns, &self.all_columns, &lists.visible);
        self.model.set_groups(group_ids(&lists.group));

        let pinned = self.columns.first() == Some(&ColumnRef::Tree);
        match (self.model.has_hierarchy_column(), pinned) {
            (true, false) => self.columns.insert(0, ColumnRef::Tree),
            (false, true) => {
                self.columns.remove(0);
            }
            _ => {}
        }

        tracing::debug!(
            target: targets::GROUPS,
            visible = self.columns.len(),
            groups = self.model.group_bys().len(),
            "column descriptors applied"
        );
        self.host.changed();
    }

    // =========================================================================
    // Deferred side effects
    // =========================================================================

    fn schedule_refresh(&mut self) {
        for id in self.pending_refresh.drain(..) {
            if self.tasks.cancel(id) {
                tracing::debug!(target: targets::BEHAVIOR, task_id = id.as_u64(), "superseded deferred task");
            }
        }

        let autosize = if self.host.is_column_autosizing() {
            DeferredTask::AutosizeAllColumns
        } else {
            DeferredTask::CheckColumnAutosizing { force: true }
        };
        self.pending_refresh.push(self.tasks.post(autosize));
        self.pending_refresh.push(self.tasks.post(DeferredTask::Changed));
    }

    /// Returns `true` if deferred side effects are waiting to run.
    pub fn has_pending_tasks(&self) -> bool {
        self.tasks.has_pending()
    }

    /// Deferred side effects waiting to run, in execution order.
    pub fn pending_tasks(&self) -> impl Iterator<Item = &DeferredTask> + '_ {
        self.tasks.pending()
    }

    /// Runs every pending deferred side effect against the current columns.
    ///
    /// Returns the number of tasks run.
    pub fn process_deferred(&mut self) -> usize {
        let _perf = PerfSpan::new(span_names::DEFERRED);
        let tasks = self.tasks.drain();
        self.pending_refresh.clear();
        for &task in &tasks {
            task.run(&mut self.host, &self.all_columns);
        }
        tasks.len()
    }
}
