//! The grid host seam.
//!
//! A behavior never draws or measures anything itself. Everything that
//! belongs to the surrounding grid (header rows, the selection model,
//! column auto-sizing, repaint requests) is reached through [`GridHost`].
//! [`HeadlessHost`] implements it without any UI and records the side
//! effects it is asked to perform.

use horizon_grid_core::logging::targets;

use crate::model::{Column, SelectionModel, SelectionStore};

/// Trait for the grid a behavior is attached to.
pub trait GridHost {
    /// Number of non-data rows above the first data row.
    fn header_row_count(&self) -> usize;

    /// The grid's selection state.
    fn selection(&self) -> &dyn SelectionStore;

    /// Mutable access to the grid's selection state.
    fn selection_mut(&mut self) -> &mut dyn SelectionStore;

    /// Returns `true` if the grid sizes every column to its content.
    fn is_column_autosizing(&self) -> bool;

    /// Sizes every column to its content.
    fn autosize_all_columns(&mut self, columns: &[Column]);

    /// Re-checks which columns need sizing. `force` re-measures columns
    /// that were already sized.
    fn check_column_autosizing(&mut self, force: bool);

    /// Requests a repaint after the model changed.
    fn changed(&mut self);
}

/// A side effect scheduled to run after the current call completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Size every column to its content.
    AutosizeAllColumns,
    /// Re-check column sizing.
    CheckColumnAutosizing {
        /// Re-measure already sized columns.
        force: bool,
    },
    /// Notify the host that the model changed.
    Changed,
}

impl DeferredTask {
    /// Performs the task against `host`.
    pub fn run<H>(self, host: &mut H, columns: &[Column])
    where
        H: GridHost + ?Sized,
    {
        tracing::trace!(target: targets::BEHAVIOR, task = ?self, "running deferred task");
        match self {
            DeferredTask::AutosizeAllColumns => host.autosize_all_columns(columns),
            DeferredTask::CheckColumnAutosizing { force } => host.check_column_autosizing(force),
            DeferredTask::Changed => host.changed(),
        }
    }
}

/// A [`GridHost`] without a UI.
///
/// Owns a [`SelectionModel`] and counts the side effects a behavior
/// requests, which makes it suitable for batch use and tests.
///
/// # Example
///
/// ```
/// use horizon_grid::host::{GridHost, HeadlessHost};
///
/// let mut host = HeadlessHost::new(1);
/// host.selection_mut().select_row(3);
/// host.changed();
///
/// assert_eq!(host.selection().selected_rows(), vec![3]);
/// assert_eq!(host.changed_count(), 1);
/// ```
#[derive(Default)]
pub struct HeadlessHost {
    selection: SelectionModel,
    header_rows: usize,
    column_autosizing: bool,
    autosized: Vec<usize>,
    autosize_checks: Vec<bool>,
    changed: usize,
}

impl HeadlessHost {
    /// Creates a host with `header_rows` rows above the data.
    pub fn new(header_rows: usize) -> Self {
        Self {
            header_rows,
            ..Self::default()
        }
    }

    /// Enables or disables whole-grid column auto-sizing.
    pub fn with_column_autosizing(mut self, enabled: bool) -> Self {
        self.column_autosizing = enabled;
        self
    }

    /// Sets the number of header rows.
    pub fn set_header_row_count(&mut self, rows: usize) {
        self.header_rows = rows;
    }

    /// The owned selection model.
    pub fn selection_model(&self) -> &SelectionModel {
        &self.selection
    }

    /// Mutable access to the owned selection model.
    pub fn selection_model_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    /// Column counts passed to each whole-grid auto-size, oldest first.
    pub fn autosized(&self) -> &[usize] {
        &self.autosized
    }

    /// `force` flags passed to each sizing check, oldest first.
    pub fn autosize_checks(&self) -> &[bool] {
        &self.autosize_checks
    }

    /// Number of repaint requests received.
    pub fn changed_count(&self) -> usize {
        self.changed
    }
}

impl GridHost for HeadlessHost {
    fn header_row_count(&self) -> usize {
        self.header_rows
    }

    fn selection(&self) -> &dyn SelectionStore {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut dyn SelectionStore {
        &mut self.selection
    }

    fn is_column_autosizing(&self) -> bool {
        self.column_autosizing
    }

    fn autosize_all_columns(&mut self, columns: &[Column]) {
        self.autosized.push(columns.len());
    }

    fn check_column_autosizing(&mut self, force: bool) {
        self.autosize_checks.push(force);
    }

    fn changed(&mut self) {
        self.changed += 1;
    }
}
