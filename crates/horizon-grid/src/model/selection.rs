//! Selection store for grid views.
//!
//! The selection store records selected grid rows, selected columns and
//! rectangular cell ranges. Row indices are grid-relative: they include the
//! header rows above the first data row. Translating them to data rows is
//! the caller's job (see [`crate::model::reconcile`]).
//!
//! Hosts may bring their own store by implementing [`SelectionStore`];
//! [`SelectionModel`] is the in-memory implementation.
//!
//! # Example
//!
//! ```
//! use horizon_grid::model::{SelectionModel, SelectionRect, SelectionStore};
//!
//! let mut selection = SelectionModel::new();
//! selection.select_row(2);
//! selection.select_rect(SelectionRect::new(0, 1, 3, 4));
//!
//! assert_eq!(selection.selected_rows(), vec![2]);
//! assert_eq!(selection.selections().len(), 1);
//! ```

use std::collections::BTreeSet;

use horizon_grid_core::Signal;
use horizon_grid_core::logging::targets;

/// Selection behavior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Nothing can be selected.
    NoSelection,
    /// At most one row, one column and one range at a time.
    SingleSelection,
    /// Any number of rows, columns and ranges (default).
    #[default]
    MultiSelection,
}

/// An inclusive rectangle of grid cells.
///
/// `x` addresses columns and `y` addresses grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRect {
    /// First column.
    pub left: usize,
    /// First grid row.
    pub top: usize,
    /// Last column.
    pub right: usize,
    /// Last grid row.
    pub bottom: usize,
}

impl SelectionRect {
    /// Creates a rectangle from two corners in any order.
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    /// Returns `true` if the cell lies inside the rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    /// Shifts the rectangle up by `offset` rows, clipping rows above zero.
    ///
    /// Returns `None` if the whole rectangle lies above the offset.
    pub fn shifted_up(&self, offset: usize) -> Option<Self> {
        let bottom = self.bottom.checked_sub(offset)?;
        Some(Self {
            left: self.left,
            top: self.top.saturating_sub(offset),
            right: self.right,
            bottom,
        })
    }
}

/// The selection interface the grid core consumes.
///
/// Row indices are grid-relative.
pub trait SelectionStore {
    /// Selected grid rows in ascending order.
    fn selected_rows(&self) -> Vec<usize>;

    /// Selected columns in ascending order.
    fn selected_columns(&self) -> Vec<usize>;

    /// Selected cell ranges in selection order.
    fn selections(&self) -> Vec<SelectionRect>;

    /// Clears the row selection, leaving columns and ranges alone.
    fn clear_row_selection(&mut self);

    /// Adds a grid row to the selection.
    fn select_row(&mut self, row: usize);

    /// Returns `true` if any rows are selected.
    fn has_row_selections(&self) -> bool {
        !self.selected_rows().is_empty()
    }
}

/// What changed in a selection update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChange {
    /// Rows newly selected.
    pub selected_rows: Vec<usize>,
    /// Rows no longer selected.
    pub deselected_rows: Vec<usize>,
}

impl SelectionChange {
    fn is_empty(&self) -> bool {
        self.selected_rows.is_empty() && self.deselected_rows.is_empty()
    }
}

/// In-memory selection store.
///
/// # Signals
///
/// - `selection_changed`: emitted when the row selection changes
pub struct SelectionModel {
    mode: SelectionMode,
    rows: BTreeSet<usize>,
    columns: BTreeSet<usize>,
    ranges: Vec<SelectionRect>,

    /// Emitted when the row selection changes.
    pub selection_changed: Signal<SelectionChange>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// Creates an empty selection model in multi-selection mode.
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::default(),
            rows: BTreeSet::new(),
            columns: BTreeSet::new(),
            ranges: Vec::new(),
            selection_changed: Signal::new(),
        }
    }

    /// Gets the current selection mode.
    pub fn selection_mode(&self) -> SelectionMode {
        self.mode
    }

    /// Sets the selection mode.
    ///
    /// Changing mode does not clear existing selection; subsequent selections
    /// follow the new mode.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Checks if a grid row is selected.
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    /// Checks if a column is selected.
    pub fn is_column_selected(&self, column: usize) -> bool {
        self.columns.contains(&column)
    }

    /// Checks if a cell lies in any selected range.
    pub fn is_cell_selected(&self, x: usize, y: usize) -> bool {
        self.ranges.iter().any(|r| r.contains(x, y))
    }

    /// Returns true if anything at all is selected.
    pub fn has_selection(&self) -> bool {
        !self.rows.is_empty() || !self.columns.is_empty() || !self.ranges.is_empty()
    }

    /// Removes a grid row from the selection.
    pub fn deselect_row(&mut self, row: usize) {
        if self.rows.remove(&row) {
            self.emit(SelectionChange {
                deselected_rows: vec![row],
                ..Default::default()
            });
        }
    }

    /// Toggles a grid row.
    pub fn toggle_row(&mut self, row: usize) {
        if self.is_row_selected(row) {
            self.deselect_row(row);
        } else {
            SelectionStore::select_row(self, row);
        }
    }

    /// Adds a column to the selection.
    pub fn select_column(&mut self, column: usize) {
        match self.mode {
            SelectionMode::NoSelection => return,
            SelectionMode::SingleSelection => self.columns.clear(),
            SelectionMode::MultiSelection => {}
        }
        self.columns.insert(column);
    }

    /// Removes a column from the selection.
    pub fn deselect_column(&mut self, column: usize) {
        self.columns.remove(&column);
    }

    /// Clears the column selection.
    pub fn clear_column_selection(&mut self) {
        self.columns.clear();
    }

    /// Adds a cell range to the selection.
    pub fn select_rect(&mut self, rect: SelectionRect) {
        match self.mode {
            SelectionMode::NoSelection => return,
            SelectionMode::SingleSelection => self.ranges.clear(),
            SelectionMode::MultiSelection => {}
        }
        if !self.ranges.contains(&rect) {
            self.ranges.push(rect);
        }
    }

    /// Clears every selected range.
    pub fn clear_range_selection(&mut self) {
        self.ranges.clear();
    }

    /// Clears rows, columns and ranges.
    pub fn clear(&mut self) {
        self.clear_row_selection();
        self.columns.clear();
        self.ranges.clear();
    }

    fn emit(&self, change: SelectionChange) {
        if !change.is_empty() {
            tracing::trace!(
                target: targets::SELECTION,
                selected = change.selected_rows.len(),
                deselected = change.deselected_rows.len(),
                "row selection changed"
            );
            self.selection_changed.emit(change);
        }
    }
}

impl SelectionStore for SelectionModel {
    fn selected_rows(&self) -> Vec<usize> {
        self.rows.iter().copied().collect()
    }

    fn selected_columns(&self) -> Vec<usize> {
        self.columns.iter().copied().collect()
    }

    fn selections(&self) -> Vec<SelectionRect> {
        self.ranges.clone()
    }

    fn clear_row_selection(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let deselected = std::mem::take(&mut self.rows).into_iter().collect();
        self.emit(SelectionChange {
            deselected_rows: deselected,
            ..Default::default()
        });
    }

    fn select_row(&mut self, row: usize) {
        let mut change = SelectionChange::default();
        match self.mode {
            SelectionMode::NoSelection => return,
            SelectionMode::SingleSelection => {
                change.deselected_rows = self.rows.iter().copied().filter(|&r| r != row).collect();
                self.rows.retain(|&r| r == row);
            }
            SelectionMode::MultiSelection => {}
        }
        if self.rows.insert(row) {
            change.selected_rows.push(row);
        }
        self.emit(change);
    }

    fn has_row_selections(&self) -> bool {
        !self.rows.is_empty()
    }
}
