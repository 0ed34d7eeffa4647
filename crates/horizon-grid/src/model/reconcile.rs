//! Identity-based reconciliation of row selection across filter passes.
//!
//! Filtering may remove and reorder rows, so the grid rows a user selected
//! before a filter pass do not address the same records afterwards. Before
//! filtering, the selected grid rows are resolved to the [`RowId`]s they
//! display (the *selection anchor*). After filtering, the row selection is
//! cleared and every anchored row still present in the new view is selected
//! again at its new position. Rows that were filtered out are dropped.
//!
//! Column and range selections are left untouched.

use horizon_grid_core::logging::targets;

use super::row::RowId;
use super::selection::SelectionStore;

/// A previously selected row that is absent from the filtered view.
///
/// Expected whenever a filter hides a selected row; the selection for that
/// row is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationMiss {
    /// The row that was filtered out.
    pub row: RowId,
}

/// Outcome of restoring a selection anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Grid rows selected after reconciliation, in anchor order.
    pub restored: Vec<usize>,
    /// Anchored rows no longer in the view.
    pub misses: Vec<ReconciliationMiss>,
}

impl ReconcileReport {
    /// Returns `true` if every anchored row survived.
    pub fn is_complete(&self) -> bool {
        self.misses.is_empty()
    }
}

/// The row identities behind a row selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionAnchor {
    rows: Vec<RowId>,
}

impl SelectionAnchor {
    /// Resolves the store's selected grid rows against `view`.
    ///
    /// `header_rows` is the number of non-data rows above the first data
    /// row. Selected header rows and rows past the end of the view anchor
    /// nothing. Returns `None` when no rows are selected.
    pub fn capture<S>(selection: &S, view: &[RowId], header_rows: usize) -> Option<Self>
    where
        S: SelectionStore + ?Sized,
    {
        if !selection.has_row_selections() {
            return None;
        }

        let rows = selection
            .selected_rows()
            .into_iter()
            .filter_map(|grid_row| grid_row.checked_sub(header_rows))
            .filter_map(|data_row| view.get(data_row).copied())
            .collect();
        Some(Self { rows })
    }

    /// The anchored row ids.
    pub fn rows(&self) -> &[RowId] {
        &self.rows
    }

    /// Replaces the store's row selection with the anchored rows found in
    /// `view`.
    pub fn restore<S>(&self, selection: &mut S, view: &[RowId], header_rows: usize) -> ReconcileReport
    where
        S: SelectionStore + ?Sized,
    {
        selection.clear_row_selection();

        let mut report = ReconcileReport::default();
        for &row in &self.rows {
            match view.iter().position(|&id| id == row) {
                Some(index) => {
                    let grid_row = header_rows + index;
                    tracing::trace!(target: targets::SELECTION, grid_row, "selection restored");
                    selection.select_row(grid_row);
                    report.restored.push(grid_row);
                }
                None => {
                    tracing::debug!(target: targets::SELECTION, ?row, "selected row filtered out");
                    report.misses.push(ReconciliationMiss { row });
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::{RowStore, rows_from_json};
    use crate::model::selection::SelectionModel;
    use serde_json::json;

    fn store(n: usize) -> RowStore {
        let rows = (0..n).map(|i| json!({ "id": i })).collect::<Vec<_>>();
        let mut store = RowStore::new();
        store.set_rows(rows_from_json(json!(rows)).unwrap());
        store
    }

    #[test]
    fn test_empty_selection_captures_nothing() {
        let store = store(3);
        let selection = SelectionModel::new();
        assert!(SelectionAnchor::capture(&selection, store.ids(), 1).is_none());
    }

    #[test]
    fn test_capture_translates_header_offset() {
        let store = store(3);
        let mut selection = SelectionModel::new();
        selection.select_row(0); // header row
        selection.select_row(2);
        selection.select_row(9); // past the end

        let anchor = SelectionAnchor::capture(&selection, store.ids(), 1).unwrap();
        assert_eq!(anchor.rows(), &[store.ids()[1]]);
    }

    #[test]
    fn test_restore_follows_reordering() {
        let store = store(4);
        let ids = store.ids().to_vec();
        let mut selection = SelectionModel::new();
        selection.select_row(1);
        selection.select_row(3);

        let anchor = SelectionAnchor::capture(&selection, &ids, 0).unwrap();
        let reordered = vec![ids[3], ids[2], ids[1]];
        let report = anchor.restore(&mut selection, &reordered, 0);

        assert_eq!(report.restored, vec![2, 0]);
        assert!(report.is_complete());
        assert_eq!(selection.selected_rows(), vec![0, 2]);
    }

    #[test]
    fn test_restore_drops_filtered_rows() {
        let store = store(3);
        let ids = store.ids().to_vec();
        let mut selection = SelectionModel::new();
        selection.select_row(2);
        selection.select_row(3);

        let anchor = SelectionAnchor::capture(&selection, &ids, 1).unwrap();
        let view = vec![ids[0], ids[2]];
        let report = anchor.restore(&mut selection, &view, 1);

        assert_eq!(report.misses, vec![ReconciliationMiss { row: ids[1] }]);
        assert_eq!(report.restored, vec![2]);
        assert_eq!(selection.selected_rows(), vec![2]);
    }
}
