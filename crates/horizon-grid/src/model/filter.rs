//! Predicate-based row filtering.
//!
//! Each column may carry an independent predicate over its cell value. A row
//! is part of the filtered view only if it satisfies every column's
//! predicate; a column without a predicate passes every row. The view is
//! always recomputed in full.

use std::sync::Arc;

use serde_json::Value;

use horizon_grid_core::logging::targets;

use super::column::Column;
use super::row::{Row, RowId, RowStore};

/// Type alias for a column predicate.
///
/// Receives the row's value for the column's field (`Value::Null` when the
/// row lacks the field or the column has no field). Returns `true` to keep
/// the row.
pub type FilterFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

static NULL: Value = Value::Null;

/// Returns `true` if `row` satisfies the predicates of all `columns`.
pub fn row_passes(row: &Row, columns: &[Column]) -> bool {
    columns.iter().all(|column| match column.complex_filter() {
        Some(filter) => {
            let value = column
                .field()
                .and_then(|field| row.get(field))
                .unwrap_or(&NULL);
            filter(value)
        }
        None => true,
    })
}

/// Computes the filtered view: the ids of every row passing all predicates,
/// in store order.
pub fn filter_rows(store: &RowStore, columns: &[Column]) -> Vec<RowId> {
    let active = columns.iter().filter(|c| c.complex_filter().is_some()).count();
    if active == 0 {
        return store.ids().to_vec();
    }

    let view: Vec<RowId> = store
        .iter()
        .filter(|(_, row)| row_passes(row, columns))
        .map(|(id, _)| id)
        .collect();

    tracing::debug!(
        target: targets::FILTER,
        active_filters = active,
        total = store.len(),
        passed = view.len(),
        "filtered rows"
    );
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::rows_from_json;
    use serde_json::json;

    fn store() -> RowStore {
        let mut store = RowStore::new();
        store.set_rows(
            rows_from_json(json!([
                {"id": 1, "v": "a"},
                {"id": 2, "v": "b"},
                {"id": 3, "v": "c"},
                {"id": 4}
            ]))
            .unwrap(),
        );
        store
    }

    fn column(index: usize, field: &str) -> Column {
        let mut column = Column::new(index, Some(field.to_uppercase()));
        column.properties_mut().field = Some(field.to_string());
        column
    }

    fn ids_of(store: &RowStore, view: &[RowId]) -> Vec<Value> {
        view.iter().map(|&id| store.get(id).unwrap()["id"].clone()).collect()
    }

    #[test]
    fn test_no_predicates_keeps_every_row_in_order() {
        let store = store();
        let columns = vec![column(0, "id"), column(1, "v")];

        let view = filter_rows(&store, &columns);
        assert_eq!(view, store.ids());
    }

    #[test]
    fn test_single_predicate() {
        let store = store();
        let mut columns = vec![column(0, "id"), column(1, "v")];
        columns[1].set_complex_filter(|v| v != "b");

        let view = filter_rows(&store, &columns);
        assert_eq!(ids_of(&store, &view), vec![json!(1), json!(3), json!(4)]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let store = store();
        let mut columns = vec![column(0, "id"), column(1, "v")];
        columns[0].set_complex_filter(|v| v.as_i64().is_some_and(|n| n >= 2));
        columns[1].set_complex_filter(|v| !v.is_null());

        let view = filter_rows(&store, &columns);
        assert_eq!(ids_of(&store, &view), vec![json!(2), json!(3)]);
    }

    #[test]
    fn test_missing_field_is_null() {
        let store = store();
        let mut columns = vec![column(0, "v")];
        columns[0].set_complex_filter(Value::is_null);

        let view = filter_rows(&store, &columns);
        assert_eq!(ids_of(&store, &view), vec![json!(4)]);
    }

    #[test]
    fn test_column_without_field_sees_null() {
        let store = store();
        let mut columns = vec![Column::new(0, None)];
        columns[0].set_complex_filter(|v| !v.is_null());

        assert!(filter_rows(&store, &columns).is_empty());
    }
}
