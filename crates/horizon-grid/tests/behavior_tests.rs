//! Tests for filtering, selection reconciliation and column management
//! through the public behavior API.

use horizon_grid::host::{GridHost, HeadlessHost};
use horizon_grid::model::{ColumnRef, DataProjection};
use horizon_grid::{DeferredTask, GridConfig, JsonBehavior, SelectionRect, SelectionStore};
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn abc(header_rows: usize) -> JsonBehavior<HeadlessHost> {
    init_tracing();
    let mut behavior = JsonBehavior::new(HeadlessHost::new(header_rows));
    behavior
        .set_data_value(json!([
            {"id": 1, "v": "a"},
            {"id": 2, "v": "b"},
            {"id": 3, "v": "c"}
        ]))
        .unwrap();
    behavior
}

fn ids(behavior: &JsonBehavior<HeadlessHost>) -> Vec<Value> {
    (0..behavior.row_count())
        .map(|y| behavior.model().value(0, y).clone())
        .collect()
}

#[test]
fn test_filtering_out_selected_row_clears_selection() {
    let mut behavior = abc(0);
    behavior.host_mut().selection_mut().select_row(1);

    behavior.set_column_filter(1, |v| *v != "b").unwrap();
    let report = behavior.apply_filters();

    assert_eq!(ids(&behavior), vec![json!(1), json!(3)]);
    assert!(behavior.selected_rows().is_empty());
    assert_eq!(report.misses.len(), 1);
    assert!(report.restored.is_empty());
}

#[test]
fn test_surviving_selection_keeps_its_row() {
    let mut behavior = abc(0);
    behavior.host_mut().selection_mut().select_row(0);

    behavior.set_column_filter(1, |v| *v != "b").unwrap();
    let report = behavior.apply_filters();

    assert_eq!(ids(&behavior), vec![json!(1), json!(3)]);
    assert!(report.is_complete());
    assert_eq!(behavior.selected_rows(), vec![0]);
    assert_eq!(behavior.get_row_selection()["v"], json!(["a"]));
}

#[test]
fn test_selection_moves_when_rows_reappear() {
    let mut behavior = abc(1);

    // Hide 'a' and select 'c' at its filtered position.
    behavior.set_column_filter(1, |v| *v != "a").unwrap();
    behavior.apply_filters();
    behavior.host_mut().selection_mut().select_row(2);
    assert_eq!(behavior.get_row_selection()["v"], json!(["c"]));

    // Showing 'a' again pushes 'c' down one row.
    behavior.clear_column_filter(1).unwrap();
    let report = behavior.apply_filters();
    assert_eq!(report.restored, vec![3]);
    assert_eq!(behavior.get_row_selection()["v"], json!(["c"]));
}

#[test]
fn test_selection_follows_identity_not_value() {
    init_tracing();
    let mut behavior = JsonBehavior::new(HeadlessHost::new(0));
    behavior
        .set_data_value(json!([
            {"k": "x", "n": 1},
            {"k": "x", "n": 1},
            {"k": "y", "n": 2},
            {"k": "x", "n": 1}
        ]))
        .unwrap();

    // The last of three identical rows.
    behavior.host_mut().selection_mut().select_row(3);
    behavior.set_column_filter(0, |v| *v == "x").unwrap();
    let report = behavior.apply_filters();

    assert_eq!(behavior.row_count(), 3);
    assert_eq!(report.restored, vec![2]);
    assert_eq!(behavior.selected_rows(), vec![2]);
}

#[test]
fn test_reconciled_selection_is_surviving_subset() {
    init_tracing();
    let rows: Vec<Value> = (0..20).map(|i| json!({"n": i, "odd": i % 2 == 1})).collect();

    for threshold in [0, 5, 10, 19, 25] {
        let mut behavior = JsonBehavior::new(HeadlessHost::new(1));
        behavior.set_data_value(Value::Array(rows.clone())).unwrap();

        let selected = [0usize, 3, 7, 8, 12, 19];
        for &row in &selected {
            behavior.host_mut().selection_mut().select_row(row + 1);
        }

        behavior
            .set_column_filter(0, move |v| v.as_i64().is_some_and(|n| n >= threshold))
            .unwrap();
        behavior.set_column_filter(1, |v| *v == Value::Bool(false)).unwrap();
        behavior.apply_filters();

        let mut expected: Vec<Value> = selected
            .iter()
            .map(|&n| n as i64)
            .filter(|&n| n >= threshold && n % 2 == 0)
            .map(|n| json!(n))
            .collect();
        expected.sort_by_key(|v| v.as_i64());

        let actual = behavior.get_row_selection()["n"].clone();
        assert_eq!(actual, Value::Array(expected), "threshold {threshold}");
    }
}

#[test]
fn test_set_fields_rebuilds_columns_from_scratch() {
    let mut behavior = abc(0);

    behavior.set_fields(vec!["v".into()]);
    assert_eq!(behavior.column_count(), 1);
    behavior.set_column_filter(0, |v| *v == "a").unwrap();
    behavior.column_mut(0).unwrap().properties_mut().extra.insert("width".into(), json!(80));

    behavior.set_fields(vec!["id".into(), "v".into()]);
    assert_eq!(behavior.column_count(), 2);
    for (index, column) in behavior.all_columns().iter().enumerate() {
        assert_eq!(column.field(), Some(behavior.fields()[index].as_str()));
        assert_eq!(column.header(), Some(behavior.headers()[index].as_str()));
        assert!(column.complex_filter().is_none());
        assert!(column.properties().extra.is_empty());
    }
}

#[test]
fn test_short_headers_yield_missing_headers() {
    let mut behavior = abc(0);
    behavior.set_headers(vec!["Identifier".into()]);
    behavior.set_fields(vec!["id".into(), "v".into()]);

    assert_eq!(behavior.all_columns()[0].header(), Some("Identifier"));
    assert_eq!(behavior.all_columns()[1].header(), None);
    assert!(behavior.last_mismatch().is_some());
}

#[test]
fn test_no_op_filtering_is_idempotent() {
    let mut behavior = abc(1);
    {
        let selection = behavior.host_mut().selection_model_mut();
        selection.select_row(2);
        selection.select_row(3);
        selection.select_column(0);
        selection.select_rect(SelectionRect::new(0, 1, 1, 2));
    }
    let rows_before = behavior.host().selection().selected_rows();
    let ranges_before = behavior.host().selection().selections();

    behavior.apply_filters();
    behavior.apply_filters();

    assert_eq!(behavior.model().filtered_rows(), behavior.model().store().ids());
    assert_eq!(behavior.host().selection().selected_rows(), rows_before);
    assert_eq!(behavior.host().selection().selected_columns(), vec![0]);
    assert_eq!(behavior.host().selection().selections(), ranges_before);
}

#[test]
fn test_row_selection_matrix_dimensions() {
    let mut behavior = abc(0);
    for rows in [vec![0], vec![1, 2], vec![2, 0, 1]] {
        let matrix = behavior.model().row_selection_matrix(&rows);
        assert_eq!(matrix.len(), rows.len());
        assert!(matrix.iter().all(|row| row.len() == behavior.column_count()));
    }

    behavior.set_fields(vec!["v".into()]);
    let matrix = behavior.model().row_selection_matrix(&[0, 1]);
    assert!(matrix.iter().all(|row| row.len() == 1));
}

#[test]
fn test_second_set_data_supersedes_pending_tasks() {
    let mut behavior = abc(0);
    behavior
        .set_data_value(json!([{"only": true}, {"only": false}]))
        .unwrap();

    let pending: Vec<_> = behavior.pending_tasks().copied().collect();
    assert_eq!(
        pending,
        vec![DeferredTask::CheckColumnAutosizing { force: true }, DeferredTask::Changed]
    );

    assert_eq!(behavior.process_deferred(), 2);
    assert_eq!(behavior.host().autosize_checks(), [true]);
    assert_eq!(behavior.host().changed_count(), 1);
    assert_eq!(behavior.column_count(), 1);

    // Nothing left to run.
    assert_eq!(behavior.process_deferred(), 0);
}

#[test]
fn test_stale_row_ids_do_not_resolve() {
    let mut behavior = abc(0);
    let old = behavior.model().filtered_rows()[0];
    behavior.set_data_value(json!([{"id": 9, "v": "z"}])).unwrap();

    assert!(behavior.model().row(old).is_none());
    assert!(!behavior.model().store().contains(old));
}

#[test]
fn test_column_picker_round_trip() {
    let mut behavior = abc(0);

    let lists = behavior.column_lists();
    assert!(lists.hidden.is_empty());
    assert_eq!(lists.available_groups.len(), 2);

    // Hide 'id' and show 'v' only.
    let mut edited = lists.clone();
    let id = edited.visible.remove(0);
    edited.hidden.push(id);
    behavior.set_column_descriptors(&edited);

    assert_eq!(behavior.column_order(), [ColumnRef::Data(1)]);
    let hidden: Vec<_> = behavior.hidden_columns().into_iter().map(|d| d.id).collect();
    assert_eq!(hidden, vec![0]);

    // Group on 'v'; the hierarchy column pins to position 0.
    let mut edited = behavior.column_lists();
    edited.group = vec![edited.available_groups.remove(1)];
    behavior.set_column_descriptors(&edited);

    assert_eq!(behavior.column_order(), [ColumnRef::Tree, ColumnRef::Data(1)]);
    let visible: Vec<_> = behavior.visible_columns().into_iter().map(|d| d.id).collect();
    assert_eq!(visible, vec![1]);
    assert_eq!(behavior.groups().len(), 1);
    assert_eq!(behavior.available_groups().len(), 1);

    // Reorder with 'id' visible again; the hierarchy column stays first.
    let mut edited = behavior.column_lists();
    let id = edited.hidden.remove(0);
    edited.visible.insert(0, id);
    behavior.set_column_descriptors(&edited);
    assert_eq!(
        behavior.column_order(),
        [ColumnRef::Tree, ColumnRef::Data(0), ColumnRef::Data(1)]
    );
    assert_eq!(behavior.host().changed_count(), 3);
}

#[test]
fn test_configured_tree_label_from_toml() {
    init_tracing();
    let config = GridConfig::from_toml_str(r#"tree_column_label = "Hierarchy""#).unwrap();
    let mut behavior = JsonBehavior::with_config(HeadlessHost::new(0), config);
    behavior.set_data_value(json!([{"a": 1, "b": 2}])).unwrap();

    let mut lists = behavior.column_lists();
    lists.group = vec![lists.available_groups.remove(0)];
    behavior.set_column_descriptors(&lists);

    assert_eq!(behavior.column(0).unwrap().label(), Some("Hierarchy"));
}

#[test]
fn test_hidden_prefix_keys_are_not_fields() {
    init_tracing();
    let config = GridConfig::default().with_hidden_field_prefix("_");
    let mut behavior = JsonBehavior::with_config(HeadlessHost::new(0), config);
    behavior
        .set_data_json(r#"[{"_rev": 3, "unitPrice": 9.5, "qty": 2}]"#)
        .unwrap();

    assert_eq!(behavior.fields(), ["unitPrice", "qty"]);
    assert_eq!(behavior.headers(), ["Unit Price", "Qty"]);
}
