//! Data binding for the grid.
//!
//! This module turns a list of JSON object rows into the columns, filtered
//! view and selection projections a grid displays:
//!
//! - Rows get a stable identity when they are ingested
//! - Columns are derived from the field list, one per field
//! - Per-column predicates narrow the rows into a filtered view
//! - Row selection follows row identity across filter passes
//! - Selection state is projected into value matrices
//!
//! # Core Types
//!
//! - `RowStore` / `RowId`: Rows and their identities
//! - `Column`: A derived column with its property bag
//! - `DataProjection`: The trait a row source implements
//! - `JsonDataModel`: The `DataProjection` over JSON rows
//! - `SelectionModel`: Row, column and range selection
//! - `SelectionAnchor`: Row identities captured across a filter pass
//!
//! # Example
//!
//! ```
//! use horizon_grid::model::{DataProjection, JsonDataModel, derive_columns, rows_from_json};
//! use serde_json::json;
//!
//! let mut model = JsonDataModel::new();
//! model.set_data(rows_from_json(json!([
//!     {"id": 1, "v": "a"},
//!     {"id": 2, "v": "b"},
//! ])).unwrap());
//!
//! let mut columns = derive_columns(model.column_count(), model.headers(), model.fields()).columns;
//! columns[1].set_complex_filter(|v| *v != "b");
//! model.apply_filters(&columns);
//!
//! assert_eq!(model.row_count(), 1);
//! assert_eq!(model.row_selection_matrix(&[0]), vec![vec![json!(1), json!("a")]]);
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  RowStore   │────>│ FilterEngine │────>│ filtered ids │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!       │                    ^                     │
//!       │             ┌──────────────┐             v
//!       └────────────>│   Columns    │     ┌──────────────┐
//!                     └──────────────┘     │   Matrices   │
//!                                          └──────────────┘
//! ```

mod column;
mod filter;
mod groups;
pub mod matrix;
mod projection;
mod reconcile;
mod row;
mod selection;
mod signals;

pub use column::{
    Column, ColumnAlignment, ColumnDefinition, ColumnKind, ColumnProperties, ConfigurationMismatch,
    DerivedColumns, derive_columns, headerify,
};
pub use filter::{FilterFn, filter_rows, row_passes};
pub use groups::{
    ColumnDescriptor, ColumnLists, ColumnRef, available_groups, group_ids, groups, hidden_columns,
    rebuild_live_columns, visible_columns,
};
pub use matrix::{FieldValues, Matrix};
pub use projection::{DataProjection, JsonDataModel};
pub use reconcile::{ReconcileReport, ReconciliationMiss, SelectionAnchor};
pub use row::{Row, RowId, RowStore, rows_from_json, rows_from_json_str};
pub use selection::{SelectionChange, SelectionMode, SelectionModel, SelectionRect, SelectionStore};
pub use signals::ModelSignals;
