//! Horizon Grid - data binding, filtering and selection beneath a grid.
//!
//! This crate turns JSON object rows into the columns, filtered view and
//! selection projections a grid display surface renders. It does not draw
//! anything: the display surface plugs in through [`host::GridHost`].
//!
//! # Example
//!
//! ```
//! use horizon_grid::{GridConfig, JsonBehavior};
//! use horizon_grid::host::{GridHost, HeadlessHost};
//! use serde_json::json;
//!
//! let config = GridConfig::default().with_tree_column_label("Hierarchy");
//! let mut behavior = JsonBehavior::with_config(HeadlessHost::new(0), config);
//! behavior.set_data_value(json!([
//!     {"name": "Ada", "team": "core"},
//!     {"name": "Grace", "team": "compilers"},
//! ])).unwrap();
//!
//! behavior.host_mut().selection_mut().select_row(1);
//! assert_eq!(behavior.get_row_selection()["name"], json!(["Grace"]));
//!
//! // Auto-size and repaint run once the caller drains the deferred tasks.
//! behavior.process_deferred();
//! assert_eq!(behavior.host().changed_count(), 1);
//! ```

pub mod behavior;
pub mod config;
pub mod error;
pub mod host;
pub mod model;

pub use behavior::{Behavior, JsonBehavior};
pub use config::GridConfig;
pub use error::{Error, Result};
pub use host::{DeferredTask, GridHost, HeadlessHost};
pub use model::{
    Column, ColumnAlignment, ColumnDefinition, ColumnDescriptor, ColumnLists, DataProjection,
    JsonDataModel, ReconcileReport, Row, RowId, SelectionModel, SelectionRect, SelectionStore,
};
