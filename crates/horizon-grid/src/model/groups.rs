//! Group and visibility projection of columns.
//!
//! Columns are partitioned into four lists that a column picker can reorder
//! independently:
//!
//! - **groups**: columns currently grouped on, in group order
//! - **available groups**: columns that could be grouped on
//! - **hidden columns**: columns not currently visible
//! - **visible columns**: the live column order, minus the hierarchy column
//!
//! The host hands the edited lists back through
//! [`Behavior::set_column_descriptors`](crate::Behavior::set_column_descriptors).

use serde::{Deserialize, Serialize};

use horizon_grid_core::logging::targets;

use super::column::Column;

/// A column reference used by the picker lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Data column index.
    pub id: usize,
    /// Display label.
    pub label: Option<String>,
    /// Projected field.
    pub field: Option<String>,
}

impl ColumnDescriptor {
    /// Describes a data column.
    pub fn from_column(column: &Column) -> Self {
        Self {
            id: column.index(),
            label: column.label().map(str::to_string),
            field: column.field().map(str::to_string),
        }
    }
}

/// The four picker lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLists {
    /// Active groups in group order.
    pub group: Vec<ColumnDescriptor>,
    /// Columns available for grouping.
    pub available_groups: Vec<ColumnDescriptor>,
    /// Hidden columns.
    pub hidden: Vec<ColumnDescriptor>,
    /// Visible columns in display order.
    pub visible: Vec<ColumnDescriptor>,
}

/// An entry of the live (visible) column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    /// The hierarchy column.
    Tree,
    /// A data column by index.
    Data(usize),
}

fn descriptor(id: usize, headers: &[String], fields: &[String]) -> ColumnDescriptor {
    ColumnDescriptor {
        id,
        label: headers.get(id).cloned(),
        field: fields.get(id).cloned(),
    }
}

/// Describes the active groups.
pub fn groups(headers: &[String], fields: &[String], group_bys: &[usize]) -> Vec<ColumnDescriptor> {
    group_bys
        .iter()
        .map(|&id| descriptor(id, headers, fields))
        .collect()
}

/// Describes every column that is not grouped on.
///
/// There is one column per field. Columns past the end of a short header
/// list get a `None` label; extra headers describe no column.
pub fn available_groups(
    headers: &[String],
    fields: &[String],
    group_bys: &[usize],
) -> Vec<ColumnDescriptor> {
    (0..fields.len())
        .filter(|id| !group_bys.contains(id))
        .map(|id| descriptor(id, headers, fields))
        .collect()
}

/// Describes the visible data columns in display order.
pub fn visible_columns(all: &[Column], live: &[ColumnRef]) -> Vec<ColumnDescriptor> {
    live.iter()
        .filter_map(|column| match column {
            ColumnRef::Data(index) => all.get(*index).map(ColumnDescriptor::from_column),
            ColumnRef::Tree => None,
        })
        .collect()
}

/// Describes the data columns missing from the live order, sorted by label.
pub fn hidden_columns(all: &[Column], live: &[ColumnRef]) -> Vec<ColumnDescriptor> {
    let mut hidden: Vec<ColumnDescriptor> = all
        .iter()
        .filter(|column| !live.contains(&ColumnRef::Data(column.index())))
        .map(ColumnDescriptor::from_column)
        .collect();
    hidden.sort_by(|a, b| a.label.cmp(&b.label));
    hidden
}

/// Rebuilds the live column order from an edited visible list.
///
/// A hierarchy column at position 0 of `current` stays pinned at position 0.
/// Descriptors naming columns that no longer exist are skipped, as are
/// repeats.
pub fn rebuild_live_columns(
    current: &[ColumnRef],
    all: &[Column],
    visible: &[ColumnDescriptor],
) -> Vec<ColumnRef> {
    let mut live = Vec::with_capacity(visible.len() + 1);
    if current.first() == Some(&ColumnRef::Tree) {
        live.push(ColumnRef::Tree);
    }

    for descriptor in visible {
        let entry = ColumnRef::Data(descriptor.id);
        if descriptor.id >= all.len() {
            tracing::debug!(target: targets::GROUPS, id = descriptor.id, "skipping unknown column");
            continue;
        }
        if !live.contains(&entry) {
            live.push(entry);
        }
    }
    live
}

/// Maps the group list to group identifiers, keeping the first occurrence
/// of each column.
pub fn group_ids(group: &[ColumnDescriptor]) -> Vec<usize> {
    let mut ids: Vec<usize> = Vec::with_capacity(group.len());
    for descriptor in group {
        if !ids.contains(&descriptor.id) {
            ids.push(descriptor.id);
        }
    }
    ids
}
