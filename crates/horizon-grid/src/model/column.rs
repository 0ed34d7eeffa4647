//! Column definitions and column derivation.
//!
//! Columns are derived entities: one per field, labelled by the header at the
//! same position. They are rebuilt wholesale from the data projection whenever
//! data or fields change; nothing attached to an old column survives a
//! rebuild.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::filter::FilterFn;

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    /// Align to the left edge.
    Left,
    /// Align to the center (default for data columns).
    #[default]
    Center,
    /// Align to the right edge.
    Right,
}

/// What a column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// A column projecting one field of every row.
    Data,
    /// The hierarchy column shown while groups are active.
    Tree,
}

/// A column definition as supplied by the host: a display title and the
/// field it projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Header label.
    pub title: String,
    /// Field name.
    pub field: String,
}

impl ColumnDefinition {
    /// Creates a definition.
    pub fn new(title: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field: field.into(),
        }
    }
}

/// The mutable property bag of a column.
#[derive(Clone, Default)]
pub struct ColumnProperties {
    /// Field projected by this column. `None` when the field list is shorter
    /// than the column count.
    pub field: Option<String>,
    /// Header label. `None` when the header list is shorter than the column
    /// count.
    pub header: Option<String>,
    /// Per-column row predicate. `None` passes every row.
    pub complex_filter: Option<FilterFn>,
    /// Alignment override.
    pub alignment: Option<ColumnAlignment>,
    /// Free-form properties attached by the host.
    pub extra: serde_json::Map<String, Value>,
}

impl fmt::Debug for ColumnProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnProperties")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("complex_filter", &self.complex_filter.as_ref().map(|_| "<fn>"))
            .field("alignment", &self.alignment)
            .field("extra", &self.extra)
            .finish()
    }
}

/// A grid column.
#[derive(Debug, Clone)]
pub struct Column {
    index: usize,
    label: Option<String>,
    kind: ColumnKind,
    properties: ColumnProperties,
}

impl Column {
    /// Creates a data column at `index` with a fresh property bag.
    pub fn new(index: usize, label: Option<String>) -> Self {
        Self {
            index,
            label,
            kind: ColumnKind::Data,
            properties: ColumnProperties::default(),
        }
    }

    /// Creates the hierarchy column.
    pub fn tree(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            index: 0,
            label: Some(label.clone()),
            kind: ColumnKind::Tree,
            properties: ColumnProperties {
                header: Some(label),
                alignment: Some(ColumnAlignment::Left),
                ..ColumnProperties::default()
            },
        }
    }

    /// Index of this column among the data columns.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The label the column was created with.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The column kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Returns `true` for the hierarchy column.
    pub fn is_tree(&self) -> bool {
        self.kind == ColumnKind::Tree
    }

    /// The column's property bag.
    pub fn properties(&self) -> &ColumnProperties {
        &self.properties
    }

    /// Mutable access to the column's property bag.
    pub fn properties_mut(&mut self) -> &mut ColumnProperties {
        &mut self.properties
    }

    /// The field this column projects.
    pub fn field(&self) -> Option<&str> {
        self.properties.field.as_deref()
    }

    /// The column header.
    pub fn header(&self) -> Option<&str> {
        self.properties.header.as_deref()
    }

    /// The active predicate, if any.
    pub fn complex_filter(&self) -> Option<&FilterFn> {
        self.properties.complex_filter.as_ref()
    }

    /// Attaches a predicate over this column's cell value.
    ///
    /// The predicate receives `Value::Null` for rows lacking the field.
    pub fn set_complex_filter<F>(&mut self, filter: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.properties.complex_filter = Some(Arc::new(filter));
    }

    /// Removes the predicate; the column then passes every row.
    pub fn clear_complex_filter(&mut self) {
        self.properties.complex_filter = None;
    }
}

/// Lengths of the column-defining lists when they disagree.
///
/// A caller contract violation that still yields columns: positions beyond
/// the shorter list get `None` headers or fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationMismatch {
    /// Number of columns built.
    pub column_count: usize,
    /// Length of the header list.
    pub header_count: usize,
    /// Length of the field list.
    pub field_count: usize,
}

impl ConfigurationMismatch {
    /// Compares the list lengths against the column count.
    pub fn check(column_count: usize, header_count: usize, field_count: usize) -> Option<Self> {
        (header_count != column_count || field_count != column_count).then_some(Self {
            column_count,
            header_count,
            field_count,
        })
    }
}

impl fmt::Display for ConfigurationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} columns but {} headers and {} fields",
            self.column_count, self.header_count, self.field_count
        )
    }
}

/// The output of a column rebuild.
#[derive(Debug, Clone)]
pub struct DerivedColumns {
    /// One column per index in `0..column_count`.
    pub columns: Vec<Column>,
    /// Set when headers or fields did not match the column count.
    pub mismatch: Option<ConfigurationMismatch>,
}

/// Builds one column per index from the column count, headers and fields.
///
/// Each column's property bag starts with `field`, `header` and an empty
/// filter slot.
pub fn derive_columns(column_count: usize, headers: &[String], fields: &[String]) -> DerivedColumns {
    let columns = (0..column_count)
        .map(|index| {
            let header = headers.get(index).cloned();
            let mut column = Column::new(index, header.clone());
            let properties = column.properties_mut();
            properties.field = fields.get(index).cloned();
            properties.header = header;
            properties.complex_filter = None;
            column
        })
        .collect();

    DerivedColumns {
        columns,
        mismatch: ConfigurationMismatch::check(column_count, headers.len(), fields.len()),
    }
}

/// Turns a field name into a display label.
///
/// Splits on underscores, dashes, whitespace and lower-to-upper case
/// boundaries, then capitalizes each word: `unit_price` and `unitPrice` both
/// become `Unit Price`.
pub fn headerify(field: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in field.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_derive_columns_aligned() {
        let derived = derive_columns(2, &strings(&["Id", "Value"]), &strings(&["id", "v"]));

        assert!(derived.mismatch.is_none());
        assert_eq!(derived.columns.len(), 2);
        assert_eq!(derived.columns[1].index(), 1);
        assert_eq!(derived.columns[1].label(), Some("Value"));
        assert_eq!(derived.columns[1].field(), Some("v"));
        assert_eq!(derived.columns[1].header(), Some("Value"));
        assert!(derived.columns[1].complex_filter().is_none());
    }

    #[test]
    fn test_short_headers_yield_none() {
        let derived = derive_columns(3, &strings(&["A"]), &strings(&["a", "b", "c"]));

        assert_eq!(derived.columns.len(), 3);
        assert_eq!(derived.columns[0].header(), Some("A"));
        assert_eq!(derived.columns[2].header(), None);
        assert_eq!(derived.columns[2].field(), Some("c"));
        assert_eq!(
            derived.mismatch,
            Some(ConfigurationMismatch {
                column_count: 3,
                header_count: 1,
                field_count: 3,
            })
        );
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = ConfigurationMismatch::check(2, 1, 2).unwrap();
        assert_eq!(mismatch.to_string(), "2 columns but 1 headers and 2 fields");
        assert!(ConfigurationMismatch::check(2, 2, 2).is_none());
    }

    #[test]
    fn test_complex_filter_slot() {
        let mut column = Column::new(0, Some("V".into()));
        column.set_complex_filter(|value| value != "b");
        assert!(column.complex_filter().is_some());

        column.clear_complex_filter();
        assert!(column.complex_filter().is_none());
    }

    #[test]
    fn test_tree_column() {
        let tree = Column::tree("Tree");
        assert!(tree.is_tree());
        assert_eq!(tree.label(), Some("Tree"));
        assert_eq!(tree.properties().alignment, Some(ColumnAlignment::Left));
        assert!(tree.field().is_none());
    }

    #[test]
    fn test_headerify() {
        assert_eq!(headerify("short_description"), "Short Description");
        assert_eq!(headerify("unitPrice"), "Unit Price");
        assert_eq!(headerify("id"), "Id");
        assert_eq!(headerify("last-name"), "Last Name");
        assert_eq!(headerify("URL"), "URL");
        assert_eq!(headerify(""), "");
    }
}
