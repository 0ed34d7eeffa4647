//! Grid configuration.
//!
//! [`GridConfig`] collects the few knobs of the data-binding layer. It can be
//! built in code with the `with_*` setters or loaded from TOML:
//!
//! ```
//! use horizon_grid::GridConfig;
//!
//! let config = GridConfig::from_toml_str(r#"
//!     tree_column_label = "Hierarchy"
//!     derive_headers = false
//! "#).unwrap();
//!
//! assert_eq!(config.tree_column_label, "Hierarchy");
//! assert_eq!(config.hidden_field_prefix, "__");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The label reserved for the hierarchy (tree) column.
pub const DEFAULT_TREE_COLUMN_LABEL: &str = "Tree";

/// Keys starting with this prefix are skipped when deriving fields.
pub const DEFAULT_HIDDEN_FIELD_PREFIX: &str = "__";

/// Configuration for a grid behavior and its data projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Header label identifying the hierarchy column.
    pub tree_column_label: String,
    /// Row keys with this prefix are not turned into fields.
    pub hidden_field_prefix: String,
    /// Derive display headers from field names when none were set.
    pub derive_headers: bool,
    /// Log a warning when fields, headers and column count disagree.
    pub report_configuration_mismatch: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tree_column_label: DEFAULT_TREE_COLUMN_LABEL.to_string(),
            hidden_field_prefix: DEFAULT_HIDDEN_FIELD_PREFIX.to_string(),
            derive_headers: true,
            report_configuration_mismatch: true,
        }
    }
}

impl GridConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Sets the hierarchy column label.
    pub fn with_tree_column_label(mut self, label: impl Into<String>) -> Self {
        self.tree_column_label = label.into();
        self
    }

    /// Sets the hidden field prefix.
    pub fn with_hidden_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.hidden_field_prefix = prefix.into();
        self
    }

    /// Enables or disables header derivation.
    pub fn with_derive_headers(mut self, derive: bool) -> Self {
        self.derive_headers = derive;
        self
    }

    /// Enables or disables mismatch warnings.
    pub fn with_report_configuration_mismatch(mut self, report: bool) -> Self {
        self.report_configuration_mismatch = report;
        self
    }
}
