//! Change notifications emitted by data projections.

use horizon_grid_core::Signal;

/// Collection of signals emitted by a [`DataProjection`](super::DataProjection).
///
/// - **Data replaced**: `model_about_to_reset` / `model_reset`
/// - **Filter pass**: `layout_about_to_change` / `layout_changed`
/// - **Configuration**: `fields_changed`, `header_data_changed`, `groups_changed`
pub struct ModelSignals {
    /// Emitted before all rows are replaced.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after all rows were replaced.
    pub model_reset: Signal<()>,

    /// Emitted before the filtered view is recomputed.
    pub layout_about_to_change: Signal<()>,

    /// Emitted after the filtered view was recomputed.
    pub layout_changed: Signal<()>,

    /// Emitted when the field list changes. Args: new column count
    pub fields_changed: Signal<usize>,

    /// Emitted when headers change.
    /// Args: (first section, last section)
    pub header_data_changed: Signal<(usize, usize)>,

    /// Emitted when the group list changes. Args: group column ids
    pub groups_changed: Signal<Vec<usize>>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
            layout_about_to_change: Signal::new(),
            layout_changed: Signal::new(),
            fields_changed: Signal::new(),
            header_data_changed: Signal::new(),
            groups_changed: Signal::new(),
        }
    }

    /// Emits signals for a model reset.
    ///
    /// Calls the provided function between the about_to_reset and reset signals.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }

    /// Emits signals for a layout change.
    ///
    /// Calls the provided function between the about_to_change and changed signals.
    pub fn emit_layout_changed<F>(&self, change_fn: F)
    where
        F: FnOnce(),
    {
        self.layout_about_to_change.emit(());
        change_fn();
        self.layout_changed.emit(());
    }
}
