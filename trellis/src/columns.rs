//! Column layout: width, pin side, visibility, sticky offsets.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::RecordRow;

/// Width given to a column whose configuration does not set one.
pub const DEFAULT_COLUMN_WIDTH: u32 = 300;

/// Field name reserved for the row-selection checkbox column.
pub const SELECTION_COLUMN_FIELD: &str = "selection";

/// Width of the row-selection checkbox column.
pub const SELECTION_COLUMN_WIDTH: u32 = 30;

/// Which edge a column is pinned to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    #[default]
    None,
    Left,
    Right,
}

/// Custom cell renderer: record plus its index in the visible sequence.
pub type CellRender<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Host-supplied column configuration.
///
/// Created once from configuration; width and pin side evolve through
/// [`ColumnLayout`] operations, the hidden flag does not. A new column set
/// replaces the layout wholesale.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     ColumnSpec::new("name", "Name"),
///     ColumnSpec::new("owner", "Owner").width(160),
///     ColumnSpec::new("internalId", "Internal Id").hidden(),
/// ];
/// ```
pub struct ColumnSpec<T> {
    /// Record field this column shows.
    pub field: String,
    /// Header label.
    pub header: String,
    /// Configured (default) width in pixels.
    pub width: u32,
    /// Whether the column is excluded from rendering.
    pub hidden: bool,
    /// Configured pin side.
    pub pin: PinSide,
    render: Option<CellRender<T>>,
}

impl<T> ColumnSpec<T> {
    /// Create a column with the default width.
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            width: DEFAULT_COLUMN_WIDTH,
            hidden: false,
            pin: PinSide::None,
            render: None,
        }
    }

    /// The reserved checkbox column prepended when row selection is enabled.
    /// It cannot be resized, pinned, or hidden.
    pub fn selection() -> Self {
        Self {
            field: SELECTION_COLUMN_FIELD.to_string(),
            header: String::new(),
            width: SELECTION_COLUMN_WIDTH,
            hidden: false,
            pin: PinSide::None,
            render: None,
        }
    }

    /// Set the configured width.
    pub fn width(mut self, px: u32) -> Self {
        self.width = px;
        self
    }

    /// Exclude the column from rendering.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set the configured pin side.
    pub fn pin(mut self, side: PinSide) -> Self {
        self.pin = side;
        self
    }

    /// Attach a custom cell renderer.
    pub fn render(mut self, f: impl Fn(&T, usize) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// Whether this is the reserved row-selection column.
    pub fn is_selection(&self) -> bool {
        self.field == SELECTION_COLUMN_FIELD
    }

    /// Whether a custom renderer is attached.
    pub fn has_custom_render(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: RecordRow> ColumnSpec<T> {
    /// Cell text for a record: the custom renderer if attached, otherwise
    /// the record's own text for this column's field.
    pub fn cell_text(&self, record: &T, row_index: usize) -> String {
        match &self.render {
            Some(render) => render(record, row_index),
            None => record.field_text(&self.field).unwrap_or_default(),
        }
    }
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            header: self.header.clone(),
            width: self.width,
            hidden: self.hidden,
            pin: self.pin,
            render: self.render.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("hidden", &self.hidden)
            .field("pin", &self.pin)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Renderable snapshot of one visible column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub field: String,
    pub header: String,
    /// Current width in pixels.
    pub width: u32,
    pub pin: PinSide,
    /// Sticky offset for pinned columns, `None` for normal flow.
    pub offset: Option<u32>,
}

/// Mutable per-column layout state plus derived positioning.
///
/// Pinning never evicts: several columns may share a side and keep their
/// declaration order. A column pinned left is offset by the widths of the
/// visible left-pinned columns declared before it; a column pinned right by
/// the widths of the visible right-pinned columns declared after it.
pub struct ColumnLayout<T> {
    specs: Vec<ColumnSpec<T>>,
    widths: Vec<u32>,
    pins: Vec<PinSide>,
}

impl<T> Default for ColumnLayout<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ColumnLayout<T> {
    /// Create a layout seeded from the configured widths and pin sides.
    pub fn new(specs: Vec<ColumnSpec<T>>) -> Self {
        let widths = specs.iter().map(|s| s.width).collect();
        let pins = specs.iter().map(|s| s.pin).collect();
        Self { specs, widths, pins }
    }

    /// Create a layout with the reserved selection column prepended.
    pub fn with_selection_column(mut specs: Vec<ColumnSpec<T>>) -> Self {
        specs.insert(0, ColumnSpec::selection());
        Self::new(specs)
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.field == field)
    }

    /// Number of columns, hidden ones included.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the layout has no columns.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The column configurations, in declaration order.
    pub fn specs(&self) -> &[ColumnSpec<T>] {
        &self.specs
    }

    /// Consume the layout, returning the column configurations.
    pub fn into_specs(self) -> Vec<ColumnSpec<T>> {
        self.specs
    }

    /// Set a column's current width. Returns false for unknown fields and
    /// for the selection column.
    pub fn set_width(&mut self, field: &str, px: u32) -> bool {
        match self.position(field) {
            Some(pos) if !self.specs[pos].is_selection() => {
                self.widths[pos] = px;
                true
            }
            _ => false,
        }
    }

    /// Restore a column's configured width.
    pub fn reset_width(&mut self, field: &str) -> bool {
        match self.position(field) {
            Some(pos) => {
                self.widths[pos] = self.specs[pos].width;
                true
            }
            None => false,
        }
    }

    /// Current width of a column.
    pub fn width(&self, field: &str) -> Option<u32> {
        self.position(field).map(|pos| self.widths[pos])
    }

    /// Pin a column to a side (or unpin with [`PinSide::None`]). Other
    /// columns on the same side stay pinned. Returns false for unknown
    /// fields and for the selection column.
    pub fn pin(&mut self, field: &str, side: PinSide) -> bool {
        match self.position(field) {
            Some(pos) if !self.specs[pos].is_selection() => {
                self.pins[pos] = side;
                true
            }
            _ => false,
        }
    }

    /// Current pin side of a column; [`PinSide::None`] for unknown fields.
    pub fn pin_side(&self, field: &str) -> PinSide {
        self.position(field)
            .map(|pos| self.pins[pos])
            .unwrap_or_default()
    }

    /// Sticky offset of a pinned column; `None` when unpinned or unknown.
    pub fn offset(&self, field: &str) -> Option<u32> {
        let pos = self.position(field)?;
        match self.pins[pos] {
            PinSide::None => None,
            PinSide::Left => Some(
                (0..pos)
                    .filter(|&i| self.pins[i] == PinSide::Left && !self.specs[i].hidden)
                    .map(|i| self.widths[i])
                    .sum(),
            ),
            PinSide::Right => Some(
                (pos + 1..self.specs.len())
                    .filter(|&i| self.pins[i] == PinSide::Right && !self.specs[i].hidden)
                    .map(|i| self.widths[i])
                    .sum(),
            ),
        }
    }

    /// Whether a column is rendered. Fixed at configuration time.
    pub fn is_visible(&self, field: &str) -> bool {
        self.position(field).is_some_and(|pos| !self.specs[pos].hidden)
    }

    /// Renderable snapshots of the visible columns, in declaration order.
    pub fn visible_columns(&self) -> Vec<ColumnView> {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| !spec.hidden)
            .map(|(pos, spec)| ColumnView {
                field: spec.field.clone(),
                header: spec.header.clone(),
                width: self.widths[pos],
                pin: self.pins[pos],
                offset: self.offset(&spec.field),
            })
            .collect()
    }

    /// Sum of the current widths of all visible columns.
    pub fn total_width(&self) -> u32 {
        self.specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| !spec.hidden)
            .map(|(pos, _)| self.widths[pos])
            .sum()
    }
}

impl<T> Clone for ColumnLayout<T> {
    fn clone(&self) -> Self {
        Self {
            specs: self.specs.clone(),
            widths: self.widths.clone(),
            pins: self.pins.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnLayout<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnLayout")
            .field("specs", &self.specs)
            .field("widths", &self.widths)
            .field("pins", &self.pins)
            .finish()
    }
}
