//! Viewport bounds checks for a single grid cell.
//!
//! All comparisons are strict: a cell whose edge lies exactly on the
//! viewport edge is still in bounds.

use gridscroll_protocol::Rect;

use crate::grid::GridCell;
use crate::layout::LayoutMetrics;

impl GridCell {
    /// Upper edge including the layout's top padding.
    pub fn top_edge(&self, metrics: &LayoutMetrics) -> f64 {
        self.center.y + metrics.half_height() + metrics.padding.top
    }

    /// Lower edge including bottom padding and one unit of row spacing.
    pub fn bottom_edge(&self, metrics: &LayoutMetrics) -> f64 {
        self.center.y - metrics.half_height() - metrics.padding.bottom - metrics.spacing.y
    }
}

pub fn is_above_viewport(cell: &GridCell, metrics: &LayoutMetrics, viewport_top: f64) -> bool {
    cell.top_edge(metrics) > viewport_top
}

pub fn is_below_viewport(cell: &GridCell, metrics: &LayoutMetrics, viewport_bottom: f64) -> bool {
    cell.bottom_edge(metrics) < viewport_bottom
}

pub fn is_out_of_bounds(cell: &GridCell, metrics: &LayoutMetrics, viewport: &Rect) -> bool {
    is_above_viewport(cell, metrics, viewport.top())
        || is_below_viewport(cell, metrics, viewport.bottom())
}
