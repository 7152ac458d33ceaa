mod button;
mod navigation;
mod row;
mod template;

pub use button::{ButtonHandle, WidgetId};
pub use navigation::Direction;
pub use row::GridRow;
pub use template::{ButtonTemplate, ButtonWidget};

use gridscroll_protocol::Point;
use thiserror::Error;

use crate::layout::{LayoutMetrics, ScrollContainer};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("button template has no clickable widget attached")]
    InvalidTemplate,
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfRange { row: usize, col: usize },
    #[error("cell ({row}, {col}) already holds a button")]
    SlotOccupied { row: usize, col: usize },
    #[error("cell ({row}, {col}) holds no button")]
    EmptySlot { row: usize, col: usize },
}

/// A button's logical position together with its world-space center for
/// the current container placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub id: WidgetId,
    pub row: usize,
    pub column: usize,
    pub center: Point,
}

/// Grid index: maps `(row, column)` to buttons.
///
/// Buttons live in an arena addressed by [`WidgetId`]; rows hold ids.
/// Removing a button hides it and parks the handle so the next insertion
/// can reuse it instead of building a new one from the template.
#[derive(Debug)]
pub struct ButtonGrid {
    template: ButtonTemplate,
    widget: ButtonWidget,
    metrics: LayoutMetrics,
    rows: Vec<GridRow>,
    buttons: Vec<ButtonHandle>,
    parked: Vec<WidgetId>,
}

impl ButtonGrid {
    /// Create an empty grid. Fails fast when the template cannot produce
    /// clickable buttons.
    pub fn new(template: ButtonTemplate, metrics: LayoutMetrics) -> Result<Self, GridError> {
        let widget = template.validate()?;
        Ok(Self {
            template,
            widget,
            metrics,
            rows: Vec::new(),
            buttons: Vec::new(),
            parked: Vec::new(),
        })
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn columns(&self) -> usize {
        self.metrics.columns.max(1)
    }

    /// Active buttons.
    pub fn count(&self) -> usize {
        self.rows.iter().map(GridRow::occupied).sum()
    }

    /// All slots, vacant placeholders included.
    pub fn slot_count(&self) -> usize {
        self.rows.iter().map(GridRow::count).sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Place a button at `(row, col)`.
    ///
    /// `row` may be one past the last row to start a new row. `col` must
    /// name a vacant slot or be exactly the row's length (append).
    pub fn insert_button(&mut self, row: usize, col: usize) -> Result<WidgetId, GridError> {
        if row > self.rows.len() || col >= self.columns() {
            return Err(GridError::OutOfRange { row, col });
        }
        // A row that does not exist yet only accepts column 0. Validate
        // before touching the grid so errors leave it unchanged.
        let existing = self.rows.get(row);
        let slots = existing.map_or(0, GridRow::count);
        let append = match col.cmp(&slots) {
            std::cmp::Ordering::Less if existing.is_some_and(|r| r.is_vacant(col)) => false,
            std::cmp::Ordering::Less => return Err(GridError::SlotOccupied { row, col }),
            std::cmp::Ordering::Equal => true,
            std::cmp::Ordering::Greater => return Err(GridError::OutOfRange { row, col }),
        };
        if row == self.rows.len() {
            self.rows.push(GridRow::new(row, self.columns()));
        }

        let id = self.acquire_handle(row, col);
        if append {
            self.rows[row].add(id);
        } else {
            self.rows[row].fill(col, id);
        }
        Ok(id)
    }

    /// Place a button at the next available `(row, column)` pair in
    /// reading order: the first vacant slot, else the end of the last row,
    /// else a new row.
    pub fn insert_new_button(&mut self) -> Result<WidgetId, GridError> {
        let (row, col) = self.next_free_slot();
        self.insert_button(row, col)
    }

    pub fn insert_multiple_buttons(&mut self, n: usize) -> Result<Vec<WidgetId>, GridError> {
        (0..n).map(|_| self.insert_new_button()).collect()
    }

    /// Hide the button at `(row, col)` and leave an empty placeholder.
    ///
    /// The row is not compacted. The returned handle stays valid and
    /// inactive until a later insertion reuses it.
    pub fn remove_button(&mut self, row: usize, col: usize) -> Result<WidgetId, GridError> {
        let grid_row = self
            .rows
            .get_mut(row)
            .ok_or(GridError::OutOfRange { row, col })?;
        if col >= grid_row.count() {
            return Err(GridError::OutOfRange { row, col });
        }
        let id = grid_row
            .remove_button(col)
            .ok_or(GridError::EmptySlot { row, col })?;

        if let Some(handle) = self.buttons.get_mut(id.0 as usize) {
            handle.deactivate();
        }
        self.parked.push(id);
        log::debug!("removed button {id} at ({row}, {col})");
        Ok(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&ButtonHandle> {
        self.buttons.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut ButtonHandle> {
        self.buttons.get_mut(id.0 as usize)
    }

    /// The button occupying `(row, col)`, if any.
    pub fn at(&self, row: usize, col: usize) -> Option<WidgetId> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn is_active(&self, id: WidgetId) -> bool {
        self.get(id).is_some_and(ButtonHandle::is_active)
    }

    /// Route a click to the button's callback.
    pub fn click(&mut self, id: WidgetId) -> bool {
        self.get_mut(id).is_some_and(ButtonHandle::click)
    }

    /// Active buttons in reading order.
    pub fn iter_active(&self) -> impl Iterator<Item = &ButtonHandle> {
        self.rows
            .iter()
            .flat_map(|r| r.slots().iter().flatten())
            .filter_map(|id| self.get(*id))
    }

    pub fn first_active(&self) -> Option<WidgetId> {
        self.iter_active().next().map(ButtonHandle::id)
    }

    /// Resolve a button's world-space cell for the given container.
    pub fn cell(&self, id: WidgetId, container: &ScrollContainer) -> Option<GridCell> {
        let handle = self.get(id).filter(|h| h.is_active())?;
        let (row, column) = handle.position();
        Some(GridCell {
            id,
            row,
            column,
            center: self.metrics.cell_center(container.position, row, column),
        })
    }

    fn next_free_slot(&self) -> (usize, usize) {
        for (r, row) in self.rows.iter().enumerate() {
            if let Some(c) = row.first_vacant() {
                return (r, c);
            }
        }
        match self.rows.last() {
            Some(last) if last.count() < self.columns() => (self.rows.len() - 1, last.count()),
            _ => (self.rows.len(), 0),
        }
    }

    /// Prefer the handle last parked at this exact position, then any
    /// parked handle, then a fresh one from the template.
    fn acquire_handle(&mut self, row: usize, col: usize) -> WidgetId {
        let exact = self
            .parked
            .iter()
            .position(|id| self.get(*id).is_some_and(|h| h.position() == (row, col)));
        let parked = exact.map(|i| self.parked.remove(i)).or_else(|| self.parked.pop());

        if let Some(id) = parked
            && let Some(handle) = self.buttons.get_mut(id.0 as usize)
        {
            handle.set_position(row, col);
            handle.activate();
            log::debug!("reactivated button {id} at ({row}, {col})");
            return id;
        }

        let id = WidgetId(self.buttons.len() as u32);
        self.buttons.push(ButtonHandle::new(
            id,
            &self.template.name,
            row,
            col,
            self.widget.interactable,
        ));
        log::debug!("created button {id} at ({row}, {col})");
        id
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::layout::{Size, Spacing};

    fn grid(columns: usize) -> ButtonGrid {
        let metrics = LayoutMetrics {
            cell_size: Size::new(100.0, 100.0),
            spacing: Spacing::new(0.0, 10.0),
            columns,
            ..LayoutMetrics::default()
        };
        ButtonGrid::new(ButtonTemplate::default(), metrics).unwrap_or_else(|e| panic!("{e}"))
    }

    #[test]
    fn template_without_button_is_rejected() {
        let template = ButtonTemplate {
            name: "Broken".into(),
            button: None,
        };
        let err = ButtonGrid::new(template, LayoutMetrics::default()).err();
        assert_eq!(err, Some(GridError::InvalidTemplate));
    }

    #[test]
    fn insert_new_fills_rows_in_reading_order() {
        let mut g = grid(3);
        let ids = g.insert_multiple_buttons(7).unwrap_or_default();
        assert_eq!(ids.len(), 7);
        assert_eq!(g.row_count(), 3);
        assert_eq!(g.at(2, 0), Some(ids[6]));
        assert_eq!(g.get(ids[4]).map(ButtonHandle::position), Some((1, 1)));
        assert_eq!(g.get(ids[4]).map(ButtonHandle::label), Some("Button 1, 1"));
    }

    #[test]
    fn insert_rejects_gaps_and_duplicates() {
        let mut g = grid(3);
        assert_eq!(g.insert_button(1, 0), Err(GridError::OutOfRange { row: 1, col: 0 }));
        assert!(g.insert_button(0, 0).is_ok());
        assert_eq!(g.insert_button(0, 0), Err(GridError::SlotOccupied { row: 0, col: 0 }));
        assert_eq!(g.insert_button(0, 2), Err(GridError::OutOfRange { row: 0, col: 2 }));
        assert_eq!(g.insert_button(0, 3), Err(GridError::OutOfRange { row: 0, col: 3 }));
    }

    #[test]
    fn rejected_insert_leaves_grid_unchanged() {
        let mut g = grid(3);
        g.insert_new_button().ok();
        assert_eq!(g.insert_button(1, 2), Err(GridError::OutOfRange { row: 1, col: 2 }));
        assert_eq!(g.row_count(), 1);
        assert_eq!(g.slot_count(), 1);
        assert!(
            (g.metrics().content_height(g.row_count()) - g.metrics().content_height(1)).abs()
                < f64::EPSILON
        );

        let next = g.insert_new_button().ok();
        assert_eq!(next.and_then(|id| g.get(id)).map(ButtonHandle::position), Some((0, 1)));
        assert_eq!(g.row_count(), 1);
    }

    #[test]
    fn remove_keeps_slot_and_reinsert_reactivates_same_handle() {
        let mut g = grid(1);
        g.insert_multiple_buttons(3).unwrap_or_default();
        let original = g.at(1, 0);

        let removed = g.remove_button(1, 0);
        assert_eq!(removed.ok(), original);
        assert_eq!(g.count(), 2);
        assert_eq!(g.slot_count(), 3);
        assert_eq!(g.at(1, 0), None);
        assert!(g.rows()[1].is_vacant(0));
        assert!(!original.is_some_and(|id| g.is_active(id)));

        let again = g.insert_button(1, 0).ok();
        assert_eq!(again, original);
        assert_eq!(g.count(), 3);
        assert!(again.is_some_and(|id| g.is_active(id)));
    }

    #[test]
    fn insert_new_reuses_vacant_slot_first() {
        let mut g = grid(2);
        g.insert_multiple_buttons(4).unwrap_or_default();
        let removed = g.remove_button(0, 1).ok();
        let next = g.insert_new_button().ok();
        assert_eq!(next, removed);
        assert_eq!(g.at(0, 1), removed);
    }

    #[test]
    fn parked_handle_moves_to_new_position() {
        let mut g = grid(2);
        g.insert_multiple_buttons(2).unwrap_or_default();
        let parked = g.remove_button(0, 0).ok();
        let reused = g.insert_button(1, 0).ok();
        assert_eq!(reused, parked);
        assert_eq!(reused.and_then(|id| g.get(id)).map(ButtonHandle::position), Some((1, 0)));
    }

    #[test]
    fn removing_twice_reports_empty_slot() {
        let mut g = grid(1);
        g.insert_new_button().ok();
        assert!(g.remove_button(0, 0).is_ok());
        assert_eq!(g.remove_button(0, 0), Err(GridError::EmptySlot { row: 0, col: 0 }));
        assert_eq!(g.remove_button(3, 0), Err(GridError::OutOfRange { row: 3, col: 0 }));
    }

    #[test]
    fn click_routes_to_callback() {
        let mut g = grid(1);
        let Ok(id) = g.insert_new_button() else {
            panic!("insert failed");
        };
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        if let Some(b) = g.get_mut(id) {
            b.assign_callback(move || h.set(h.get() + 1));
        }
        assert!(g.click(id));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cell_center_follows_container() {
        let mut g = grid(1);
        g.insert_multiple_buttons(2).unwrap_or_default();
        let container = ScrollContainer::new(Point::new(0.0, 300.0));
        let Some(cell) = g.at(1, 0).and_then(|id| g.cell(id, &container)) else {
            panic!("missing cell");
        };
        assert!((cell.center.y - 140.0).abs() < f64::EPSILON);
        assert_eq!((cell.row, cell.column), (1, 0));
    }
}
