use super::{ButtonGrid, GridRow, WidgetId};

/// Keyboard / gamepad navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl ButtonGrid {
    /// The button reached by moving one step from `from`.
    ///
    /// Vacant slots are skipped. Vertical moves keep the column when the
    /// target row has a button there and otherwise land on the nearest
    /// occupied column (left wins ties). There is no wrap-around.
    pub fn neighbor(&self, from: WidgetId, direction: Direction) -> Option<WidgetId> {
        let handle = self.get(from).filter(|h| h.is_active())?;
        let (row, col) = handle.position();

        match direction {
            Direction::Left => (0..col).rev().find_map(|c| self.at(row, c)),
            Direction::Right => {
                let len = self.rows.get(row).map_or(0, GridRow::count);
                (col + 1..len).find_map(|c| self.at(row, c))
            }
            Direction::Up => (0..row).rev().find_map(|r| self.nearest_in_row(r, col)),
            Direction::Down => (row + 1..self.rows.len()).find_map(|r| self.nearest_in_row(r, col)),
        }
    }

    fn nearest_in_row(&self, row: usize, col: usize) -> Option<WidgetId> {
        let slots = self.rows.get(row)?.slots();
        slots
            .iter()
            .enumerate()
            .filter_map(|(c, slot)| slot.map(|id| (c.abs_diff(col), c, id)))
            .min_by_key(|&(dist, c, _)| (dist, c))
            .map(|(_, _, id)| id)
    }
}
