use super::WidgetId;

/// One row of slots. A removed button leaves an empty placeholder behind
/// so the remaining buttons keep their column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridRow {
    row_id: usize,
    slots: Vec<Option<WidgetId>>,
}

impl GridRow {
    pub fn new(row_id: usize, capacity: usize) -> Self {
        Self {
            row_id,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn row_id(&self) -> usize {
        self.row_id
    }

    /// Number of slots, vacant ones included.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots holding a button.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, column: usize) -> Option<WidgetId> {
        self.slots.get(column).copied().flatten()
    }

    pub fn is_vacant(&self, column: usize) -> bool {
        matches!(self.slots.get(column), Some(None))
    }

    pub fn first_vacant(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<WidgetId>] {
        &self.slots
    }

    pub(crate) fn add(&mut self, id: WidgetId) {
        self.slots.push(Some(id));
    }

    pub(crate) fn fill(&mut self, column: usize, id: WidgetId) {
        if let Some(slot) = self.slots.get_mut(column) {
            *slot = Some(id);
        }
    }

    /// Empty the slot at `column`, returning what it held.
    pub(crate) fn remove_button(&mut self, column: usize) -> Option<WidgetId> {
        self.slots.get_mut(column).and_then(Option::take)
    }
}
