use crate::grid::{ButtonGrid, Direction, WidgetId};

/// The single widget currently selected for input.
///
/// Owned by the host and passed to the animator each frame; there is no
/// global "current selection".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    current: Option<WidgetId>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<WidgetId> {
        self.current
    }

    pub fn focus(&mut self, id: WidgetId) {
        self.current = Some(id);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Step focus toward `direction`. Returns whether focus moved.
    pub fn move_focus(&mut self, grid: &ButtonGrid, direction: Direction) -> bool {
        let Some(next) = self.current.and_then(|id| grid.neighbor(id, direction)) else {
            return false;
        };
        self.current = Some(next);
        true
    }
}

/// Restores focus when the focused button disappears.
#[derive(Debug, Clone, Copy, Default)]
pub struct Refocuser;

impl Refocuser {
    /// If nothing is focused, or the focused button is no longer active,
    /// focus the first active button in reading order. Returns whether
    /// focus changed.
    pub fn refocus(&self, focus: &mut FocusState, grid: &ButtonGrid) -> bool {
        if focus.current().is_some_and(|id| grid.is_active(id)) {
            return false;
        }
        match grid.first_active() {
            Some(id) => {
                log::debug!("refocusing on button {id}");
                focus.focus(id);
                true
            }
            None => {
                let had_focus = focus.current().is_some();
                focus.clear();
                had_focus
            }
        }
    }
}
