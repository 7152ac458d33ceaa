use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identity of a button widget: its index in the grid's arena.
///
/// Two handles are the same button exactly when their ids match, which is
/// what the scroll animator compares frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WidgetId(pub u32);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Callback = Box<dyn FnMut()>;

/// A clickable widget placed in the grid.
///
/// Holds at most one zero-argument callback. Deactivated handles stay
/// alive in the arena so they can be reused instead of reallocated.
pub struct ButtonHandle {
    id: WidgetId,
    name: String,
    label: String,
    row: usize,
    column: usize,
    active: bool,
    interactable: bool,
    callback: Option<Callback>,
}

impl ButtonHandle {
    pub(crate) fn new(id: WidgetId, name: &str, row: usize, column: usize, interactable: bool) -> Self {
        let mut handle = Self {
            id,
            name: name.to_owned(),
            label: String::new(),
            row,
            column,
            active: true,
            interactable,
            callback: None,
        };
        handle.set_position(row, column);
        handle
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace the click callback. Any previous callback is dropped.
    pub fn assign_callback(&mut self, callback: impl FnMut() + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Fire the assigned callback. Returns whether one ran.
    ///
    /// A missing callback is not an error: the click is logged and dropped.
    /// Hidden or non-interactable buttons ignore clicks entirely.
    pub fn click(&mut self) -> bool {
        if !self.active || !self.interactable {
            log::debug!("click on {} ignored: button is not clickable", self.label);
            return false;
        }
        match self.callback.as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => {
                log::info!("no callback assigned to {}, not doing anything", self.label);
                false
            }
        }
    }

    /// Move the handle to a new grid position and relabel it.
    pub fn set_position(&mut self, row: usize, column: usize) {
        self.row = row;
        self.column = column;
        self.label = format!("{} {row}, {column}", self.name);
    }

    pub(crate) fn activate(&mut self) {
        self.active = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}

impl PartialEq for ButtonHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ButtonHandle {}

impl fmt::Debug for ButtonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonHandle")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("active", &self.active)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
