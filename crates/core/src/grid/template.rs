use super::GridError;

/// The clickable part of a button template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonWidget {
    pub interactable: bool,
}

impl Default for ButtonWidget {
    fn default() -> Self {
        Self { interactable: true }
    }
}

/// Blueprint every grid cell is populated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTemplate {
    /// Label prefix; buttons are labelled `"{name} {row}, {col}"`.
    pub name: String,
    /// A template without a clickable widget cannot populate a grid.
    pub button: Option<ButtonWidget>,
}

impl ButtonTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            button: Some(ButtonWidget::default()),
        }
    }

    pub(crate) fn validate(&self) -> Result<ButtonWidget, GridError> {
        self.button.ok_or(GridError::InvalidTemplate)
    }
}

impl Default for ButtonTemplate {
    fn default() -> Self {
        Self::new("Button")
    }
}
