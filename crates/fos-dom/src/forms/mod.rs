//! Form Elements Module
//!
//! The select family (select, option, optgroup) and label.

mod select;

/// Select element state
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    pub name: Option<String>,
    pub disabled: bool,
    pub multiple: bool,
}

/// Option element state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionState {
    pub value: String,
    pub text: String,
    pub selected: bool,
    pub disabled: bool,
}

impl OptionState {
    /// Create a new option
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Mark as selected
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Mark as disabled
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Option group state
#[derive(Debug, Clone, Default)]
pub struct OptGroupState {
    pub label: String,
    pub disabled: bool,
}

/// Label element state
#[derive(Debug, Clone, Default)]
pub struct LabelState {
    /// The `for` attribute
    pub html_for: Option<String>,
}
