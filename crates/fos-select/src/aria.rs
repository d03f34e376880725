//! ARIA Support
//!
//! Roles and attributes stamped on the widget nodes, and the generated ids
//! that tie them together.

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    Combobox,
    Listbox,
    Option,
    Group,
}

impl AriaRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Combobox => "combobox",
            Self::Listbox => "listbox",
            Self::Option => "option",
            Self::Group => "group",
        }
    }
}

pub(crate) const ROLE: &str = "role";
pub(crate) const EXPANDED: &str = "aria-expanded";
pub(crate) const ACTIVE_DESCENDANT: &str = "aria-activedescendant";
pub(crate) const OWNS: &str = "aria-owns";
pub(crate) const LABELLED_BY: &str = "aria-labelledby";
pub(crate) const AUTOCOMPLETE: &str = "aria-autocomplete";
pub(crate) const DISABLED: &str = "aria-disabled";
pub(crate) const LABEL: &str = "aria-label";

/// Fixed class on every wrapper, independent of configuration
pub(crate) const MARKER_CLASS: &str = "customSelect";

/// Ids generated for one widget instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdNamespace {
    uid: String,
}

impl IdNamespace {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn panel_id(&self) -> String {
        format!("{MARKER_CLASS}-{}-panel", self.uid)
    }

    pub fn label_id(&self) -> String {
        format!("{MARKER_CLASS}-{}-label", self.uid)
    }

    pub fn selected_option_id(&self) -> String {
        format!("{MARKER_CLASS}-{}-selectedOption", self.uid)
    }
}
