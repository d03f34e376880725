//! Widget configuration
//!
//! Presentation class names and the type-ahead reset delay. Every key is
//! optional when deserializing; missing keys keep their default.

use serde::{Deserialize, Serialize};

/// Per-widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectConfig {
    pub container_class: String,
    pub opener_class: String,
    pub panel_class: String,
    pub option_class: String,
    pub optgroup_class: String,
    pub is_selected_class: String,
    pub has_focus_class: String,
    pub is_disabled_class: String,
    pub is_open_class: String,
    /// Idle time after which the type-ahead buffer empties
    pub search_reset_ms: u64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            container_class: "custom-select-container".into(),
            opener_class: "custom-select-opener".into(),
            panel_class: "custom-select-panel".into(),
            option_class: "custom-select-option".into(),
            optgroup_class: "custom-select-optgroup".into(),
            is_selected_class: "is-selected".into(),
            has_focus_class: "has-focus".into(),
            is_disabled_class: "is-disabled".into(),
            is_open_class: "is-open".into(),
            search_reset_ms: 1500,
        }
    }
}

impl SelectConfig {
    /// Parse overrides from JSON, e.g. `{"isOpenClass": "open"}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
