//! Select and Option Element Implementation
//!
//! Single-select selectedness over the option tree. There is no implicit
//! "first option wins" rule: a select with no flagged option has no value.

use super::{LabelState, OptGroupState, OptionState, SelectState};
use crate::{DomTree, ElementData, ElementKind, NodeId};

impl DomTree {
    /// Create a detached `<select>`
    pub fn create_select(&mut self, state: SelectState) -> NodeId {
        self.create_element_with(ElementData::with_kind("select", ElementKind::Select(state)))
    }

    /// Create a detached `<option>`
    pub fn create_option(&mut self, state: OptionState) -> NodeId {
        self.create_element_with(ElementData::with_kind("option", ElementKind::Option(state)))
    }

    /// Create a detached `<optgroup>`
    pub fn create_optgroup(&mut self, label: &str) -> NodeId {
        let state = OptGroupState {
            label: label.to_string(),
            disabled: false,
        };
        self.create_element_with(ElementData::with_kind("optgroup", ElementKind::OptGroup(state)))
    }

    /// Create a detached `<label>`, optionally with a `for` target
    pub fn create_label(&mut self, html_for: Option<&str>) -> NodeId {
        let state = LabelState {
            html_for: html_for.map(str::to_string),
        };
        self.create_element_with(ElementData::with_kind("label", ElementKind::Label(state)))
    }

    pub fn select_state(&self, id: NodeId) -> Option<&SelectState> {
        match &self.element(id)?.kind {
            ElementKind::Select(s) => Some(s),
            _ => None,
        }
    }

    pub fn select_state_mut(&mut self, id: NodeId) -> Option<&mut SelectState> {
        match &mut self.element_mut(id)?.kind {
            ElementKind::Select(s) => Some(s),
            _ => None,
        }
    }

    pub fn option_state(&self, id: NodeId) -> Option<&OptionState> {
        match &self.element(id)?.kind {
            ElementKind::Option(o) => Some(o),
            _ => None,
        }
    }

    pub fn option_state_mut(&mut self, id: NodeId) -> Option<&mut OptionState> {
        match &mut self.element_mut(id)?.kind {
            ElementKind::Option(o) => Some(o),
            _ => None,
        }
    }

    pub fn optgroup_state(&self, id: NodeId) -> Option<&OptGroupState> {
        match &self.element(id)?.kind {
            ElementKind::OptGroup(g) => Some(g),
            _ => None,
        }
    }

    pub fn optgroup_state_mut(&mut self, id: NodeId) -> Option<&mut OptGroupState> {
        match &mut self.element_mut(id)?.kind {
            ElementKind::OptGroup(g) => Some(g),
            _ => None,
        }
    }

    pub fn label_state(&self, id: NodeId) -> Option<&LabelState> {
        match &self.element(id)?.kind {
            ElementKind::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_select(&self, id: NodeId) -> bool {
        self.select_state(id).is_some()
    }

    pub fn is_option(&self, id: NodeId) -> bool {
        self.option_state(id).is_some()
    }

    pub fn is_optgroup(&self, id: NodeId) -> bool {
        self.optgroup_state(id).is_some()
    }

    pub fn is_label(&self, id: NodeId) -> bool {
        self.label_state(id).is_some()
    }

    /// Options of a select (or group) in tree order, group members included
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.children(select) {
            if self.is_option(*child) {
                out.push(*child);
            } else if self.is_optgroup(*child) {
                out.extend(
                    self.children(*child)
                        .iter()
                        .copied()
                        .filter(|&c| self.is_option(c)),
                );
            }
        }
        out
    }

    /// The select an option or group belongs to
    pub fn owner_select(&self, entry: NodeId) -> Option<NodeId> {
        self.ancestors(entry).into_iter().take(2).find(|&a| self.is_select(a))
    }

    /// Currently selected option
    pub fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        self.options(select)
            .into_iter()
            .find(|&o| self.option_state(o).is_some_and(|s| s.selected))
    }

    /// Index of the selected option among `options(select)`
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        self.options(select)
            .into_iter()
            .position(|o| self.option_state(o).is_some_and(|s| s.selected))
    }

    /// Value of the selected option, empty when nothing is selected
    pub fn select_value(&self, select: NodeId) -> String {
        self.selected_option(select)
            .and_then(|o| self.option_state(o))
            .map(|s| s.value.clone())
            .unwrap_or_default()
    }

    /// Set an option's selectedness. Selecting deselects every other
    /// option of a single select.
    pub fn set_option_selected(&mut self, option: NodeId, selected: bool) {
        if !self.is_option(option) {
            return;
        }
        if selected {
            if let Some(select) = self.owner_select(option) {
                if !self.select_state(select).is_some_and(|s| s.multiple) {
                    for other in self.options(select) {
                        if other != option {
                            if let Some(state) = self.option_state_mut(other) {
                                state.selected = false;
                            }
                        }
                    }
                }
            }
        }
        if let Some(state) = self.option_state_mut(option) {
            state.selected = selected;
        }
    }

    /// Option disabled directly or through its group
    pub fn option_is_disabled(&self, option: NodeId) -> bool {
        let Some(state) = self.option_state(option) else {
            return false;
        };
        state.disabled
            || self
                .parent(option)
                .and_then(|p| self.optgroup_state(p))
                .is_some_and(|g| g.disabled)
    }

    /// After inserting `inserted` into a single select, the last selected
    /// option of the inserted subtree becomes the only selected one.
    pub(crate) fn normalize_selectedness(&mut self, inserted: NodeId) {
        let keep = if self.is_option(inserted) {
            Some(inserted).filter(|&o| self.option_state(o).is_some_and(|s| s.selected))
        } else if self.is_optgroup(inserted) {
            self.options(inserted)
                .into_iter()
                .rev()
                .find(|&o| self.option_state(o).is_some_and(|s| s.selected))
        } else {
            None
        };
        if let Some(option) = keep {
            self.set_option_selected(option, true);
        }
    }
}
