//! Mirror tree
//!
//! Display nodes built from the native option tree, and the side-table
//! linking each native entry to its mirror. The table is the only place the
//! link lives; nodes carry no back-references.

use std::collections::HashMap;
use std::rc::Rc;

use fos_dom::{DomTree, NodeId};

use crate::aria::{self, AriaRole};
use crate::host::SelectHost;
use crate::state::WidgetId;
use crate::{SelectError, SelectResult};

/// Native entry kinds a select may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Option,
    Group,
}

impl EntryKind {
    pub fn of(tree: &DomTree, node: NodeId) -> Option<Self> {
        if tree.is_option(node) {
            Some(Self::Option)
        } else if tree.is_optgroup(node) {
            Some(Self::Group)
        } else {
            None
        }
    }
}

/// Bidirectional native/mirror links
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    to_mirror: HashMap<NodeId, NodeId>,
    to_native: HashMap<NodeId, NodeId>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a pair, dropping any older link of either side
    pub fn link(&mut self, native: NodeId, mirror: NodeId) {
        if let Some(old_mirror) = self.to_mirror.insert(native, mirror) {
            self.to_native.remove(&old_mirror);
        }
        if let Some(old_native) = self.to_native.insert(mirror, native) {
            if old_native != native {
                self.to_mirror.remove(&old_native);
            }
        }
    }

    /// Remove the link of a native entry, returning its mirror
    pub fn unlink(&mut self, native: NodeId) -> Option<NodeId> {
        let mirror = self.to_mirror.remove(&native)?;
        self.to_native.remove(&mirror);
        Some(mirror)
    }

    pub fn mirror_of(&self, native: NodeId) -> Option<NodeId> {
        self.to_mirror.get(&native).copied()
    }

    pub fn native_of(&self, mirror: NodeId) -> Option<NodeId> {
        self.to_native.get(&mirror).copied()
    }

    pub fn len(&self) -> usize {
        self.to_mirror.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_mirror.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_mirror.clear();
        self.to_native.clear();
    }
}

impl SelectHost {
    /// Check that every entry is an option, or a group holding only options
    pub(crate) fn validate_entries(&self, entries: &[NodeId]) -> SelectResult<()> {
        let tree = self.tree();
        for &entry in entries {
            match EntryKind::of(tree, entry) {
                Some(EntryKind::Option) => {}
                Some(EntryKind::Group) => {
                    if let Some(child) = tree
                        .element_children(entry)
                        .into_iter()
                        .find(|&c| !tree.is_option(c))
                    {
                        return Err(SelectError::InvalidEntryKind(child));
                    }
                }
                None => return Err(SelectError::InvalidEntryKind(entry)),
            }
        }
        Ok(())
    }

    /// Build detached mirrors for `entries`, linking each pair. Nothing is
    /// built unless every entry is valid.
    pub(crate) fn build_mirrors(
        &mut self,
        id: WidgetId,
        entries: &[NodeId],
    ) -> SelectResult<Vec<NodeId>> {
        self.validate_entries(entries)?;
        entries
            .iter()
            .map(|&entry| self.build_entry(id, entry))
            .collect()
    }

    fn build_entry(&mut self, id: WidgetId, entry: NodeId) -> SelectResult<NodeId> {
        self.forget_mirror(id, entry)?;
        let config = Rc::clone(&self.widget(id)?.config);

        if let Some(group) = self.tree().optgroup_state(entry) {
            let label = group.label.clone();
            let tree = &mut self.document.tree;
            let mirror = tree.create_element("div");
            tree.add_class(mirror, &config.optgroup_class);
            tree.set_attribute(mirror, "data-label", label.clone());
            tree.set_attribute(mirror, aria::ROLE, AriaRole::Group.as_str());
            tree.set_attribute(mirror, aria::LABEL, label);
            self.widget_mut(id)?.links.link(entry, mirror);

            // Text and other stray nodes inside a group are not mirrored
            for child in self.tree().element_children(entry) {
                let child_mirror = self.build_entry(id, child)?;
                self.document.tree.append_child(mirror, child_mirror)?;
            }
            return Ok(mirror);
        }

        let option = self
            .tree()
            .option_state(entry)
            .cloned()
            .ok_or(SelectError::InvalidEntryKind(entry))?;
        let disabled = self.tree().option_is_disabled(entry);
        let tree = &mut self.document.tree;
        let mirror = tree.create_element("div");
        tree.add_class(mirror, &config.option_class);
        tree.set_text_content(mirror, &option.text);
        tree.set_attribute(mirror, "data-value", option.value);
        tree.set_attribute(mirror, aria::ROLE, AriaRole::Option.as_str());
        if disabled {
            tree.add_class(mirror, &config.is_disabled_class);
            tree.set_attribute(mirror, aria::DISABLED, "true");
        }
        self.widget_mut(id)?.links.link(entry, mirror);

        if option.selected {
            self.set_selection(id, Some(mirror))?;
        }
        Ok(mirror)
    }

    /// Unlink a native entry and its descendants, returning the entry's
    /// mirror
    pub(crate) fn unlink_subtree(
        &mut self,
        id: WidgetId,
        native: NodeId,
    ) -> SelectResult<Option<NodeId>> {
        let mut natives = vec![native];
        natives.extend(self.tree().descendants(native));
        let links = &mut self.widget_mut(id)?.links;
        let mirror = links.mirror_of(native);
        for n in natives {
            links.unlink(n);
        }
        Ok(mirror)
    }

    /// Drop the mirror of an entry that is about to be rebuilt
    fn forget_mirror(&mut self, id: WidgetId, native: NodeId) -> SelectResult<()> {
        let Some(mirror) = self.unlink_subtree(id, native)? else {
            return Ok(());
        };
        self.document.tree.detach(mirror);

        let state = &self.widget(id)?.state;
        let (selected, focused) = (state.selected, state.focused);
        if selected.is_some_and(|s| self.tree().contains(mirror, s)) {
            self.set_selection(id, None)?;
        } else if focused.is_some_and(|f| self.tree().contains(mirror, f)) {
            self.set_focus(id, selected)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(n: usize) -> Vec<NodeId> {
        let mut tree = DomTree::new();
        (0..n).map(|_| tree.create_element("div")).collect()
    }

    #[test]
    fn test_link_both_ways() {
        let n = nodes(2);
        let mut links = LinkTable::new();
        links.link(n[0], n[1]);
        assert_eq!(links.mirror_of(n[0]), Some(n[1]));
        assert_eq!(links.native_of(n[1]), Some(n[0]));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_relink_drops_stale_pair() {
        let n = nodes(3);
        let mut links = LinkTable::new();
        links.link(n[0], n[1]);
        links.link(n[0], n[2]);
        assert_eq!(links.native_of(n[1]), None);
        assert_eq!(links.native_of(n[2]), Some(n[0]));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_unlink() {
        let n = nodes(2);
        let mut links = LinkTable::new();
        links.link(n[0], n[1]);
        assert_eq!(links.unlink(n[0]), Some(n[1]));
        assert_eq!(links.unlink(n[0]), None);
        assert!(links.is_empty());
    }

    #[test]
    fn test_entry_kind() {
        let mut tree = DomTree::new();
        let option = tree.create_option(fos_dom::OptionState::new("a", "A"));
        let group = tree.create_optgroup("G");
        let div = tree.create_element("div");
        assert_eq!(EntryKind::of(&tree, option), Some(EntryKind::Option));
        assert_eq!(EntryKind::of(&tree, group), Some(EntryKind::Group));
        assert_eq!(EntryKind::of(&tree, div), None);
    }
}
