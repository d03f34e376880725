//! Structural edits applied to both trees
//!
//! Each edit validates its arguments before touching either tree, so a
//! rejected edit leaves the native and mirror trees as they were.

use fos_dom::{DomError, NodeId};

use crate::host::SelectHost;
use crate::mirror::EntryKind;
use crate::state::WidgetId;
use crate::{SelectError, SelectResult};

impl SelectHost {
    /// Append entries to the select, or to one of its groups. With
    /// `commit` false the entries are already in the native tree and only
    /// their mirrors are built.
    pub(crate) fn append_entries(
        &mut self,
        id: WidgetId,
        entries: &[NodeId],
        commit: bool,
        target: Option<NodeId>,
    ) -> SelectResult<Vec<NodeId>> {
        let mut unique: Vec<NodeId> = Vec::with_capacity(entries.len());
        for &entry in entries {
            if !unique.contains(&entry) {
                unique.push(entry);
            }
        }
        let entries = unique.as_slice();
        let widget = self.widget(id)?;
        let (native, panel) = (widget.native, widget.panel);
        let tree = self.tree();

        let (native_parent, mirror_parent) = match target {
            None => (native, panel),
            Some(t) if t == native => (native, panel),
            Some(t) if tree.is_optgroup(t) && tree.contains(native, t) => {
                let mirror = widget
                    .links
                    .mirror_of(t)
                    .ok_or(SelectError::InvalidEntryKind(t))?;
                (t, mirror)
            }
            Some(t) => return Err(SelectError::InvalidEntryKind(t)),
        };

        self.validate_entries(entries)?;
        if native_parent != native {
            // Groups do not nest
            if let Some(&group) = entries.iter().find(|&&e| tree.is_optgroup(e)) {
                return Err(SelectError::InvalidEntryKind(group));
            }
        }
        if let Some(&entry) = entries.iter().find(|&&e| tree.contains(e, native_parent)) {
            return Err(DomError::HierarchyRequest {
                parent: native_parent,
                child: entry,
            }
            .into());
        }

        let previous_owners = self.release_foreign(id, entries)?;
        if commit {
            for &entry in entries {
                self.document.tree.append_child(native_parent, entry)?;
            }
        }
        let mirrors = self.build_mirrors(id, entries)?;
        for mirror in mirrors {
            // A later entry may have pulled an earlier mirror apart
            if self.widget(id)?.links.native_of(mirror).is_some() {
                self.document.tree.append_child(mirror_parent, mirror)?;
            }
        }
        for owner in previous_owners {
            self.sync_from_native(owner)?;
        }
        tracing::debug!("{} appended {} entries under {}", id, entries.len(), native_parent);
        Ok(unique)
    }

    /// Insert `entry` before `target`, an option or group of this select
    pub(crate) fn insert_entry_before(
        &mut self,
        id: WidgetId,
        entry: NodeId,
        target: NodeId,
    ) -> SelectResult<NodeId> {
        let widget = self.widget(id)?;
        let native = widget.native;
        let tree = self.tree();

        if target == native || EntryKind::of(tree, target).is_none() || !tree.contains(native, target)
        {
            return Err(SelectError::InvalidEntryKind(target));
        }
        self.validate_entries(&[entry])?;
        if entry == target {
            return Ok(entry);
        }
        let target_parent = tree
            .parent(target)
            .ok_or(SelectError::InvalidEntryKind(target))?;
        if tree.is_optgroup(entry) && tree.is_optgroup(target_parent) {
            return Err(SelectError::InvalidEntryKind(entry));
        }
        if tree.contains(entry, target) {
            return Err(DomError::HierarchyRequest {
                parent: target_parent,
                child: entry,
            }
            .into());
        }
        let target_mirror = widget
            .links
            .mirror_of(target)
            .ok_or(SelectError::InvalidEntryKind(target))?;

        let previous_owners = self.release_foreign(id, &[entry])?;
        let mirror = self
            .build_mirrors(id, &[entry])?
            .pop()
            .ok_or(SelectError::InvalidEntryKind(entry))?;
        let tree = &mut self.document.tree;
        let mirror_parent = tree
            .parent(target_mirror)
            .ok_or(SelectError::InvalidEntryKind(target))?;
        tree.insert_before(mirror_parent, mirror, Some(target_mirror))?;
        tree.insert_before(target_parent, entry, Some(target))?;
        for owner in previous_owners {
            self.sync_from_native(owner)?;
        }
        tracing::debug!("{} inserted {} before {}", id, entry, target);
        Ok(entry)
    }

    /// Unlink entries that another widget currently owns and drop their
    /// mirrors from that widget's panel. Returns the widgets to resync once
    /// the native move is done.
    fn release_foreign(
        &mut self,
        id: WidgetId,
        entries: &[NodeId],
    ) -> SelectResult<Vec<WidgetId>> {
        let mut owners = Vec::new();
        for &entry in entries {
            let Some(owner) = self
                .tree()
                .owner_select(entry)
                .and_then(|select| self.widget_for(select))
            else {
                continue;
            };
            if owner == id {
                continue;
            }
            if let Some(mirror) = self.unlink_subtree(owner, entry)? {
                self.document.tree.detach(mirror);
            }
            tracing::debug!("{} released {} to {}", owner, entry, id);
            if !owners.contains(&owner) {
                owners.push(owner);
            }
        }
        Ok(owners)
    }

    /// Remove an option or group from both trees
    pub(crate) fn remove_entry(&mut self, id: WidgetId, entry: NodeId) -> SelectResult<NodeId> {
        let native = self.widget(id)?.native;
        let tree = self.tree();
        if entry == native || EntryKind::of(tree, entry).is_none() || !tree.contains(native, entry) {
            return Err(SelectError::InvalidEntryKind(entry));
        }
        let parent = tree
            .parent(entry)
            .ok_or(SelectError::InvalidEntryKind(entry))?;

        if let Some(mirror) = self.unlink_subtree(id, entry)? {
            self.document.tree.detach(mirror);
        }
        self.document.tree.remove_child(parent, entry)?;
        // The native select may have lost its selected option
        self.sync_from_native(id)?;
        tracing::debug!("{} removed {}", id, entry);
        Ok(entry)
    }

    /// Remove every entry, returning the detached native entries
    pub(crate) fn empty_entries(&mut self, id: WidgetId) -> SelectResult<Vec<NodeId>> {
        let widget = self.widget(id)?;
        let (native, panel) = (widget.native, widget.panel);
        let removed: Vec<NodeId> = self
            .tree()
            .element_children(native)
            .into_iter()
            .filter(|&c| EntryKind::of(self.tree(), c).is_some())
            .collect();

        for &entry in &removed {
            self.unlink_subtree(id, entry)?;
            self.document.tree.detach(entry);
        }
        for mirror in self.tree().children(panel).to_vec() {
            self.document.tree.detach(mirror);
        }
        self.set_selection(id, None)?;
        tracing::debug!("{} emptied, {} entries removed", id, removed.len());
        Ok(removed)
    }
}
