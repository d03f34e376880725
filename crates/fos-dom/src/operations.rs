//! DOM Node Operations
//!
//! Core node manipulation: appendChild, removeChild, insertBefore, replaceChild.

use crate::{DomTree, NodeData, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("hierarchy request error: cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Invalid node type
    #[error("invalid node type for {0}")]
    InvalidNodeType(NodeId),
    /// Node is not a child
    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}

impl DomTree {
    fn check_node(&self, id: NodeId) -> DomResult<()> {
        if self.get(id).is_some() {
            Ok(())
        } else {
            Err(DomError::NotFound(id))
        }
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check_node(parent)?;
        self.check_node(child)?;
        if matches!(self.get(child).map(|n| &n.data), Some(NodeData::Document)) {
            return Err(DomError::InvalidNodeType(child));
        }
        if self.get(parent).is_some_and(|n| n.is_text()) || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Detach a node from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        if let Some(n) = self.get_mut(id) {
            n.parent = NodeId::NONE;
        }
    }

    /// Append a child node, moving it if it is attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or at the end for `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
            if r == child {
                return Ok(child);
            }
        }

        self.detach(child);
        let index = match reference {
            Some(r) => self
                .children(parent)
                .iter()
                .position(|&c| c == r)
                .ok_or(DomError::NotAChild { parent, child: r })?,
            None => self.children(parent).len(),
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.insert(index, child);
        }
        if let Some(n) = self.get_mut(child) {
            n.parent = parent;
        }
        self.normalize_selectedness(child);
        tracing::trace!("Inserted {} under {} at {}", child, parent, index);
        Ok(child)
    }

    /// Remove a child node, returning it detached
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_node(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Put `new_child` where `old_child` is, returning the detached old child
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, new_child)?;
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child: old_child });
        }
        if new_child == old_child {
            return Ok(old_child);
        }

        self.detach(new_child);
        let index = self
            .children(parent)
            .iter()
            .position(|&c| c == old_child)
            .ok_or(DomError::NotAChild { parent, child: old_child })?;
        if let Some(p) = self.get_mut(parent) {
            p.children[index] = new_child;
        }
        if let Some(n) = self.get_mut(new_child) {
            n.parent = parent;
        }
        if let Some(n) = self.get_mut(old_child) {
            n.parent = NodeId::NONE;
        }
        self.normalize_selectedness(new_child);
        Ok(old_child)
    }
}
