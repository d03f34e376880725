//! Document - High-level document API

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Element holding keyboard focus
    active_element: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with html/head/body
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under the document cannot violate the hierarchy rules.
        let root = tree.root();
        let _ = tree.append_child(root, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
            active_element: None,
        }
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the DOM tree
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// Query all connected elements by selector
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.tree.query_selector_all(self.tree.root(), selector)
    }

    /// First `<label for=...>` naming the control's id
    pub fn label_for(&self, control: NodeId) -> Option<NodeId> {
        let id = self.tree.element(control)?.id()?;
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| {
                self.tree
                    .label_state(n)
                    .and_then(|l| l.html_for.as_deref())
                    == Some(id)
            })
    }

    /// Element with keyboard focus
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move keyboard focus
    pub fn focus(&mut self, id: NodeId) {
        if self.tree.is_element(id) {
            self.active_element = Some(id);
        }
    }

    /// Clear keyboard focus
    pub fn blur(&mut self) {
        self.active_element = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::SelectState;

    #[test]
    fn test_document_structure() {
        let doc = Document::new();
        let tree = doc.tree();
        assert_eq!(tree.parent(doc.document_element()), Some(tree.root()));
        assert_eq!(tree.children(doc.document_element()), &[doc.head(), doc.body()]);
    }

    #[test]
    fn test_label_for() {
        let mut doc = Document::new();
        let body = doc.body();
        let label = doc.tree.create_label(Some("fruit"));
        let select = doc.tree.create_select(SelectState::default());
        doc.tree.set_attribute(select, "id", "fruit");
        doc.tree.append_child(body, label).unwrap();
        doc.tree.append_child(body, select).unwrap();

        assert_eq!(doc.get_element_by_id("fruit"), Some(select));
        assert_eq!(doc.label_for(select), Some(label));

        let anonymous = doc.tree.create_select(SelectState::default());
        assert_eq!(doc.label_for(anonymous), None);
    }

    #[test]
    fn test_focus_only_elements() {
        let mut doc = Document::new();
        let text = doc.tree.create_text("x");
        doc.focus(text);
        assert_eq!(doc.active_element(), None);
        doc.focus(doc.body());
        assert_eq!(doc.active_element(), Some(doc.body()));
        doc.blur();
        assert_eq!(doc.active_element(), None);
    }
}
