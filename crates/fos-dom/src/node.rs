//! DOM Node
//!
//! Nodes live in the tree arena and refer to each other by `NodeId`.
//! Elements carry an `ElementKind` so form controls can be told apart
//! without comparing tag names.

use crate::NodeId;
use crate::classlist::ClassList;
use crate::forms::{LabelState, OptGroupState, OptionState, SelectState};
use crate::geometry::ElementGeometry;

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// Children in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(data: ElementData) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Element(data),
        }
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Text(content.into()),
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::Document,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// What kind of element this is, with any control state it owns
#[derive(Debug, Clone, Default)]
pub enum ElementKind {
    #[default]
    Generic,
    Select(SelectState),
    Option(OptionState),
    OptGroup(OptGroupState),
    Label(LabelState),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Control state for form elements
    pub kind: ElementKind,
    /// Class list
    pub classes: ClassList,
    /// Layout and scroll state, written by the renderer
    pub geometry: ElementGeometry,
    attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self::with_kind(tag, ElementKind::Generic)
    }

    pub fn with_kind(tag: &str, kind: ElementKind) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            kind,
            classes: ClassList::new(),
            geometry: ElementGeometry::default(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        // Check if attribute already exists
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value;
                return;
            }
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value,
        });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(pos).value)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_overwrite_and_remove() {
        let mut elem = ElementData::new("DIV");
        assert_eq!(elem.tag, "div");

        elem.set_attr("role", "option");
        elem.set_attr("role", "group");
        assert_eq!(elem.get_attr("role"), Some("group"));
        assert_eq!(elem.attrs().count(), 1);

        assert_eq!(elem.remove_attr("role"), Some("group".to_string()));
        assert!(!elem.has_attr("role"));
        assert_eq!(elem.remove_attr("role"), None);
    }

    #[test]
    fn test_node_kinds() {
        let text = Node::text("hello");
        assert!(text.is_text());
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_element().is_none());

        let elem = Node::element(ElementData::new("span"));
        assert!(elem.is_element());
        assert!(!elem.parent.is_valid());
    }
}
