//! Element Query and Methods
//!
//! querySelectorAll, matches and closest over compound selectors
//! (`tag`, `#id`, `.class`, `*`) joined by the descendant combinator,
//! with comma-separated alternatives.

use crate::{DomTree, NodeId};

/// Compound selector such as `select.fancy#country`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(s: &str) -> Option<Self> {
        let is_marker = |c: char| c == '.' || c == '#';
        let mut compound = Self::default();

        let end = s.find(is_marker).unwrap_or(s.len());
        let (tag, mut rest) = s.split_at(end);
        if !tag.is_empty() && tag != "*" {
            if !is_ident(tag) {
                return None;
            }
            compound.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(is_marker).unwrap_or(body.len());
            let (name, tail) = body.split_at(end);
            if !is_ident(name) {
                return None;
            }
            if marker == '#' {
                compound.id = Some(name.to_string());
            } else {
                compound.classes.push(name.to_string());
            }
            rest = tail;
        }
        Some(compound)
    }

    fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        let Some(elem) = tree.element(id) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != elem.tag) {
            return false;
        }
        if self.id.as_deref().is_some_and(|want| elem.id() != Some(want)) {
            return false;
        }
        self.classes.iter().all(|c| elem.classes.contains(c))
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parsed selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Alternatives; each is a descendant chain, outermost first
    alternatives: Vec<Vec<Compound>>,
}

impl Selector {
    /// Parse a selector string. Returns None for empty or unsupported input.
    pub fn parse(s: &str) -> Option<Self> {
        let mut alternatives = Vec::new();
        for part in s.split(',') {
            let chain: Option<Vec<Compound>> = part.split_whitespace().map(Compound::parse).collect();
            let chain = chain?;
            if chain.is_empty() {
                return None;
            }
            alternatives.push(chain);
        }
        if alternatives.is_empty() {
            return None;
        }
        Some(Self { alternatives })
    }

    /// Check if element matches
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.alternatives.iter().any(|chain| Self::chain_matches(chain, tree, id))
    }

    fn chain_matches(chain: &[Compound], tree: &DomTree, id: NodeId) -> bool {
        let Some((last, outer)) = chain.split_last() else {
            return false;
        };
        if !last.matches(tree, id) {
            return false;
        }
        // Greedy nearest-ancestor matching is exact for descendant-only chains.
        let mut ancestors = tree.ancestors(id).into_iter();
        outer
            .iter()
            .rev()
            .all(|compound| ancestors.any(|a| compound.matches(tree, a)))
    }
}

impl DomTree {
    /// Query all elements under `root` (exclusive) by selector, in document order
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// Query single element by selector
    pub fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_selector_all(root, selector).into_iter().next()
    }

    /// Check if element matches selector
    pub fn matches(&self, id: NodeId, selector: &str) -> bool {
        Selector::parse(selector).is_some_and(|s| s.matches(self, id))
    }

    /// Find closest inclusive ancestor matching selector
    pub fn closest(&self, id: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&a| selector.matches(self, a))
    }
}
