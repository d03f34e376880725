//! fOS DOM - Document Object Model
//!
//! Arena-backed document tree with the pieces interactive widgets need:
//! form controls, class lists, geometry, selector queries, capture/bubble
//! event dispatch and a virtual-clock timer queue.

mod classlist;
mod document;
mod element;
mod geometry;
mod node;
mod operations;
mod timers;
mod tree;

pub mod events;
pub mod forms;

pub use classlist::ClassList;
pub use document::Document;
pub use element::Selector;
pub use events::{
    Event, EventDispatcher, EventPhase, EventType, Key, ListenerId, ListenerOptions,
    ListenerRegistry,
};
pub use forms::{LabelState, OptGroupState, OptionState, SelectState};
pub use geometry::{DOMRect, ElementGeometry};
pub use node::{Attribute, ElementData, ElementKind, Node, NodeData};
pub use operations::{DomError, DomResult};
pub use timers::{TimerId, TimerQueue};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}
