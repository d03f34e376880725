//! Per-widget state

use std::fmt;
use std::rc::Rc;

use fos_dom::{ListenerId, NodeId, TimerId};

use crate::aria::IdNamespace;
use crate::config::SelectConfig;
use crate::mirror::LinkTable;

/// Handle to a widget owned by a `SelectHost`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) usize);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget-{}", self.0)
    }
}

/// Open/closed, with the outside pointer-down listener that only exists
/// while open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum OpenState {
    #[default]
    Closed,
    Open { outside: ListenerId },
}

#[derive(Debug, Default)]
pub(crate) struct WidgetState {
    pub open: OpenState,
    /// Mirror option with the focus highlight
    pub focused: Option<NodeId>,
    /// Mirror option shown in the opener
    pub selected: Option<NodeId>,
    /// Type-ahead buffer, uppercased
    pub search: String,
    pub search_timer: Option<TimerId>,
}

impl WidgetState {
    pub fn is_open(&self) -> bool {
        matches!(self.open, OpenState::Open { .. })
    }
}

/// Label bound to the widget, with the id it had before
#[derive(Debug, Clone)]
pub(crate) struct BoundLabel {
    pub node: NodeId,
    pub previous_id: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Widget {
    pub config: Rc<SelectConfig>,
    pub ids: IdNamespace,
    pub native: NodeId,
    pub container: NodeId,
    pub opener: NodeId,
    /// Span inside the opener holding the selected text
    pub opener_text: NodeId,
    pub panel: NodeId,
    pub label: Option<BoundLabel>,
    /// `tabindex` of the native select before enhancement
    pub native_tabindex: Option<String>,
    pub links: LinkTable,
    /// Interaction listeners, empty while disabled
    pub bindings: Vec<ListenerId>,
    pub state: WidgetState,
}
