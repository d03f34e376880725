//! Select host
//!
//! Owns the document, the listener registry, the timer queue and every
//! widget on the page. Input is fed in through the methods here and routed
//! through the DOM dispatch algorithm to the widget handlers.

use std::fmt;
use std::rc::Rc;

use fos_dom::{
    Document, DomTree, Event, EventDispatcher, EventType, Key, ListenerId, ListenerOptions,
    ListenerRegistry, NodeId, TimerQueue,
};

use crate::handle::CustomSelect;
use crate::state::{Widget, WidgetId};
use crate::uid::UidGenerator;
use crate::{SelectError, SelectResult};

/// Widget interaction a listener is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Click on the opener
    TogglePanel,
    /// Click inside the panel
    SelectTarget,
    /// Click on the native select
    FocusWrapper,
    /// Pointer over a panel entry
    HoverOption,
    /// Focused entry landed outside the visible panel
    ScrollToFocused,
    /// `change` on the native select
    NativeChange,
    /// Keydown on the wrapper
    KeyDown,
    /// Document-level pointer-down while open
    OutsidePointerDown,
}

/// Listener payload
#[derive(Clone)]
pub enum Handler {
    Widget(WidgetId, Binding),
    /// Swallows the event
    Block,
    /// Application listener
    Callback(Rc<dyn Fn(&mut Event)>),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Widget(id, binding) => f.debug_tuple("Widget").field(id).field(binding).finish(),
            Self::Block => f.write_str("Block"),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerTask {
    ResetSearch(WidgetId),
}

/// Candidates for enhancement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(NodeId),
    Selector(String),
    Nodes(Vec<NodeId>),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Vec<NodeId>> for Target {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<&[NodeId]> for Target {
    fn from(nodes: &[NodeId]) -> Self {
        Self::Nodes(nodes.to_vec())
    }
}

/// Document plus the widgets living in it
#[derive(Debug)]
pub struct SelectHost {
    pub(crate) document: Document,
    pub(crate) listeners: ListenerRegistry<Handler>,
    pub(crate) timers: TimerQueue<TimerTask>,
    pub(crate) widgets: Vec<Option<Widget>>,
    /// The one widget allowed to be open
    pub(crate) open_widget: Option<WidgetId>,
    uids: UidGenerator,
}

impl SelectHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: ListenerRegistry::new(),
            timers: TimerQueue::new(),
            widgets: Vec::new(),
            open_widget: None,
            uids: UidGenerator::from_time(),
        }
    }

    /// Use a deterministic uid sequence
    pub fn with_uid_seed(mut self, seed: u64) -> Self {
        self.uids = UidGenerator::seeded(seed);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tree(&self) -> &DomTree {
        &self.document.tree
    }

    /// Handle for a live widget
    pub fn select(&mut self, id: WidgetId) -> SelectResult<CustomSelect<'_>> {
        CustomSelect::new(self, id)
    }

    /// Live widgets, in creation order
    pub fn widgets(&self) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .enumerate()
            .filter(|(_, w)| w.is_some())
            .map(|(i, _)| WidgetId(i))
            .collect()
    }

    /// Widget whose wrapper contains `node`
    pub fn widget_for(&self, node: NodeId) -> Option<WidgetId> {
        self.widgets.iter().enumerate().find_map(|(i, w)| {
            w.as_ref()
                .filter(|w| w.native == node || self.tree().contains(w.container, node))
                .map(|_| WidgetId(i))
        })
    }

    /// Widget whose panel is currently open
    pub fn open_instance(&self) -> Option<WidgetId> {
        self.open_widget
    }

    pub(crate) fn widget(&self, id: WidgetId) -> SelectResult<&Widget> {
        self.widgets
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(SelectError::UnknownWidget(id))
    }

    pub(crate) fn widget_mut(&mut self, id: WidgetId) -> SelectResult<&mut Widget> {
        self.widgets
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SelectError::UnknownWidget(id))
    }

    /// Uid not used by any live widget
    pub(crate) fn next_uid(&mut self) -> String {
        loop {
            let uid = self.uids.next_uid();
            let taken = self.widgets.iter().flatten().any(|w| w.ids.uid() == uid);
            if !taken {
                return uid;
            }
        }
    }

    // === Listeners ===

    /// Register an application listener
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        callback: impl Fn(&mut Event) + 'static,
    ) -> ListenerId {
        self.listeners
            .add(target, event_type, options, Handler::Callback(Rc::new(callback)))
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Listeners of any kind on `target` for `event_type`
    pub fn listener_count(&self, target: NodeId, event_type: EventType) -> usize {
        self.listeners.count(target, event_type)
    }

    // === Input ===

    /// Dispatch an arbitrary event. Returns false if the default was
    /// prevented.
    pub fn dispatch(&mut self, event: Event) -> bool {
        self.dispatch_event(event)
    }

    pub fn pointer_down(&mut self, target: NodeId) -> bool {
        self.dispatch_event(Event::new(EventType::MouseDown, target))
    }

    pub fn click(&mut self, target: NodeId) -> bool {
        self.dispatch_event(Event::new(EventType::Click, target))
    }

    /// Pointer-down followed by click, like a real tap
    pub fn tap(&mut self, target: NodeId) {
        self.pointer_down(target);
        self.click(target);
    }

    pub fn mouse_over(&mut self, target: NodeId) -> bool {
        self.dispatch_event(Event::new(EventType::MouseOver, target))
    }

    pub fn key_down(&mut self, target: NodeId, key: Key) -> bool {
        self.dispatch_event(Event::key_down(target, key))
    }

    // === Time ===

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// Advance the virtual clock and run due timers
    pub fn advance_time(&mut self, ms: u64) {
        self.timers.advance(ms);
        for (timer, task) in self.timers.take_ready() {
            match task {
                TimerTask::ResetSearch(id) => {
                    let Ok(widget) = self.widget_mut(id) else {
                        continue;
                    };
                    if widget.state.search_timer == Some(timer) {
                        widget.state.search.clear();
                        widget.state.search_timer = None;
                        tracing::trace!("Search buffer of {} reset", id);
                    }
                }
            }
        }
    }
}

impl EventDispatcher for SelectHost {
    type Handler = Handler;

    fn dom(&self) -> &DomTree {
        &self.document.tree
    }

    fn listeners(&self) -> &ListenerRegistry<Handler> {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ListenerRegistry<Handler> {
        &mut self.listeners
    }

    fn handle_event(&mut self, handler: Handler, event: &mut Event) {
        match handler {
            Handler::Widget(id, binding) => {
                if let Err(err) = self.run_binding(id, binding, event) {
                    tracing::warn!("{:?} on {} failed: {}", binding, id, err);
                }
            }
            Handler::Block => {
                event.stop_immediate_propagation();
                event.prevent_default();
            }
            Handler::Callback(callback) => callback(event),
        }
    }
}
