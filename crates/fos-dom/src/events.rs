//! DOM Events
//!
//! Event objects, listener bookkeeping and the capture/target/bubble
//! dispatch algorithm. Handlers are opaque to this crate: the dispatcher
//! hands each matching handler back to its owner to run.

use crate::{DomTree, NodeId};

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    MouseDown,
    Click,
    MouseOver,
    KeyDown,
    Change,
    /// Application-defined event, e.g. `custom-select:open`
    Custom(&'static str),
}

impl EventType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::Click => "click",
            Self::MouseOver => "mouseover",
            Self::KeyDown => "keydown",
            Self::Change => "change",
            Self::Custom(name) => *name,
        }
    }
}

/// Keyboard key carried by `KeyDown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Space,
    Escape,
    Tab,
    Char(char),
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub phase: EventPhase,
    pub bubbles: bool,
    pub cancelable: bool,
    pub key: Option<Key>,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    /// Create an event with the usual flags for its type
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        let (bubbles, cancelable) = match event_type {
            EventType::MouseDown | EventType::Click | EventType::MouseOver | EventType::KeyDown => {
                (true, true)
            }
            EventType::Change => (true, false),
            EventType::Custom(_) => (false, false),
        };
        Self {
            event_type,
            target,
            current_target: None,
            phase: EventPhase::None,
            bubbles,
            cancelable,
            key: None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Create a custom event
    pub fn custom(name: &'static str, target: NodeId, bubbles: bool, cancelable: bool) -> Self {
        let mut event = Self::new(EventType::Custom(name), target);
        event.bubbles = bubbles;
        event.cancelable = cancelable;
        event
    }

    /// Create a keydown event
    pub fn key_down(target: NodeId, key: Key) -> Self {
        let mut event = Self::new(EventType::KeyDown, target);
        event.key = Some(key);
        event
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop propagation and skip the remaining listeners on this node
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }
}

/// Listener identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Capture phase
    pub capture: bool,
    /// Once (auto-remove before the first call)
    pub once: bool,
}

impl ListenerOptions {
    pub const BUBBLE: Self = Self { capture: false, once: false };
    pub const CAPTURE: Self = Self { capture: true, once: false };

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

#[derive(Debug, Clone)]
struct Listener<H> {
    id: ListenerId,
    target: NodeId,
    event_type: EventType,
    options: ListenerOptions,
    handler: H,
}

/// Registered listeners, in registration order
#[derive(Debug)]
pub struct ListenerRegistry<H> {
    listeners: Vec<Listener<H>>,
    next_id: u64,
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }
}

impl<H: Clone> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add(
        &mut self,
        target: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        handler: H,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            target,
            event_type,
            options,
            handler,
        });
        id
    }

    /// Remove a listener, returns whether it was registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }

    /// Number of listeners for a target and type, both phases
    pub fn count(&self, target: NodeId, event_type: EventType) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.event_type == event_type)
            .count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Snapshot of the listeners to run on `target` in one phase
    pub fn matching(
        &self,
        target: NodeId,
        event_type: EventType,
        capture: bool,
    ) -> Vec<(ListenerId, ListenerOptions, H)> {
        self.listeners
            .iter()
            .filter(|l| {
                l.target == target && l.event_type == event_type && l.options.capture == capture
            })
            .map(|l| (l.id, l.options, l.handler.clone()))
            .collect()
    }
}

/// Event dispatcher. Implementors own the tree, the listeners and whatever
/// state the handlers act on; `dispatch_event` drives the phases.
pub trait EventDispatcher {
    type Handler: Clone;

    fn dom(&self) -> &DomTree;

    fn listeners(&self) -> &ListenerRegistry<Self::Handler>;

    fn listeners_mut(&mut self) -> &mut ListenerRegistry<Self::Handler>;

    /// Run one handler
    fn handle_event(&mut self, handler: Self::Handler, event: &mut Event);

    /// Dispatch through capture, target and bubble phases. Returns false
    /// when a listener prevented the default action.
    fn dispatch_event(&mut self, mut event: Event) -> bool {
        let mut path = self.dom().ancestors(event.target);
        path.reverse();

        event.phase = EventPhase::Capturing;
        for &node in &path {
            self.invoke_listeners(node, &mut event, true);
            if event.is_propagation_stopped() {
                return !event.is_default_prevented();
            }
        }

        event.phase = EventPhase::AtTarget;
        let target = event.target;
        self.invoke_listeners(target, &mut event, true);
        if !event.is_propagation_stopped() {
            self.invoke_listeners(target, &mut event, false);
        }

        if event.bubbles {
            event.phase = EventPhase::Bubbling;
            for &node in path.iter().rev() {
                if event.is_propagation_stopped() {
                    break;
                }
                self.invoke_listeners(node, &mut event, false);
            }
        }

        event.current_target = None;
        event.phase = EventPhase::None;
        !event.is_default_prevented()
    }

    /// Run the listeners registered on `node` for the current phase
    fn invoke_listeners(&mut self, node: NodeId, event: &mut Event, capture: bool) {
        event.current_target = Some(node);
        let snapshot = self.listeners().matching(node, event.event_type, capture);
        for (id, options, handler) in snapshot {
            // Removed by an earlier listener of this dispatch
            if !self.listeners().contains(id) {
                continue;
            }
            if options.once {
                self.listeners_mut().remove(id);
            }
            self.handle_event(handler, event);
            if event.is_immediate_propagation_stopped() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records which listener ran, in order
    struct Recorder {
        tree: DomTree,
        listeners: ListenerRegistry<&'static str>,
        log: Vec<(&'static str, EventPhase)>,
    }

    impl EventDispatcher for Recorder {
        type Handler = &'static str;

        fn dom(&self) -> &DomTree {
            &self.tree
        }

        fn listeners(&self) -> &ListenerRegistry<&'static str> {
            &self.listeners
        }

        fn listeners_mut(&mut self) -> &mut ListenerRegistry<&'static str> {
            &mut self.listeners
        }

        fn handle_event(&mut self, handler: &'static str, event: &mut Event) {
            self.log.push((handler, event.phase));
            match handler {
                "stop" => event.stop_propagation(),
                "block" => {
                    event.prevent_default();
                    event.stop_immediate_propagation();
                }
                _ => {}
            }
        }
    }

    fn recorder() -> (Recorder, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(tree.root(), outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        let rec = Recorder {
            tree,
            listeners: ListenerRegistry::new(),
            log: Vec::new(),
        };
        (rec, outer, inner)
    }

    #[test]
    fn test_phase_order() {
        let (mut rec, outer, inner) = recorder();
        rec.listeners.add(outer, EventType::Click, ListenerOptions::BUBBLE, "outer-bubble");
        rec.listeners.add(outer, EventType::Click, ListenerOptions::CAPTURE, "outer-capture");
        rec.listeners.add(inner, EventType::Click, ListenerOptions::BUBBLE, "inner");

        assert!(rec.dispatch_event(Event::new(EventType::Click, inner)));
        assert_eq!(
            rec.log,
            vec![
                ("outer-capture", EventPhase::Capturing),
                ("inner", EventPhase::AtTarget),
                ("outer-bubble", EventPhase::Bubbling),
            ]
        );
    }

    #[test]
    fn test_capture_stop_skips_rest() {
        let (mut rec, outer, inner) = recorder();
        rec.listeners.add(outer, EventType::Click, ListenerOptions::CAPTURE, "stop");
        rec.listeners.add(inner, EventType::Click, ListenerOptions::BUBBLE, "inner");
        rec.listeners.add(outer, EventType::Click, ListenerOptions::BUBBLE, "outer");

        rec.dispatch_event(Event::new(EventType::Click, inner));
        assert_eq!(rec.log, vec![("stop", EventPhase::Capturing)]);
    }

    #[test]
    fn test_once_listener_runs_once_and_blocks() {
        let (mut rec, _outer, inner) = recorder();
        let root = rec.tree.root();
        rec.listeners.add(root, EventType::Click, ListenerOptions::CAPTURE.once(), "block");
        rec.listeners.add(inner, EventType::Click, ListenerOptions::BUBBLE, "inner");

        assert!(!rec.dispatch_event(Event::new(EventType::Click, inner)));
        assert_eq!(rec.log.len(), 1);
        assert_eq!(rec.listeners.len(), 1);

        assert!(rec.dispatch_event(Event::new(EventType::Click, inner)));
        assert_eq!(rec.log.last(), Some(&("inner", EventPhase::AtTarget)));
    }

    #[test]
    fn test_non_bubbling_custom_event() {
        let (mut rec, outer, inner) = recorder();
        rec.listeners.add(outer, EventType::Custom("ping"), ListenerOptions::BUBBLE, "outer");
        rec.listeners.add(inner, EventType::Custom("ping"), ListenerOptions::BUBBLE, "inner");

        rec.dispatch_event(Event::custom("ping", inner, false, false));
        assert_eq!(rec.log, vec![("inner", EventPhase::AtTarget)]);
    }

    #[test]
    fn test_prevent_default_needs_cancelable() {
        let mut event = Event::new(EventType::Change, NodeId::ROOT);
        event.prevent_default();
        assert!(!event.is_default_prevented());

        let mut event = Event::new(EventType::MouseDown, NodeId::ROOT);
        event.prevent_default();
        assert!(event.is_default_prevented());
    }
}
