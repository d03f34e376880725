//! Edge case tests for fos-dom
//!
//! Tree surgery, form state, selector queries and event dispatch through the
//! public API.

use fos_dom::{
    Document, DomError, DomTree, Event, EventDispatcher, EventPhase, EventType, ListenerOptions,
    ListenerRegistry, NodeId, OptionState, SelectState, TimerQueue,
};

// ============================================================================
// TREE SURGERY
// ============================================================================

#[test]
fn test_append_moves_node() {
    let mut tree = DomTree::new();
    let a = tree.create_element("div");
    let b = tree.create_element("div");
    let child = tree.create_element("span");
    tree.append_child(a, child).unwrap();
    tree.append_child(b, child).unwrap();

    assert!(tree.children(a).is_empty());
    assert_eq!(tree.children(b), &[child]);
    assert_eq!(tree.parent(child), Some(b));
}

#[test]
fn test_cannot_insert_ancestor() {
    let mut tree = DomTree::new();
    let outer = tree.create_element("div");
    let inner = tree.create_element("div");
    tree.append_child(outer, inner).unwrap();

    assert!(matches!(
        tree.append_child(inner, outer),
        Err(DomError::HierarchyRequest { .. })
    ));
    assert!(matches!(
        tree.append_child(outer, outer),
        Err(DomError::HierarchyRequest { .. })
    ));
}

#[test]
fn test_insert_before_foreign_reference() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let other = tree.create_element("div");
    let reference = tree.create_element("span");
    tree.append_child(other, reference).unwrap();
    let child = tree.create_element("span");

    assert_eq!(
        tree.insert_before(parent, child, Some(reference)),
        Err(DomError::NotAChild {
            parent,
            child: reference
        })
    );
    assert_eq!(tree.parent(child), None);
}

#[test]
fn test_replace_child_keeps_position() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let kids: Vec<NodeId> = (0..3)
        .map(|_| {
            let k = tree.create_element("p");
            tree.append_child(parent, k).unwrap();
            k
        })
        .collect();
    let wrapper = tree.create_element("section");

    assert_eq!(tree.replace_child(parent, wrapper, kids[1]).unwrap(), kids[1]);
    assert_eq!(tree.children(parent), &[kids[0], wrapper, kids[2]]);
    assert_eq!(tree.parent(kids[1]), None);
}

#[test]
fn test_detached_nodes_stay_usable() {
    let mut tree = DomTree::new();
    let parent = tree.create_element("div");
    let child = tree.create_element("span");
    tree.append_child(parent, child).unwrap();
    tree.remove_child(parent, child).unwrap();

    tree.set_attribute(child, "title", "still here");
    assert_eq!(tree.get_attribute(child, "title"), Some("still here"));
    assert!(!tree.is_connected(child));
}

// ============================================================================
// FORMS
// ============================================================================

fn select_with(tree: &mut DomTree, options: &[OptionState]) -> (NodeId, Vec<NodeId>) {
    let select = tree.create_select(SelectState::default());
    let ids = options
        .iter()
        .map(|o| {
            let id = tree.create_option(o.clone());
            tree.append_child(select, id).unwrap();
            id
        })
        .collect();
    (select, ids)
}

#[test]
fn test_inserting_selected_option_deselects_others() {
    let mut tree = DomTree::new();
    let (select, ids) = select_with(
        &mut tree,
        &[OptionState::new("1", "A").selected(), OptionState::new("2", "B")],
    );
    let c = tree.create_option(OptionState::new("3", "C").selected());
    tree.append_child(select, c).unwrap();

    assert_eq!(tree.selected_option(select), Some(c));
    assert!(!tree.option_state(ids[0]).unwrap().selected);
    assert_eq!(tree.select_value(select), "3");
}

#[test]
fn test_group_members_are_options() {
    let mut tree = DomTree::new();
    let (select, ids) = select_with(&mut tree, &[OptionState::new("1", "A")]);
    let group = tree.create_optgroup("G");
    let b = tree.create_option(OptionState::new("2", "B"));
    tree.append_child(group, b).unwrap();
    tree.append_child(select, group).unwrap();

    assert_eq!(tree.options(select), vec![ids[0], b]);
    assert_eq!(tree.owner_select(b), Some(select));

    tree.optgroup_state_mut(group).unwrap().disabled = true;
    assert!(tree.option_is_disabled(b));
    assert!(!tree.option_is_disabled(ids[0]));
}

#[test]
fn test_multiple_select_keeps_all_selected() {
    let mut tree = DomTree::new();
    let select = tree.create_select(SelectState {
        multiple: true,
        ..Default::default()
    });
    let a = tree.create_option(OptionState::new("1", "A").selected());
    let b = tree.create_option(OptionState::new("2", "B"));
    tree.append_child(select, a).unwrap();
    tree.append_child(select, b).unwrap();
    tree.set_option_selected(b, true);

    assert!(tree.option_state(a).unwrap().selected);
    assert!(tree.option_state(b).unwrap().selected);
}

// ============================================================================
// DOCUMENT
// ============================================================================

#[test]
fn test_document_queries() {
    let mut doc = Document::new();
    let body = doc.body();
    let tree = doc.tree_mut();
    let form = tree.create_element("form");
    tree.append_child(body, form).unwrap();
    let (select, _) = select_with(tree, &[OptionState::new("1", "A")]);
    tree.set_attribute(select, "id", "size");
    tree.add_class(select, "fancy");
    tree.append_child(form, select).unwrap();
    let label = tree.create_label(Some("size"));
    tree.append_child(body, label).unwrap();

    assert_eq!(doc.get_element_by_id("size"), Some(select));
    assert_eq!(doc.query_selector_all("form select.fancy"), vec![select]);
    assert_eq!(doc.query_selector_all("select#size, label").len(), 2);
    assert!(doc.query_selector_all("select >").is_empty());
    assert_eq!(doc.label_for(select), Some(label));
    assert_eq!(doc.tree().closest(select, "form"), Some(form));
}

// ============================================================================
// EVENTS
// ============================================================================

/// Dispatcher whose handlers are tags written to a log
struct Page {
    doc: Document,
    listeners: ListenerRegistry<&'static str>,
    log: Vec<(&'static str, EventPhase)>,
}

impl EventDispatcher for Page {
    type Handler = &'static str;

    fn dom(&self) -> &DomTree {
        self.doc.tree()
    }

    fn listeners(&self) -> &ListenerRegistry<&'static str> {
        &self.listeners
    }

    fn listeners_mut(&mut self) -> &mut ListenerRegistry<&'static str> {
        &mut self.listeners
    }

    fn handle_event(&mut self, handler: &'static str, event: &mut Event) {
        self.log.push((handler, event.phase));
        if handler == "stopper" {
            event.stop_propagation();
        }
    }
}

fn page() -> (Page, NodeId) {
    let mut doc = Document::new();
    let body = doc.body();
    let button = doc.tree_mut().create_element("button");
    doc.tree_mut().append_child(body, button).unwrap();
    let page = Page {
        doc,
        listeners: ListenerRegistry::new(),
        log: Vec::new(),
    };
    (page, button)
}

#[test]
fn test_dispatch_order() {
    let (mut page, button) = page();
    let body = page.doc.body();
    page.listeners
        .add(body, EventType::Click, ListenerOptions::BUBBLE, "body-bubble");
    page.listeners
        .add(button, EventType::Click, ListenerOptions::BUBBLE, "target-bubble");
    page.listeners
        .add(button, EventType::Click, ListenerOptions::CAPTURE, "target-capture");
    page.listeners
        .add(NodeId::ROOT, EventType::Click, ListenerOptions::CAPTURE, "doc-capture");

    assert!(page.dispatch_event(Event::new(EventType::Click, button)));
    let tags: Vec<_> = page.log.iter().map(|(t, _)| *t).collect();
    assert_eq!(tags, ["doc-capture", "target-capture", "target-bubble", "body-bubble"]);
    assert_eq!(page.log[0].1, EventPhase::Capturing);
    assert_eq!(page.log[1].1, EventPhase::AtTarget);
    assert_eq!(page.log[3].1, EventPhase::Bubbling);
}

#[test]
fn test_capture_stop_blocks_target() {
    let (mut page, button) = page();
    let body = page.doc.body();
    page.listeners
        .add(body, EventType::Click, ListenerOptions::CAPTURE, "stopper");
    page.listeners
        .add(button, EventType::Click, ListenerOptions::BUBBLE, "target");

    page.dispatch_event(Event::new(EventType::Click, button));
    assert_eq!(page.log.len(), 1);
}

#[test]
fn test_non_bubbling_custom_event() {
    let (mut page, button) = page();
    let body = page.doc.body();
    page.listeners
        .add(body, EventType::Custom("ping"), ListenerOptions::BUBBLE, "body");
    page.listeners
        .add(button, EventType::Custom("ping"), ListenerOptions::BUBBLE, "target");

    let mut event = Event::custom("ping", button, false, false);
    event.prevent_default();
    assert!(page.dispatch_event(event));
    assert_eq!(page.log, [("target", EventPhase::AtTarget)]);
}

#[test]
fn test_once_listener_runs_once() {
    let (mut page, button) = page();
    page.listeners.add(
        button,
        EventType::Click,
        ListenerOptions::CAPTURE.once(),
        "once",
    );
    page.dispatch_event(Event::new(EventType::Click, button));
    page.dispatch_event(Event::new(EventType::Click, button));
    assert_eq!(page.log.len(), 1);
    assert!(page.listeners.is_empty());
}

// ============================================================================
// TIMERS
// ============================================================================

#[test]
fn test_timer_fires_at_deadline() {
    let mut timers = TimerQueue::new();
    let id = timers.set_timeout(1500, "reset");
    timers.advance(1499);
    assert!(timers.take_ready().is_empty());
    timers.advance(1);
    assert_eq!(timers.take_ready(), vec![(id, "reset")]);
    assert!(!timers.has_pending());
}

#[test]
fn test_cleared_timer_never_fires() {
    let mut timers = TimerQueue::new();
    let id = timers.set_timeout(10, ());
    assert!(timers.clear(id));
    assert!(!timers.clear(id));
    timers.advance(100);
    assert!(timers.take_ready().is_empty());
}
