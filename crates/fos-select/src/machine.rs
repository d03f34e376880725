//! Interaction state machine
//!
//! Open/close transitions, pointer and keyboard handling, and type-ahead.
//! Only one widget per host may be open; opening one closes the other.

use fos_dom::{Event, EventDispatcher, EventType, Key, ListenerOptions, NodeId};

use crate::aria;
use crate::host::{Binding, Handler, SelectHost, TimerTask};
use crate::state::{OpenState, WidgetId};
use crate::{CLOSE_EVENT, OPEN_EVENT, SelectError, SelectResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Previous,
    Next,
}

impl SelectHost {
    /// Fire a non-bubbling notification
    pub(crate) fn emit(&mut self, target: NodeId, name: &'static str) {
        self.dispatch_event(Event::custom(name, target, false, false));
    }

    pub(crate) fn is_disabled(&self, id: WidgetId) -> SelectResult<bool> {
        let native = self.widget(id)?.native;
        Ok(self.tree().select_state(native).is_some_and(|s| s.disabled))
    }

    pub(crate) fn set_open(&mut self, id: WidgetId, open: bool) -> SelectResult<()> {
        if open { self.open(id) } else { self.close(id) }
    }

    pub(crate) fn open(&mut self, id: WidgetId) -> SelectResult<()> {
        if self.widget(id)?.state.is_open() || self.is_disabled(id)? {
            return Ok(());
        }
        if let Some(other) = self.open_widget.filter(|&o| o != id) {
            match self.close(other) {
                Ok(()) | Err(SelectError::UnknownWidget(_)) => {}
                Err(err) => return Err(err),
            }
            self.open_widget = None;
        }

        let widget = self.widget(id)?;
        let (container, opener, panel, selected) =
            (widget.container, widget.opener, widget.panel, widget.state.selected);
        let class = widget.config.is_open_class.clone();

        let tree = &mut self.document.tree;
        tree.add_class(container, &class);
        tree.set_attribute(opener, aria::EXPANDED, "true");
        if let Some(selected) = selected {
            let top = tree.geometry(selected).map_or(0.0, |g| g.offset_top);
            if let Some(g) = tree.geometry_mut(panel) {
                g.scroll_to(top);
            }
        }

        let outside = self.listeners.add(
            NodeId::ROOT,
            EventType::MouseDown,
            ListenerOptions::CAPTURE,
            Handler::Widget(id, Binding::OutsidePointerDown),
        );
        self.widget_mut(id)?.state.open = OpenState::Open { outside };
        self.open_widget = Some(id);
        tracing::debug!("{} opened", id);
        self.emit(container, OPEN_EVENT);
        Ok(())
    }

    pub(crate) fn close(&mut self, id: WidgetId) -> SelectResult<()> {
        let widget = self.widget_mut(id)?;
        let OpenState::Open { outside } = widget.state.open else {
            return Ok(());
        };
        widget.state.open = OpenState::Closed;
        widget.state.search.clear();
        let search_timer = widget.state.search_timer.take();
        let (container, opener, selected) = (widget.container, widget.opener, widget.state.selected);
        let class = widget.config.is_open_class.clone();

        if let Some(timer) = search_timer {
            self.timers.clear(timer);
        }
        self.listeners.remove(outside);
        if self.open_widget == Some(id) {
            self.open_widget = None;
        }

        let tree = &mut self.document.tree;
        tree.remove_class(container, &class);
        tree.set_attribute(opener, aria::EXPANDED, "false");
        self.set_focus(id, selected)?;
        tracing::debug!("{} closed", id);
        self.emit(container, CLOSE_EVENT);
        Ok(())
    }

    fn toggle(&mut self, id: WidgetId) -> SelectResult<()> {
        let open = self.widget(id)?.state.is_open();
        self.set_open(id, !open)
    }

    pub(crate) fn run_binding(
        &mut self,
        id: WidgetId,
        binding: Binding,
        event: &mut Event,
    ) -> SelectResult<()> {
        match binding {
            Binding::TogglePanel => self.toggle(id),
            Binding::SelectTarget => self.select_target(id, event.target),
            Binding::FocusWrapper => self.focus_wrapper(id),
            Binding::HoverOption => self.hover_option(id, event.target),
            Binding::ScrollToFocused => self.scroll_to_focused(id, event.target),
            Binding::NativeChange => self.sync_from_native(id),
            Binding::KeyDown => self.handle_key(id, event),
            Binding::OutsidePointerDown => self.outside_pointer_down(id, event),
        }
    }

    /// Mirror option under `node`, with its native option
    fn option_at(&self, id: WidgetId, node: NodeId) -> SelectResult<Option<(NodeId, NodeId)>> {
        let widget = self.widget(id)?;
        let tree = self.tree();
        let found = std::iter::once(node)
            .chain(tree.ancestors(node))
            .take_while(|&n| n != widget.panel)
            .find_map(|m| {
                widget
                    .links
                    .native_of(m)
                    .filter(|&n| tree.is_option(n))
                    .map(|n| (m, n))
            });
        Ok(found)
    }

    /// Select `mirror`, write it back to the native select and announce it
    fn commit(&mut self, id: WidgetId, mirror: NodeId) -> SelectResult<()> {
        let widget = self.widget(id)?;
        let native = widget.native;
        let option = widget.links.native_of(mirror);
        self.set_selection(id, Some(mirror))?;
        if let Some(option) = option {
            self.document.tree.set_option_selected(option, true);
        }
        tracing::debug!("{} committed {}", id, mirror);
        self.dispatch_event(Event::new(EventType::Change, native));
        Ok(())
    }

    fn select_target(&mut self, id: WidgetId, target: NodeId) -> SelectResult<()> {
        if !self.widget(id)?.state.is_open() {
            return Ok(());
        }
        let Some((mirror, option)) = self.option_at(id, target)? else {
            return Ok(());
        };
        if self.tree().option_is_disabled(option) {
            return Ok(());
        }
        self.commit(id, mirror)?;
        self.close(id)
    }

    /// Clicks on the native select move keyboard focus to the wrapper
    fn focus_wrapper(&mut self, id: WidgetId) -> SelectResult<()> {
        let widget = self.widget(id)?;
        let (container, opener, native) = (widget.container, widget.opener, widget.native);
        let active = self.document.active_element();
        if active != Some(opener) && active != Some(native) {
            self.document.focus(container);
        }
        Ok(())
    }

    fn hover_option(&mut self, id: WidgetId, target: NodeId) -> SelectResult<()> {
        if !self.widget(id)?.state.is_open() {
            return Ok(());
        }
        match self.option_at(id, target)? {
            Some((mirror, option)) if !self.tree().option_is_disabled(option) => {
                self.set_focus(id, Some(mirror))
            }
            _ => Ok(()),
        }
    }

    /// Align the focused entry with the nearest edge of the panel
    fn scroll_to_focused(&mut self, id: WidgetId, target: NodeId) -> SelectResult<()> {
        let panel = self.widget(id)?.panel;
        let tree = &mut self.document.tree;
        let Some(entry) = tree.geometry(target).cloned() else {
            return Ok(());
        };
        if let Some(g) = tree.geometry_mut(panel) {
            if entry.offset_top < g.scroll_top {
                g.scroll_to(entry.offset_top);
            } else {
                g.scroll_to(entry.offset_top + entry.offset_height - g.client_height);
            }
        }
        Ok(())
    }

    /// Point the selection register at the native selected option
    pub(crate) fn sync_from_native(&mut self, id: WidgetId) -> SelectResult<()> {
        let widget = self.widget(id)?;
        let mirror = self
            .tree()
            .selected_option(widget.native)
            .and_then(|o| widget.links.mirror_of(o));
        self.set_selection(id, mirror)
    }

    fn handle_key(&mut self, id: WidgetId, event: &mut Event) -> SelectResult<()> {
        let Some(key) = event.key else {
            return Ok(());
        };
        let state = &self.widget(id)?.state;
        let (is_open, focused) = (state.is_open(), state.focused);
        if !is_open {
            if matches!(key, Key::ArrowUp | Key::ArrowDown | Key::Space) {
                self.open(id)?;
            }
            return Ok(());
        }

        match key {
            Key::Enter | Key::Space => {
                if let Some(focused) = focused {
                    self.commit(id, focused)?;
                }
                self.close(id)
            }
            Key::Escape => self.close(id),
            Key::ArrowUp => self.move_focus(id, Direction::Previous),
            Key::ArrowDown => self.move_focus(id, Direction::Next),
            Key::Char(c) if c.is_ascii_alphanumeric() => self.type_ahead(id, c),
            _ => Ok(()),
        }
    }

    /// Focus the adjacent enabled option in document order, staying put at
    /// either end
    fn move_focus(&mut self, id: WidgetId, direction: Direction) -> SelectResult<()> {
        let widget = self.widget(id)?;
        let tree = self.tree();
        let options = tree.options(widget.native);
        let current = widget
            .state
            .focused
            .and_then(|m| widget.links.native_of(m))
            .and_then(|n| options.iter().position(|&o| o == n));

        let enabled = |o: &&NodeId| !tree.option_is_disabled(**o);
        let next = match (current, direction) {
            (Some(pos), Direction::Next) => options[pos + 1..].iter().find(enabled),
            (Some(pos), Direction::Previous) => options[..pos].iter().rev().find(enabled),
            (None, Direction::Next) => options.iter().find(enabled),
            (None, Direction::Previous) => options.iter().rev().find(enabled),
        };
        let Some(mirror) = next.and_then(|&o| widget.links.mirror_of(o)) else {
            return Ok(());
        };
        self.set_focus(id, Some(mirror))
    }

    /// Extend the search buffer and focus the first enabled option whose
    /// text starts with it
    fn type_ahead(&mut self, id: WidgetId, c: char) -> SelectResult<()> {
        let widget = self.widget_mut(id)?;
        let delay = widget.config.search_reset_ms;
        widget.state.search.push(c.to_ascii_uppercase());
        let previous = widget.state.search_timer.take();
        if let Some(timer) = previous {
            self.timers.clear(timer);
        }
        let timer = self.timers.set_timeout(delay, TimerTask::ResetSearch(id));
        let widget = self.widget_mut(id)?;
        widget.state.search_timer = Some(timer);

        let widget = self.widget(id)?;
        let buffer = widget.state.search.as_str();
        let tree = self.tree();
        let found = tree.options(widget.native).into_iter().find(|&o| {
            !tree.option_is_disabled(o)
                && tree
                    .option_state(o)
                    .is_some_and(|s| s.text.to_uppercase().starts_with(buffer))
        });
        tracing::trace!("{} search {:?} -> {:?}", id, buffer, found);
        let Some(mirror) = found.and_then(|o| widget.links.mirror_of(o)) else {
            return Ok(());
        };
        self.set_focus(id, Some(mirror))
    }

    /// Pointer-down anywhere outside the wrapper closes the panel and
    /// swallows both that pointer-down and the click that follows it
    fn outside_pointer_down(&mut self, id: WidgetId, event: &mut Event) -> SelectResult<()> {
        let widget = self.widget(id)?;
        if !widget.state.is_open() || self.tree().contains(widget.container, event.target) {
            return Ok(());
        }
        self.close(id)?;
        event.stop_immediate_propagation();
        event.prevent_default();
        let html = self.document.document_element();
        self.listeners.add(
            html,
            EventType::Click,
            ListenerOptions::CAPTURE.once(),
            Handler::Block,
        );
        Ok(())
    }

    /// Select the first option with `value`, or the first option when none
    /// matches, then announce the change
    pub(crate) fn set_value(&mut self, id: WidgetId, value: &str) -> SelectResult<()> {
        let native = self.widget(id)?.native;
        let tree = self.tree();
        let options = tree.options(native);
        let Some(option) = options
            .iter()
            .copied()
            .find(|&o| tree.option_state(o).is_some_and(|s| s.value == value))
            .or_else(|| options.first().copied())
        else {
            return Ok(());
        };
        self.document.tree.set_option_selected(option, true);
        self.dispatch_event(Event::new(EventType::Change, native));
        Ok(())
    }
}
