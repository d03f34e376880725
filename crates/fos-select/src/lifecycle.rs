//! Widget lifecycle
//!
//! Enhancement wraps a native select in the widget structure:
//!
//! ```text
//! div.custom-select-container.customSelect
//! ├── span.custom-select-opener [role=combobox]
//! │   └── span (selected text)
//! ├── select (native, tabindex=-1)
//! └── div.custom-select-panel [role=listbox]
//!     └── mirror entries
//! ```
//!
//! Disabling removes the interaction listeners, enabling puts them back, and
//! destroy undoes the wrapping.

use std::rc::Rc;

use fos_dom::{EventType, ListenerOptions, NodeId};

use crate::aria::{self, AriaRole, IdNamespace, MARKER_CLASS};
use crate::config::SelectConfig;
use crate::host::{Binding, Handler, SelectHost, Target};
use crate::mirror::LinkTable;
use crate::state::{BoundLabel, Widget, WidgetId, WidgetState};
use crate::{DISABLED_EVENT, ENABLED_EVENT, FOCUS_OUTSIDE_PANEL_EVENT, SelectError, SelectResult};

impl SelectHost {
    /// Enhance every single-select among the candidates. Candidates that
    /// are not single selects, or are already enhanced, are skipped.
    pub fn custom_select(
        &mut self,
        target: impl Into<Target>,
        config: &SelectConfig,
    ) -> Vec<WidgetId> {
        let candidates = match target.into() {
            Target::Node(node) => vec![node],
            Target::Selector(selector) => self.document.query_selector_all(&selector),
            Target::Nodes(nodes) => nodes,
        };
        candidates
            .into_iter()
            .filter_map(|node| {
                if self.widget_for(node).is_some() {
                    return None;
                }
                match self.attach(node, config) {
                    Ok(id) => Some(id),
                    Err(err) => {
                        tracing::debug!("Skipping {}: {}", node, err);
                        None
                    }
                }
            })
            .collect()
    }

    /// Enhance one select. An already enhanced select yields its widget.
    pub fn attach(&mut self, select: NodeId, config: &SelectConfig) -> SelectResult<WidgetId> {
        if let Some(existing) = self
            .widgets()
            .into_iter()
            .find(|&w| self.widget(w).is_ok_and(|w| w.native == select))
        {
            return Ok(existing);
        }
        let single = self.tree().select_state(select).is_some_and(|s| !s.multiple);
        if !single {
            return Err(SelectError::NotASingleSelect(select));
        }
        self.validate_entries(&self.tree().element_children(select))?;

        let ids = IdNamespace::new(self.next_uid());
        let config = Rc::new(config.clone());
        let tree = &mut self.document.tree;

        let container = tree.create_element("div");
        tree.add_class(container, &config.container_class);
        tree.add_class(container, MARKER_CLASS);

        let opener = tree.create_element("span");
        tree.add_class(opener, &config.opener_class);
        tree.set_attribute(opener, aria::ROLE, AriaRole::Combobox.as_str());
        tree.set_attribute(opener, aria::AUTOCOMPLETE, "list");
        tree.set_attribute(opener, aria::EXPANDED, "false");
        tree.set_attribute(opener, aria::OWNS, ids.panel_id());
        let opener_text = tree.create_element("span");
        tree.append_child(opener, opener_text)?;

        let panel = tree.create_element("div");
        tree.set_attribute(panel, "id", ids.panel_id());
        tree.add_class(panel, &config.panel_class);
        tree.set_attribute(panel, aria::ROLE, AriaRole::Listbox.as_str());

        let native_tabindex = tree.get_attribute(select, "tabindex").map(str::to_string);
        let id = WidgetId(self.widgets.len());
        self.widgets.push(Some(Widget {
            config: Rc::clone(&config),
            ids,
            native: select,
            container,
            opener,
            opener_text,
            panel,
            label: None,
            native_tabindex,
            links: LinkTable::new(),
            bindings: Vec::new(),
            state: WidgetState::default(),
        }));

        let entries = self.tree().element_children(select);
        if let Err(err) = self.append_entries(id, &entries, false, None) {
            self.widgets[id.0] = None;
            return Err(err);
        }

        let tree = &mut self.document.tree;
        tree.append_child(container, opener)?;
        if let Some(parent) = tree.parent(select) {
            tree.replace_child(parent, container, select)?;
        }
        tree.append_child(container, select)?;
        tree.append_child(container, panel)?;
        self.bind_label(id)?;

        if self.is_disabled(id)? {
            self.document.tree.add_class(container, &config.is_disabled_class);
        } else {
            let tree = &mut self.document.tree;
            tree.set_attribute(container, "tabindex", "0");
            tree.set_attribute(select, "tabindex", "-1");
            self.bind(id)?;
        }
        tracing::debug!("{} attached to {}", id, select);
        Ok(id)
    }

    /// Point the opener at the select's label, if it has one
    fn bind_label(&mut self, id: WidgetId) -> SelectResult<()> {
        let widget = self.widget(id)?;
        let (native, container, opener) = (widget.native, widget.container, widget.opener);
        let label_id = widget.ids.label_id();
        let label = self.document.label_for(native).or_else(|| {
            self.tree()
                .parent(container)
                .filter(|&p| self.tree().is_label(p))
        });
        let Some(label) = label else {
            return Ok(());
        };

        let tree = &mut self.document.tree;
        let previous_id = tree.get_attribute(label, "id").map(str::to_string);
        tree.set_attribute(label, "id", label_id.clone());
        tree.set_attribute(opener, aria::LABELLED_BY, label_id);
        self.widget_mut(id)?.label = Some(BoundLabel { node: label, previous_id });
        Ok(())
    }

    /// Register the interaction listeners
    fn bind(&mut self, id: WidgetId) -> SelectResult<()> {
        self.unbind(id)?;
        let widget = self.widget(id)?;
        let (opener, panel, native, container) =
            (widget.opener, widget.panel, widget.native, widget.container);
        let bindings = [
            (opener, EventType::Click, Binding::TogglePanel),
            (panel, EventType::Click, Binding::SelectTarget),
            (native, EventType::Click, Binding::FocusWrapper),
            (panel, EventType::MouseOver, Binding::HoverOption),
            (panel, EventType::Custom(FOCUS_OUTSIDE_PANEL_EVENT), Binding::ScrollToFocused),
            (native, EventType::Change, Binding::NativeChange),
            (container, EventType::KeyDown, Binding::KeyDown),
        ];
        let listeners: Vec<_> = bindings
            .into_iter()
            .map(|(target, event_type, binding)| {
                self.listeners.add(
                    target,
                    event_type,
                    ListenerOptions::BUBBLE,
                    Handler::Widget(id, binding),
                )
            })
            .collect();
        self.widget_mut(id)?.bindings = listeners;
        Ok(())
    }

    fn unbind(&mut self, id: WidgetId) -> SelectResult<()> {
        let bindings = std::mem::take(&mut self.widget_mut(id)?.bindings);
        for listener in bindings {
            self.listeners.remove(listener);
        }
        Ok(())
    }

    pub(crate) fn set_disabled(&mut self, id: WidgetId, disabled: bool) -> SelectResult<()> {
        if self.is_disabled(id)? == disabled {
            return Ok(());
        }
        let widget = self.widget(id)?;
        let (native, container) = (widget.native, widget.container);
        let class = widget.config.is_disabled_class.clone();

        if disabled {
            self.close(id)?;
            let tree = &mut self.document.tree;
            tree.add_class(container, &class);
            if let Some(state) = tree.select_state_mut(native) {
                state.disabled = true;
            }
            tree.remove_attribute(container, "tabindex");
            self.emit(container, DISABLED_EVENT);
            self.unbind(id)?;
        } else {
            let tree = &mut self.document.tree;
            tree.remove_class(container, &class);
            if let Some(state) = tree.select_state_mut(native) {
                state.disabled = false;
            }
            tree.set_attribute(container, "tabindex", "0");
            tree.set_attribute(native, "tabindex", "-1");
            self.emit(container, ENABLED_EVENT);
            self.bind(id)?;
            // Programmatic changes made while disabled had no listener
            self.sync_from_native(id)?;
        }
        tracing::debug!("{} disabled={}", id, disabled);
        Ok(())
    }

    /// Tear the widget down, putting the native select back where the
    /// wrapper was
    pub(crate) fn destroy(&mut self, id: WidgetId) -> SelectResult<NodeId> {
        self.close(id)?;
        self.unbind(id)?;
        let mut widget = self
            .widgets
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(SelectError::UnknownWidget(id))?;
        if let Some(timer) = widget.state.search_timer.take() {
            self.timers.clear(timer);
        }
        widget.links.clear();

        let tree = &mut self.document.tree;
        match widget.native_tabindex {
            Some(tabindex) => tree.set_attribute(widget.native, "tabindex", tabindex),
            None => {
                tree.remove_attribute(widget.native, "tabindex");
            }
        }
        if let Some(label) = widget.label {
            match label.previous_id {
                Some(previous) => tree.set_attribute(label.node, "id", previous),
                None => {
                    tree.remove_attribute(label.node, "id");
                }
            }
        }
        match tree.parent(widget.container) {
            Some(parent) => {
                tree.replace_child(parent, widget.native, widget.container)?;
            }
            None => tree.detach(widget.native),
        }
        tracing::debug!("{} destroyed", id);
        Ok(widget.native)
    }
}
