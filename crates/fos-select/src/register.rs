//! Focus and selection register
//!
//! Both registers hold a mirror option (or nothing). Writing one keeps the
//! presentation classes, the generated ids and the opener's ARIA state in
//! step with it.

use std::rc::Rc;

use fos_dom::{Event, EventDispatcher, NodeId};

use crate::aria;
use crate::host::SelectHost;
use crate::state::WidgetId;
use crate::{FOCUS_OUTSIDE_PANEL_EVENT, SelectResult};

impl SelectHost {
    /// Move the focus highlight. While open, an entry outside the visible
    /// part of the panel announces itself with a cancelable bubbling event.
    pub(crate) fn set_focus(&mut self, id: WidgetId, entry: Option<NodeId>) -> SelectResult<()> {
        let widget = self.widget_mut(id)?;
        let previous = std::mem::replace(&mut widget.state.focused, entry);
        let class = widget.config.has_focus_class.clone();
        let is_open = widget.state.is_open();
        let panel = widget.panel;

        let tree = &mut self.document.tree;
        if let Some(previous) = previous {
            tree.remove_class(previous, &class);
        }
        let Some(entry) = entry else {
            return Ok(());
        };
        tree.add_class(entry, &class);
        tracing::trace!("{} focus -> {}", id, entry);

        if is_open && self.is_outside_panel(panel, entry) {
            self.dispatch_event(Event::custom(FOCUS_OUTSIDE_PANEL_EVENT, entry, true, true));
        }
        Ok(())
    }

    fn is_outside_panel(&self, panel: NodeId, entry: NodeId) -> bool {
        let tree = self.tree();
        let (Some(p), Some(e)) = (tree.geometry(panel), tree.geometry(entry)) else {
            return false;
        };
        e.offset_top < p.scroll_top
            || e.offset_top > p.scroll_top + p.client_height - e.offset_height
    }

    /// Replace the selected entry. The opener shows its text and points at
    /// it; focus follows.
    pub(crate) fn set_selection(
        &mut self,
        id: WidgetId,
        entry: Option<NodeId>,
    ) -> SelectResult<()> {
        let widget = self.widget_mut(id)?;
        let previous = std::mem::replace(&mut widget.state.selected, entry);
        let config = Rc::clone(&widget.config);
        let selected_id = widget.ids.selected_option_id();
        let (opener, opener_text) = (widget.opener, widget.opener_text);
        let native = entry.and_then(|m| widget.links.native_of(m));

        let tree = &mut self.document.tree;
        if let Some(previous) = previous {
            tree.remove_class(previous, &config.is_selected_class);
            tree.remove_attribute(previous, "id");
            tree.remove_attribute(opener, aria::ACTIVE_DESCENDANT);
        }
        match entry {
            Some(entry) => {
                tree.add_class(entry, &config.is_selected_class);
                tree.set_attribute(entry, "id", selected_id.clone());
                tree.set_attribute(opener, aria::ACTIVE_DESCENDANT, selected_id);
                let text = native
                    .and_then(|n| tree.option_state(n))
                    .map(|o| o.text.clone())
                    .unwrap_or_default();
                tree.set_text_content(opener_text, &text);
            }
            None => tree.set_text_content(opener_text, ""),
        }
        self.set_focus(id, entry)
    }
}
