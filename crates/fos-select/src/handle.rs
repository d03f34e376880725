//! Widget handle
//!
//! `CustomSelect` borrows the host mutably, so nothing else can touch the
//! document while a handle is alive.

use std::rc::Rc;

use fos_dom::{DomTree, NodeId};

use crate::config::SelectConfig;
use crate::host::SelectHost;
use crate::state::{Widget, WidgetId};
use crate::SelectResult;

/// Public face of one widget
pub struct CustomSelect<'h> {
    host: &'h mut SelectHost,
    id: WidgetId,
    config: Rc<SelectConfig>,
    native: NodeId,
    container: NodeId,
    opener: NodeId,
    panel: NodeId,
}

impl<'h> CustomSelect<'h> {
    pub(crate) fn new(host: &'h mut SelectHost, id: WidgetId) -> SelectResult<Self> {
        let widget = host.widget(id)?;
        let config = Rc::clone(&widget.config);
        let (native, container, opener, panel) =
            (widget.native, widget.container, widget.opener, widget.panel);
        Ok(Self {
            host,
            id,
            config,
            native,
            container,
            opener,
            panel,
        })
    }

    fn widget(&self) -> Option<&Widget> {
        self.host.widget(self.id).ok()
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn tree(&self) -> &DomTree {
        self.host.tree()
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The native select
    pub fn native(&self) -> NodeId {
        self.native
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn opener(&self) -> NodeId {
        self.opener
    }

    pub fn panel(&self) -> NodeId {
        self.panel
    }

    // === State ===

    pub fn is_open(&self) -> bool {
        self.widget().is_some_and(|w| w.state.is_open())
    }

    pub fn set_open(&mut self, open: bool) -> SelectResult<()> {
        self.host.set_open(self.id, open)
    }

    pub fn is_disabled(&self) -> bool {
        self.host.is_disabled(self.id).unwrap_or(false)
    }

    pub fn set_disabled(&mut self, disabled: bool) -> SelectResult<()> {
        self.host.set_disabled(self.id, disabled)
    }

    /// Value of the native select
    pub fn value(&self) -> String {
        self.tree().select_value(self.native)
    }

    pub fn set_value(&mut self, value: &str) -> SelectResult<()> {
        self.host.set_value(self.id, value)
    }

    /// Selected mirror option
    pub fn selected(&self) -> Option<NodeId> {
        self.widget().and_then(|w| w.state.selected)
    }

    /// Focused mirror option
    pub fn focused(&self) -> Option<NodeId> {
        self.widget().and_then(|w| w.state.focused)
    }

    /// Text of the selected option
    pub fn selected_text(&self) -> Option<String> {
        self.selected().map(|m| self.tree().text_content(m))
    }

    /// Text of the focused option
    pub fn focused_text(&self) -> Option<String> {
        self.focused().map(|m| self.tree().text_content(m))
    }

    /// Text shown in the opener
    pub fn opener_text(&self) -> String {
        self.tree().text_content(self.opener)
    }

    pub fn search_buffer(&self) -> &str {
        self.widget().map_or("", |w| w.state.search.as_str())
    }

    pub fn mirror_of(&self, native: NodeId) -> Option<NodeId> {
        self.widget().and_then(|w| w.links.mirror_of(native))
    }

    pub fn native_of(&self, mirror: NodeId) -> Option<NodeId> {
        self.widget().and_then(|w| w.links.native_of(mirror))
    }

    // === Structure ===

    /// Append entries to the select, or to one of its groups
    pub fn append(
        &mut self,
        entries: &[NodeId],
        target: Option<NodeId>,
    ) -> SelectResult<Vec<NodeId>> {
        self.host.append_entries(self.id, entries, true, target)
    }

    pub fn insert_before(&mut self, entry: NodeId, target: NodeId) -> SelectResult<NodeId> {
        self.host.insert_entry_before(self.id, entry, target)
    }

    pub fn remove(&mut self, entry: NodeId) -> SelectResult<NodeId> {
        self.host.remove_entry(self.id, entry)
    }

    pub fn empty(&mut self) -> SelectResult<Vec<NodeId>> {
        self.host.empty_entries(self.id)
    }

    /// Tear down the widget, returning the restored native select
    pub fn destroy(self) -> SelectResult<NodeId> {
        self.host.destroy(self.id)
    }
}
