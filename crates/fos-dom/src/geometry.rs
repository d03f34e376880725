//! Geometry APIs
//!
//! DOMRect and the offset/scroll properties widgets read to keep a focused
//! item inside a scrolling container.

use crate::{DomTree, NodeId};

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `other` lies fully inside vertically
    pub fn contains_vertically(&self, other: &DOMRect) -> bool {
        other.top() >= self.top() && other.bottom() <= self.bottom()
    }
}

/// Element geometry state
#[derive(Debug, Clone, Default)]
pub struct ElementGeometry {
    // Offset properties (relative to the scrolling container)
    pub offset_top: f64,
    pub offset_height: f64,

    // Client properties (visible height of a scrolling container)
    pub client_height: f64,

    // Scroll properties
    pub scroll_top: f64,
    pub scroll_height: f64,
}

impl ElementGeometry {
    /// Box of the element within its container
    pub fn offset_rect(&self) -> DOMRect {
        DOMRect::from_xywh(0.0, self.offset_top, 0.0, self.offset_height)
    }

    /// Currently visible slice of a scrolling container
    pub fn visible_rect(&self) -> DOMRect {
        DOMRect::from_xywh(0.0, self.scroll_top, 0.0, self.client_height)
    }

    /// Scroll to position, clamped to the scrollable range
    pub fn scroll_to(&mut self, y: f64) {
        let max = (self.scroll_height - self.client_height).max(0.0);
        self.scroll_top = y.max(0.0).min(max);
    }

    /// Scroll by amount
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.scroll_top + dy);
    }
}

impl DomTree {
    pub fn geometry(&self, id: NodeId) -> Option<&ElementGeometry> {
        self.element(id).map(|e| &e.geometry)
    }

    pub fn geometry_mut(&mut self, id: NodeId) -> Option<&mut ElementGeometry> {
        self.element_mut(id).map(|e| &mut e.geometry)
    }

    /// Stack every element descendant of `container` as one row of
    /// `row_height`, in document order. Offsets are relative to the
    /// container, whose scroll height becomes the total.
    pub fn layout_rows(&mut self, container: NodeId, row_height: f64) {
        let mut y = 0.0;
        for id in self.descendants(container) {
            if !self.is_element(id) {
                continue;
            }
            let span = row_height * (1 + self.element_descendant_count(id)) as f64;
            if let Some(g) = self.geometry_mut(id) {
                g.offset_top = y;
                g.offset_height = span;
            }
            y += row_height;
        }
        if let Some(g) = self.geometry_mut(container) {
            g.scroll_height = y;
            let top = g.scroll_top;
            g.scroll_to(top);
        }
    }

    /// Set the visible height of a scrolling container
    pub fn set_viewport_height(&mut self, container: NodeId, height: f64) {
        if let Some(g) = self.geometry_mut(container) {
            g.client_height = height;
            let top = g.scroll_top;
            g.scroll_to(top);
        }
    }

    fn element_descendant_count(&self, id: NodeId) -> usize {
        self.descendants(id)
            .into_iter()
            .filter(|&d| self.is_element(d))
            .count()
    }
}
