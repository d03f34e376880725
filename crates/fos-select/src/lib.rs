//! fOS Custom Select
//!
//! A styleable replacement for the native single-select control. The
//! native `<select>` stays in the document as the source of truth for value
//! and options; the widget renders a mirror tree of the options inside a
//! wrapper and keeps the two trees in lockstep.
//!
//! Features:
//! - Mirror tree with a native/mirror link side-table
//! - Selection and focus register with ARIA state
//! - Open/close state machine with one open widget per document
//! - Keyboard navigation and type-ahead search
//! - Structural edits (append, insert-before, remove, empty)
//! - Enable/disable and teardown that restores the native control

mod aria;
mod config;
mod error;
mod handle;
mod host;
mod lifecycle;
mod machine;
mod mirror;
mod mutation;
mod register;
mod state;
mod uid;

pub use aria::{AriaRole, IdNamespace};
pub use config::SelectConfig;
pub use error::{SelectError, SelectResult};
pub use handle::CustomSelect;
pub use host::{Binding, Handler, SelectHost, Target};
pub use mirror::{EntryKind, LinkTable};
pub use state::WidgetId;
pub use uid::UidGenerator;

/// Emitted on the wrapper after the panel opens
pub const OPEN_EVENT: &str = "custom-select:open";
/// Emitted on the wrapper after the panel closes
pub const CLOSE_EVENT: &str = "custom-select:close";
/// Emitted on the wrapper when the widget gets disabled
pub const DISABLED_EVENT: &str = "custom-select:disabled";
/// Emitted on the wrapper when the widget gets enabled
pub const ENABLED_EVENT: &str = "custom-select:enabled";
/// Emitted on a mirror option that received focus outside the visible
/// part of the panel. Bubbles and is cancelable; the panel scrolls it into
/// view unless a capture listener on the panel stops propagation.
pub const FOCUS_OUTSIDE_PANEL_EVENT: &str = "custom-select:focus-outside-panel";
