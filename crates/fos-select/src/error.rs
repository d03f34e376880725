//! Select widget errors

use fos_dom::{DomError, NodeId};

use crate::WidgetId;

/// Result alias for widget operations
pub type SelectResult<T> = Result<T, SelectError>;

/// Widget errors. All of them point at integration mistakes; nothing here
/// is a transient runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// A node passed as an entry (or entry target) is not an option or
    /// optgroup belonging to the expected tree
    #[error("invalid entry {0}: expected an option or optgroup of this select")]
    InvalidEntryKind(NodeId),

    #[error("{0} is not a single-selection select element")]
    NotASingleSelect(NodeId),

    /// The handle outlived its widget
    #[error("widget {0} does not exist")]
    UnknownWidget(WidgetId),

    #[error(transparent)]
    Dom(#[from] DomError),
}
