//! Application-level view context.

use crate::view::ViewId;
use std::cell::Cell;

/// Tracks which view receives global commands.
///
/// Shared between views through an `Rc`. At most one view is active at a
/// time; a primary view registers itself on construction and any view can
/// claim the slot with [`View::activate`](crate::View::activate).
#[derive(Debug, Default)]
pub struct ViewContext {
    active: Cell<Option<ViewId>>,
}

impl ViewContext {
    /// Create a context with no active view.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active view, if any.
    pub fn active_view(&self) -> Option<ViewId> {
        self.active.get()
    }

    /// Check if `id` is the active view.
    pub fn is_active(&self, id: ViewId) -> bool {
        self.active.get() == Some(id)
    }

    pub(crate) fn set_active(&self, id: ViewId) {
        self.active.set(Some(id));
    }

    /// Clear the slot if `id` holds it. Returns true if it did.
    pub(crate) fn clear_if_active(&self, id: ViewId) -> bool {
        if self.is_active(id) {
            self.active.set(None);
            true
        } else {
            false
        }
    }
}
