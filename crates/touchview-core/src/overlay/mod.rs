//! Context-action overlays.
//!
//! The engine asks a view to show a set of actions anchored to screen
//! positions. The overlay set is single-shot:
//! - every show request replaces the previous set wholesale
//! - activating any widget dismisses all of them
//! - icons are preferred; when no icon can be created the whole set falls
//!   back to text buttons

mod action;
mod icons;
mod manager;

pub use action::{ActionId, ContextAction};
pub use icons::{Icon, IconProvider, IconTable, NoIcons};
pub use manager::{OverlayKind, OverlayManager, OverlayWidget, WidgetId};
