//! Overlay manager owning the current set of context-action widgets.

use super::action::{ActionId, ContextAction};
use super::icons::{Icon, IconProvider};
use crate::config::OverlayStyle;
use crate::surface::Surface;
use kurbo::{Point, Rect};

/// Identifier of an overlay widget, unique per manager.
pub type WidgetId = u64;

/// How an overlay widget is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayKind {
    /// Clickable icon; the caption is its tooltip.
    Icon(Icon),
    /// Text button showing the caption.
    TextButton,
}

/// A clickable context-action widget on the transient surface.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayWidget {
    pub id: WidgetId,
    pub action: ActionId,
    pub kind: OverlayKind,
    /// Engine-supplied anchor; the widget is centered on it.
    pub anchor: Point,
    /// Widget bounds in surface coordinates.
    pub rect: Rect,
    pub caption: Option<&'static str>,
}

impl OverlayWidget {
    pub fn is_icon(&self) -> bool {
        matches!(self.kind, OverlayKind::Icon(_))
    }
}

/// Owns the overlay widgets and their attachment to the transient surface.
#[derive(Debug)]
pub struct OverlayManager {
    widgets: Vec<OverlayWidget>,
    next_id: WidgetId,
    style: OverlayStyle,
    /// Bounding box of the selection the current set was requested for.
    bounds: Option<Rect>,
}

impl OverlayManager {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            widgets: Vec::new(),
            next_id: 1,
            style,
            bounds: None,
        }
    }

    /// At least one widget exists.
    pub fn is_visible(&self) -> bool {
        !self.widgets.is_empty()
    }

    pub fn widgets(&self) -> &[OverlayWidget] {
        &self.widgets
    }

    pub fn widget(&self, id: WidgetId) -> Option<&OverlayWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Replace the current set with widgets for `actions`.
    ///
    /// `positions[i]` anchors `actions[i]`. Icons are tried first; if none
    /// can be created for a non-empty request, every known action gets a
    /// text button instead. Returns whether any widget now exists.
    pub fn show(
        &mut self,
        actions: &[ActionId],
        positions: &[Point],
        bounds: Rect,
        icons: &dyn IconProvider,
        surface: &mut Surface,
    ) -> bool {
        self.clear(surface);

        if !self.create_icons(actions, positions, icons, surface) {
            self.create_buttons(actions, positions, surface);
        }

        if self.is_visible() {
            self.bounds = Some(bounds);
        }
        self.is_visible()
    }

    /// Icon pass. Returns false when the request needs the button fallback.
    fn create_icons(
        &mut self,
        actions: &[ActionId],
        positions: &[Point],
        icons: &dyn IconProvider,
        surface: &mut Surface,
    ) -> bool {
        for (index, &action) in actions.iter().enumerate() {
            let Some(caption) = ContextAction::caption_for(action) else {
                continue;
            };
            let Some(icon) = icons.lookup(action) else {
                continue;
            };
            let Some(&anchor) = positions.get(index) else {
                log::warn!("No anchor for context action {action}, skipping");
                continue;
            };

            log::trace!("{action},{caption}");
            let rect = Rect::from_center_size(anchor, icon.size);
            self.push(action, OverlayKind::Icon(icon), anchor, rect, caption, surface);
        }

        actions.is_empty() || self.is_visible()
    }

    /// Text-button pass, one button per known action.
    fn create_buttons(&mut self, actions: &[ActionId], positions: &[Point], surface: &mut Surface) {
        for (index, &action) in actions.iter().enumerate() {
            let Some(caption) = ContextAction::caption_for(action) else {
                continue;
            };
            let Some(&anchor) = positions.get(index) else {
                log::warn!("No anchor for context action {action}, skipping");
                continue;
            };

            let rect = Rect::from_center_size(anchor, self.style.button_size(caption));
            self.push(action, OverlayKind::TextButton, anchor, rect, caption, surface);
        }
    }

    fn push(
        &mut self,
        action: ActionId,
        kind: OverlayKind,
        anchor: Point,
        rect: Rect,
        caption: &'static str,
        surface: &mut Surface,
    ) {
        let id = self.next_id;
        self.next_id += 1;
        surface.attach_element(id);
        self.widgets.push(OverlayWidget {
            id,
            action,
            kind,
            anchor,
            rect,
            caption: Some(caption),
        });
    }

    /// Activate a widget: capture its action and dismiss the whole set.
    ///
    /// Returns `None` if `id` is not a current widget.
    pub fn take_activation(&mut self, id: WidgetId, surface: &mut Surface) -> Option<ActionId> {
        let action = self.widget(id)?.action;
        self.clear(surface);
        Some(action)
    }

    /// Remove every widget from the surface.
    pub fn clear(&mut self, surface: &mut Surface) {
        for widget in self.widgets.drain(..) {
            surface.detach_element(widget.id);
        }
        self.bounds = None;
    }

    /// Forget every widget without touching a surface (the surface is gone).
    pub(crate) fn discard(&mut self) {
        self.widgets.clear();
        self.bounds = None;
    }
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}
