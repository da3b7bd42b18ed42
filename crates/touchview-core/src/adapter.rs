//! View adapter: the engine's callback target.
//!
//! The adapter holds no document state. On every callback it inspects the
//! engine's activity flags and decides between the expensive full
//! regeneration path (committed document, possible undo snapshot, both
//! surfaces) and the cheap redraw path (dynamic shapes, transient surface
//! only).
//!
//! Within one callback, document submission precedes dynamic-shape
//! submission, which precedes surface invalidation.

use std::rc::{Rc, Weak};
use std::time::{SystemTime, UNIX_EPOCH};

use kurbo::{Point, Rect};

use crate::config::ViewOptions;
use crate::engine::DrawingEngine;
use crate::overlay::{ActionId, IconProvider, OverlayManager, OverlayWidget, WidgetId};
use crate::view::{ViewEventKind, ViewId, ViewShared};

/// Callbacks the engine invokes on a view.
pub trait GraphView {
    /// The view this adapter belongs to.
    fn view_id(&self) -> ViewId;

    /// Regenerate everything; `changed` means the committed document changed.
    fn on_full_regen(&mut self, engine: &mut dyn DrawingEngine, changed: bool);

    /// A shape was appended to the committed document.
    fn on_append(&mut self, engine: &mut dyn DrawingEngine, shape_id: i32);

    /// Redraw in-progress shapes; `changed` means they need resubmitting.
    fn on_redraw(&mut self, engine: &mut dyn DrawingEngine, changed: bool);

    fn on_command_changed(&mut self);
    fn on_selection_changed(&mut self);
    fn on_content_changed(&mut self);
    fn on_dynamic_changed(&mut self);

    /// At least one context-action widget is shown.
    fn is_context_actions_visible(&self) -> bool;

    /// Show context actions anchored at `positions`, replacing any current set.
    fn show_context_actions(&mut self, actions: &[ActionId], positions: &[Point], bounds: Rect) -> bool;

    /// Whether the engine should enlarge hit areas for finger input.
    fn use_finger(&self) -> bool;
}

/// Millisecond wall-clock hint passed to the engine's undo tick throttling.
pub fn wall_clock_tick() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Adapter bridging engine callbacks to a view's surfaces and subscribers.
///
/// Holds a non-owning back-reference to its view. Once detached, every
/// callback is inert: no engine calls and no surface access.
pub struct ViewAdapter {
    view_id: ViewId,
    owner: Option<Weak<ViewShared>>,
    overlays: OverlayManager,
    icons: Rc<dyn IconProvider>,
    use_finger: bool,
}

impl ViewAdapter {
    pub(crate) fn new(
        view_id: ViewId,
        owner: Weak<ViewShared>,
        icons: Rc<dyn IconProvider>,
        options: &ViewOptions,
    ) -> Self {
        Self {
            view_id,
            owner: Some(owner),
            overlays: OverlayManager::new(options.overlay.clone()),
            icons,
            use_finger: options.use_finger,
        }
    }

    fn owner(&self) -> Option<Rc<ViewShared>> {
        self.owner.as_ref().and_then(Weak::upgrade)
    }

    /// Still bound to a live view.
    pub fn is_attached(&self) -> bool {
        self.owner().is_some()
    }

    /// Current overlay widgets.
    pub fn overlays(&self) -> &[OverlayWidget] {
        self.overlays.widgets()
    }

    /// Drop the back-reference. Later callbacks become no-ops.
    pub(crate) fn detach(&mut self) {
        self.overlays.discard();
        self.owner = None;
    }

    /// Remove all overlay widgets.
    pub(crate) fn clear_actions(&mut self) {
        match self.owner() {
            Some(owner) => self.overlays.clear(&mut owner.surfaces.borrow_mut().transient),
            None => self.overlays.discard(),
        }
    }

    /// Capture a widget's action and dismiss every overlay.
    pub(crate) fn take_activation(&mut self, widget: WidgetId) -> Option<ActionId> {
        let owner = self.owner()?;
        let mut surfaces = owner.surfaces.borrow_mut();
        self.overlays.take_activation(widget, &mut surfaces.transient)
    }

    /// Submit the committed document. Failures count as no new content.
    fn submit_committed(&self, engine: &mut dyn DrawingEngine) -> bool {
        match engine.submit_committed_document(self.view_id) {
            Ok(has_new_content) => has_new_content,
            Err(e) => {
                log::warn!("Committed document submission failed for view {}: {}", self.view_id, e);
                false
            }
        }
    }

    fn submit_dynamic(&self, engine: &mut dyn DrawingEngine) {
        if let Err(e) = engine.submit_dynamic_shapes(self.view_id) {
            log::warn!("Dynamic shape submission failed for view {}: {}", self.view_id, e);
        }
    }

    fn record_undo(&self, engine: &mut dyn DrawingEngine) {
        let tick = engine.record_tick(true, wall_clock_tick());
        match engine.acquire_front_document() {
            Ok(document) => engine.record_undo_snapshot(true, tick, document, 0, 0),
            Err(e) => log::warn!("Skipping undo snapshot: {}", e),
        }
    }

    fn notify(&self, kind: ViewEventKind) {
        if let Some(owner) = self.owner() {
            owner.emit(kind);
        }
    }
}

impl GraphView for ViewAdapter {
    fn view_id(&self) -> ViewId {
        self.view_id
    }

    fn on_full_regen(&mut self, engine: &mut dyn DrawingEngine, changed: bool) {
        let Some(owner) = self.owner() else {
            log::debug!("Full regen for detached view {} ignored", self.view_id);
            return;
        };

        // While the engine replays or loads undo it owns the transition.
        if !engine.is_playing() && !engine.is_undo_loading() {
            if changed && self.submit_committed(engine) && engine.is_undo_recording() {
                self.record_undo(engine);
            }
            self.submit_dynamic(engine);
        }

        owner.surfaces.borrow_mut().invalidate_all();
    }

    fn on_append(&mut self, engine: &mut dyn DrawingEngine, _shape_id: i32) {
        self.on_full_regen(engine, true);
    }

    fn on_redraw(&mut self, engine: &mut dyn DrawingEngine, changed: bool) {
        let Some(owner) = self.owner() else {
            log::debug!("Redraw for detached view {} ignored", self.view_id);
            return;
        };

        if changed {
            self.submit_dynamic(engine);
        }
        owner.surfaces.borrow_mut().transient.invalidate();
    }

    fn on_command_changed(&mut self) {
        self.notify(ViewEventKind::CommandChanged);
    }

    fn on_selection_changed(&mut self) {
        self.notify(ViewEventKind::SelectionChanged);
    }

    fn on_content_changed(&mut self) {
        self.notify(ViewEventKind::ContentChanged);
    }

    fn on_dynamic_changed(&mut self) {
        self.notify(ViewEventKind::DynamicChanged);
    }

    fn is_context_actions_visible(&self) -> bool {
        self.overlays.is_visible()
    }

    fn show_context_actions(&mut self, actions: &[ActionId], positions: &[Point], bounds: Rect) -> bool {
        let Some(owner) = self.owner() else {
            return false;
        };
        let mut surfaces = owner.surfaces.borrow_mut();
        self.overlays
            .show(actions, positions, bounds, self.icons.as_ref(), &mut surfaces.transient)
    }

    fn use_finger(&self) -> bool {
        self.use_finger
    }
}

impl std::fmt::Debug for ViewAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewAdapter")
            .field("view_id", &self.view_id)
            .field("attached", &self.is_attached())
            .field("overlays", &self.overlays)
            .field("use_finger", &self.use_finger)
            .finish()
    }
}
