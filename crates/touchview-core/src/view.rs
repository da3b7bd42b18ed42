//! Views: composition root binding an engine to a pair of surfaces.
//!
//! A [`View`] owns its engine handle, its adapter and its surfaces. The
//! primary variant owns an independent document; the magnifier variant asks
//! the engine for a view linked to a primary view's document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::adapter::{GraphView, ViewAdapter};
use crate::config::ViewOptions;
use crate::container::{HostContainer, pixel_size};
use crate::context::ViewContext;
use crate::engine::{DrawingEngine, EngineHandle};
use crate::overlay::{ActionId, IconProvider, OverlayWidget, WidgetId};
use crate::surface::{Repaint, SurfacePair};

/// Unique view identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Which kind of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Owns an independent document and registers as the active view.
    Main,
    /// Mirrors a primary view's document.
    Magnifier,
}

/// View errors.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("View has been torn down")]
    TornDown,
    #[error("Unknown overlay widget: {0}")]
    UnknownWidget(WidgetId),
}

/// Result type for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Change notifications forwarded from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewEventKind {
    CommandChanged,
    SelectionChanged,
    ContentChanged,
    DynamicChanged,
}

/// Subscriber for one kind of change notification.
pub type ViewEventHandler = Box<dyn FnMut(ViewId)>;

/// At most one subscriber per notification kind.
#[derive(Default)]
pub struct ViewEvents {
    slots: [Option<ViewEventHandler>; 4],
    /// Bumped on every subscribe or unsubscribe of the matching slot.
    generations: [u64; 4],
}

impl ViewEvents {
    fn index(kind: ViewEventKind) -> usize {
        match kind {
            ViewEventKind::CommandChanged => 0,
            ViewEventKind::SelectionChanged => 1,
            ViewEventKind::ContentChanged => 2,
            ViewEventKind::DynamicChanged => 3,
        }
    }

    /// Set the subscriber for `kind`, returning the one it replaces.
    pub fn subscribe(&mut self, kind: ViewEventKind, handler: ViewEventHandler) -> Option<ViewEventHandler> {
        let index = Self::index(kind);
        self.generations[index] += 1;
        self.slots[index].replace(handler)
    }

    /// Remove the subscriber for `kind`.
    pub fn unsubscribe(&mut self, kind: ViewEventKind) -> Option<ViewEventHandler> {
        let index = Self::index(kind);
        self.generations[index] += 1;
        self.slots[index].take()
    }

    pub fn has_subscriber(&self, kind: ViewEventKind) -> bool {
        self.slots[Self::index(kind)].is_some()
    }

    /// Take the handler out for a call, with the slot's current generation.
    fn take_for_emit(&mut self, kind: ViewEventKind) -> Option<(ViewEventHandler, u64)> {
        let index = Self::index(kind);
        self.slots[index].take().map(|handler| (handler, self.generations[index]))
    }

    /// Put a handler back unless the slot was changed while it ran.
    fn restore(&mut self, kind: ViewEventKind, handler: ViewEventHandler, generation: u64) {
        let index = Self::index(kind);
        if self.generations[index] == generation {
            self.slots[index] = Some(handler);
        }
    }
}

impl fmt::Debug for ViewEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewEvents")
            .field("command_changed", &self.has_subscriber(ViewEventKind::CommandChanged))
            .field("selection_changed", &self.has_subscriber(ViewEventKind::SelectionChanged))
            .field("content_changed", &self.has_subscriber(ViewEventKind::ContentChanged))
            .field("dynamic_changed", &self.has_subscriber(ViewEventKind::DynamicChanged))
            .finish()
    }
}

/// View state reachable from the adapter through its back-reference.
#[derive(Debug)]
pub(crate) struct ViewShared {
    pub(crate) id: ViewId,
    pub(crate) surfaces: RefCell<SurfacePair>,
    pub(crate) events: RefCell<ViewEvents>,
}

impl ViewShared {
    fn new(id: ViewId, size: Size) -> Self {
        Self {
            id,
            surfaces: RefCell::new(SurfacePair::new(size)),
            events: RefCell::new(ViewEvents::default()),
        }
    }

    /// Call the subscriber for `kind`, if any.
    ///
    /// The handler is taken out of its slot for the duration of the call so
    /// it may subscribe or unsubscribe. Any change it makes to its own slot
    /// sticks; otherwise the handler is put back.
    pub(crate) fn emit(&self, kind: ViewEventKind) {
        let taken = self.events.borrow_mut().take_for_emit(kind);
        if let Some((mut handler, generation)) = taken {
            handler(self.id);
            self.events.borrow_mut().restore(kind, handler, generation);
        }
    }
}

/// A drawing view bound to a host container.
pub struct View<E: DrawingEngine> {
    id: ViewId,
    kind: ViewKind,
    context: Rc<ViewContext>,
    engine: Option<EngineHandle<E>>,
    adapter: Option<ViewAdapter>,
    shared: Option<Rc<ViewShared>>,
    icons: Rc<dyn IconProvider>,
    /// Container size changes are routed to this view.
    resize_subscribed: bool,
    /// The engine has received a size at least once.
    size_pushed: bool,
    torn_down: bool,
}

impl<E: DrawingEngine> View<E> {
    /// Create a primary view and make it the active view.
    pub fn new(
        engine: E,
        container: &dyn HostContainer,
        icons: Rc<dyn IconProvider>,
        options: &ViewOptions,
        context: Rc<ViewContext>,
    ) -> Self {
        let view = Self::build(ViewKind::Main, engine, container, icons, options, context, |engine, adapter| {
            engine.create_view(adapter)
        });
        view.context.set_active(view.id);
        view
    }

    /// Create a magnifier view mirroring `main`.
    ///
    /// `engine` is a fresh handle that the engine links to `main`'s document.
    /// The active view is left unchanged.
    pub fn new_magnifier(
        main: &View<E>,
        engine: E,
        container: &dyn HostContainer,
        icons: Rc<dyn IconProvider>,
        options: &ViewOptions,
        context: Rc<ViewContext>,
    ) -> ViewResult<Self> {
        let source = main.engine().ok_or(ViewError::TornDown)?;
        let source_view = main.id;
        Ok(Self::build(ViewKind::Magnifier, engine, container, icons, options, context, |engine, adapter| {
            engine.create_linked_view(adapter, source, source_view)
        }))
    }

    fn build(
        kind: ViewKind,
        engine: E,
        container: &dyn HostContainer,
        icons: Rc<dyn IconProvider>,
        options: &ViewOptions,
        context: Rc<ViewContext>,
        create: impl FnOnce(&mut E, &mut dyn GraphView),
    ) -> Self {
        let id = ViewId::new();
        let size = container.size();
        let shared = Rc::new(ViewShared::new(id, size.unwrap_or(Size::ZERO)));
        let mut adapter = ViewAdapter::new(id, Rc::downgrade(&shared), icons.clone(), options);
        let mut engine = EngineHandle::new(engine);
        create(&mut *engine, &mut adapter);

        let mut view = Self {
            id,
            kind,
            context,
            engine: Some(engine),
            adapter: Some(adapter),
            shared: Some(shared),
            icons,
            resize_subscribed: true,
            size_pushed: false,
            torn_down: false,
        };

        match size {
            Some(size) => view.push_size(size),
            None => log::debug!("Container for view {} not realized, deferring size", id),
        }
        log::debug!("Created {:?} view {}", kind, id);
        view
    }

    fn push_size(&mut self, size: Size) {
        let (Some(engine), Some(adapter)) = (self.engine.as_mut(), self.adapter.as_mut()) else {
            return;
        };
        let (width, height) = pixel_size(size);
        engine.resize(adapter, width, height);
        self.size_pushed = true;
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// The engine, unless torn down.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_deref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_deref_mut()
    }

    /// The adapter, unless torn down.
    pub fn adapter(&self) -> Option<&ViewAdapter> {
        self.adapter.as_ref()
    }

    /// Run `f` with the engine and this view's adapter.
    ///
    /// This is how hosts forward input to the engine; the engine may call
    /// back into the adapter before `f` returns.
    pub fn with_engine<R>(&mut self, f: impl FnOnce(&mut E, &mut dyn GraphView) -> R) -> ViewResult<R> {
        let (Some(engine), Some(adapter)) = (self.engine.as_mut(), self.adapter.as_mut()) else {
            return Err(ViewError::TornDown);
        };
        Ok(f(&mut **engine, adapter))
    }

    pub fn is_active(&self) -> bool {
        self.context.is_active(self.id)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The engine has been told this view's size.
    pub fn is_size_pushed(&self) -> bool {
        self.size_pushed
    }

    /// Current surface size, unless torn down.
    pub fn size(&self) -> Option<Size> {
        self.with_surfaces(|surfaces| surfaces.content.size())
    }

    /// Read the surfaces.
    pub fn with_surfaces<R>(&self, f: impl FnOnce(&SurfacePair) -> R) -> Option<R> {
        self.shared.as_ref().map(|shared| f(&*shared.surfaces.borrow()))
    }

    /// Drain pending repaints for the host's paint pass.
    pub fn take_repaint(&self) -> Repaint {
        self.shared
            .as_ref()
            .map(|shared| shared.surfaces.borrow_mut().take_repaint())
            .unwrap_or_default()
    }

    /// Current overlay widgets, for the host to lay out on the transient surface.
    pub fn overlays(&self) -> &[OverlayWidget] {
        self.adapter.as_ref().map(ViewAdapter::overlays).unwrap_or(&[])
    }

    /// Set the subscriber for a change notification, replacing any previous one.
    pub fn subscribe(&mut self, kind: ViewEventKind, handler: impl FnMut(ViewId) + 'static) {
        if let Some(shared) = &self.shared {
            shared.events.borrow_mut().subscribe(kind, Box::new(handler));
        }
    }

    /// Remove the subscriber for a change notification.
    pub fn unsubscribe(&mut self, kind: ViewEventKind) {
        if let Some(shared) = &self.shared {
            shared.events.borrow_mut().unsubscribe(kind);
        }
    }

    /// Apply the container's new bounds.
    ///
    /// Resizes both surfaces, informs the engine and discards any overlays,
    /// whose anchors are now stale. An unrealized container leaves the size
    /// push deferred but still discards the overlays.
    pub fn resize(&mut self, container: &dyn HostContainer) -> ViewResult<()> {
        if !self.resize_subscribed {
            log::debug!("Resize for torn down view {} ignored", self.id);
            return Err(ViewError::TornDown);
        }
        match container.size() {
            Some(size) => {
                if let Some(shared) = &self.shared {
                    shared.surfaces.borrow_mut().set_size(size);
                }
                self.push_size(size);
            }
            None => log::debug!("Container for view {} not realized, deferring size", self.id),
        }

        if let Some(adapter) = self.adapter.as_mut() {
            adapter.clear_actions();
        }
        Ok(())
    }

    /// Route a window event to the view. Returns true if it was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        match event {
            WindowEvent::Resized(_) => {
                if let Err(e) = self.resize(window) {
                    log::debug!("Resize not applied: {}", e);
                }
                true
            }
            _ => false,
        }
    }

    /// Make this view the target of global commands.
    pub fn activate(&self) {
        if !self.torn_down && !self.is_active() {
            self.context.set_active(self.id);
        }
    }

    /// Activate an overlay widget.
    ///
    /// Every overlay is dismissed before the action reaches the engine, then
    /// this view becomes the active view. Returns the dispatched action.
    pub fn activate_overlay(&mut self, widget: WidgetId) -> ViewResult<ActionId> {
        let (Some(engine), Some(adapter)) = (self.engine.as_mut(), self.adapter.as_mut()) else {
            return Err(ViewError::TornDown);
        };
        let action = adapter
            .take_activation(widget)
            .ok_or(ViewError::UnknownWidget(widget))?;

        log::debug!("View {} dispatching context action {}", self.id, action);
        engine.dispatch_context_action(adapter, action);
        self.activate();
        Ok(action)
    }

    /// Release the view. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.context.clear_if_active(self.id);

        if let Some(shared) = &self.shared {
            shared.surfaces.borrow_mut().release();
        }
        self.resize_subscribed = false;

        if let Some(mut adapter) = self.adapter.take() {
            adapter.detach();
            if let Some(engine) = self.engine.as_mut() {
                engine.destroy_view(&mut adapter);
            }
        }
        self.icons.clean();
        self.shared = None;

        if let Some(engine) = self.engine.take() {
            engine.dispose();
        }
        log::debug!("View {} torn down", self.id);
    }
}

impl<E: DrawingEngine> Drop for View<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<E: DrawingEngine> fmt::Debug for View<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("adapter", &self.adapter)
            .field("size_pushed", &self.size_pushed)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
