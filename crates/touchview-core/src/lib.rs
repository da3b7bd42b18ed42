//! TouchView Core Library
//!
//! Synchronizes a stateful drawing engine with a pair of windowed surfaces.
//! The engine drives document state and calls back into a [`ViewAdapter`],
//! which decides between full regeneration and cheap transient redraws and
//! manages the short-lived context-action overlays anchored to engine
//! coordinates.

pub mod adapter;
pub mod config;
pub mod container;
pub mod context;
pub mod engine;
pub mod overlay;
pub mod surface;
pub mod view;

#[cfg(test)]
mod testing;

pub use adapter::{GraphView, ViewAdapter, wall_clock_tick};
pub use config::{ConfigError, ConfigResult, OverlayStyle, ViewOptions};
pub use container::HostContainer;
pub use context::ViewContext;
pub use engine::{DocumentRef, DrawingEngine, EngineError, EngineHandle, EngineResult};
pub use overlay::{
    ActionId, ContextAction, Icon, IconProvider, IconTable, NoIcons, OverlayKind, OverlayManager,
    OverlayWidget, WidgetId,
};
pub use surface::{Repaint, Surface, SurfaceLayer, SurfacePair};
pub use view::{View, ViewError, ViewEventHandler, ViewEventKind, ViewEvents, ViewId, ViewKind, ViewResult};
