//! Drawing engine seam.
//!
//! The engine owns shapes, selection and undo history. Views reach it only
//! through [`DrawingEngine`]. Callbacks into the adapter receive the engine as
//! `&mut dyn DrawingEngine`, so an engine method holding `&mut self` can call
//! back into the adapter without aliasing.

use std::ops::{Deref, DerefMut};

use crate::adapter::GraphView;
use crate::overlay::ActionId;
use crate::view::ViewId;
use thiserror::Error;

/// Engine errors reported to the adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Submission failed: {0}")]
    Submission(String),
    #[error("Front document unavailable")]
    DocumentUnavailable,
    #[error("Engine error: {0}")]
    Other(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Opaque reference to the engine's front document.
///
/// Only meaningful to the engine that produced it; the adapter passes it
/// straight back when recording an undo snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentRef(pub u64);

/// Operations a view consumes from the drawing engine.
///
/// Methods that may trigger callbacks take the adapter as `&mut dyn GraphView`
/// and may invoke it synchronously before returning.
pub trait DrawingEngine {
    /// Create the engine-side view bound to `view`.
    fn create_view(&mut self, view: &mut dyn GraphView);

    /// Create an engine-side view mirroring `source`'s document and view.
    ///
    /// `source_view` identifies the source view's adapter; the engine keys
    /// its engine-side views by [`GraphView::view_id`].
    fn create_linked_view(&mut self, view: &mut dyn GraphView, source: &Self, source_view: ViewId)
    where
        Self: Sized;

    /// Destroy the engine-side view bound to `view`.
    fn destroy_view(&mut self, view: &mut dyn GraphView);

    /// Inform the engine of the view's new size in pixels.
    fn resize(&mut self, view: &mut dyn GraphView, width: u32, height: u32);

    /// An animation or replay is driving the document.
    fn is_playing(&self) -> bool;

    /// An undo or redo is being loaded.
    fn is_undo_loading(&self) -> bool;

    /// Undo snapshots should be recorded for new content.
    fn is_undo_recording(&self) -> bool;

    /// Submit the committed document for `view`.
    ///
    /// Returns whether the submission carried new content.
    fn submit_committed_document(&mut self, view: ViewId) -> EngineResult<bool>;

    /// Submit in-progress shapes for `view`.
    fn submit_dynamic_shapes(&mut self, view: ViewId) -> EngineResult<()>;

    /// Acquire a reference to the front document.
    fn acquire_front_document(&mut self) -> EngineResult<DocumentRef>;

    /// Compute the tick to tag the next undo snapshot with.
    ///
    /// `wall_clock_ms` is a hint; the engine applies its own throttling.
    fn record_tick(&mut self, new_recording: bool, wall_clock_ms: i64) -> i64;

    /// Record an undo snapshot of `document`.
    fn record_undo_snapshot(
        &mut self,
        new_recording: bool,
        tick: i64,
        document: DocumentRef,
        aux_a: i32,
        aux_b: i32,
    );

    /// Run a context action. The engine may call back into `view`.
    fn dispatch_context_action(&mut self, view: &mut dyn GraphView, action: ActionId) -> bool;

    /// Release engine resources. Called exactly once by [`EngineHandle`].
    fn dispose(&mut self) {}
}

/// Exclusive owner of an engine instance.
///
/// The handle is move-only and consumed by [`EngineHandle::dispose`], so the
/// engine is disposed exactly once. Dropping a handle that was never disposed
/// still disposes the engine but logs a warning.
pub struct EngineHandle<E: DrawingEngine> {
    engine: E,
    disposed: bool,
}

impl<E: DrawingEngine> EngineHandle<E> {
    /// Take ownership of an engine.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            disposed: false,
        }
    }

    /// Dispose the engine and release the handle.
    pub fn dispose(mut self) {
        self.engine.dispose();
        self.disposed = true;
    }
}

impl<E: DrawingEngine> Deref for EngineHandle<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.engine
    }
}

impl<E: DrawingEngine> DerefMut for EngineHandle<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: DrawingEngine> Drop for EngineHandle<E> {
    fn drop(&mut self) {
        if !self.disposed {
            log::warn!("Engine handle dropped without explicit teardown");
            self.engine.dispose();
            self.disposed = true;
        }
    }
}

impl<E: DrawingEngine> std::fmt::Debug for EngineHandle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
