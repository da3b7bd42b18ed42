//! Content and transient drawing surfaces.
//!
//! A view draws on two stacked surfaces. The content surface holds committed
//! shapes and is repainted rarely; the transient surface sits above it and
//! holds in-progress shapes, selection handles and overlay widgets. Surfaces
//! are never read back by the adapter, only marked dirty. The host drains the
//! dirty flags with [`SurfacePair::take_repaint`] and repaints.

use crate::overlay::WidgetId;
use kurbo::Size;

/// Which of the two stacked surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceLayer {
    /// Committed shapes.
    Content,
    /// Dynamic shapes and overlay widgets.
    Transient,
}

impl SurfaceLayer {
    /// Stacking order within the container (higher is on top).
    pub fn z_index(self) -> i32 {
        match self {
            SurfaceLayer::Content => 0,
            SurfaceLayer::Transient => 1,
        }
    }
}

/// A drawing surface with "mark dirty / repaint" semantics.
#[derive(Debug, Clone)]
pub struct Surface {
    layer: SurfaceLayer,
    size: Size,
    dirty: bool,
    /// Total invalidation requests, including ones coalesced into one repaint.
    invalidations: u64,
    /// Overlay widgets attached to this surface, in creation order.
    elements: Vec<WidgetId>,
    released: bool,
}

impl Surface {
    /// Create a surface of the given size.
    pub fn new(layer: SurfaceLayer, size: Size) -> Self {
        Self {
            layer,
            size,
            dirty: false,
            invalidations: 0,
            elements: Vec::new(),
            released: false,
        }
    }

    pub fn layer(&self) -> SurfaceLayer {
        self.layer
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the surface. A changed size needs a repaint.
    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.invalidate();
        }
    }

    /// Request a repaint.
    pub fn invalidate(&mut self) {
        if self.released {
            return;
        }
        self.dirty = true;
        self.invalidations += 1;
    }

    /// Whether a repaint is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of invalidation requests received so far.
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    /// Clear and return the pending repaint flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Attach an overlay widget to this surface.
    pub fn attach_element(&mut self, id: WidgetId) {
        if self.released {
            return;
        }
        self.elements.push(id);
        self.invalidate();
    }

    /// Detach an overlay widget. Returns false if it was not attached.
    pub fn detach_element(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.elements.iter().position(|&e| e == id) else {
            return false;
        };
        self.elements.remove(index);
        self.invalidate();
        true
    }

    /// Widgets currently attached.
    pub fn elements(&self) -> &[WidgetId] {
        &self.elements
    }

    /// Release the surface. It ignores all further invalidation.
    pub fn release(&mut self) {
        self.elements.clear();
        self.dirty = false;
        self.released = true;
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// Pending repaints drained from a [`SurfacePair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Repaint {
    pub content: bool,
    pub transient: bool,
}

impl Repaint {
    /// Nothing needs repainting.
    pub fn is_empty(&self) -> bool {
        !self.content && !self.transient
    }
}

/// The two overlapping surfaces owned by a view.
#[derive(Debug, Clone)]
pub struct SurfacePair {
    pub content: Surface,
    pub transient: Surface,
}

impl SurfacePair {
    /// Create both surfaces at the container's size.
    pub fn new(size: Size) -> Self {
        Self {
            content: Surface::new(SurfaceLayer::Content, size),
            transient: Surface::new(SurfaceLayer::Transient, size),
        }
    }

    /// Surfaces in paint order, bottom first.
    pub fn stacked(&self) -> [&Surface; 2] {
        [&self.content, &self.transient]
    }

    /// Resize both surfaces.
    pub fn set_size(&mut self, size: Size) {
        self.content.set_size(size);
        self.transient.set_size(size);
    }

    /// Mark both surfaces dirty, content first.
    pub fn invalidate_all(&mut self) {
        self.content.invalidate();
        self.transient.invalidate();
    }

    /// Drain both dirty flags.
    pub fn take_repaint(&mut self) -> Repaint {
        Repaint {
            content: self.content.take_dirty(),
            transient: self.transient.take_dirty(),
        }
    }

    /// Release both surfaces.
    pub fn release(&mut self) {
        self.content.release();
        self.transient.release();
    }
}
