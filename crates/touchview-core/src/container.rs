//! Host containers that views are attached to.

use kurbo::Size;
use std::rc::Rc;
use std::sync::Arc;
use winit::window::Window;

/// A host element whose bounds size a view's surfaces.
pub trait HostContainer {
    /// Current bounds, or `None` if the container is not realized yet.
    fn size(&self) -> Option<Size>;
}

impl HostContainer for Window {
    fn size(&self) -> Option<Size> {
        let size = self.inner_size();
        Some(Size::new(f64::from(size.width), f64::from(size.height)))
    }
}

/// Fixed bounds, for headless hosts.
impl HostContainer for Size {
    fn size(&self) -> Option<Size> {
        Some(*self)
    }
}

/// Bounds that may not be known yet.
impl HostContainer for Option<Size> {
    fn size(&self) -> Option<Size> {
        *self
    }
}

impl<T: HostContainer + ?Sized> HostContainer for Arc<T> {
    fn size(&self) -> Option<Size> {
        (**self).size()
    }
}

impl<T: HostContainer + ?Sized> HostContainer for Rc<T> {
    fn size(&self) -> Option<Size> {
        (**self).size()
    }
}

/// Convert a size to the whole pixels the engine works in.
pub(crate) fn pixel_size(size: Size) -> (u32, u32) {
    let clamp = |v: f64| v.max(0.0).round() as u32;
    (clamp(size.width), clamp(size.height))
}
